//! Conversion route
//!
//! POST /api/v1/convert: multipart EPUB upload in, paginated document out.
//! The output format comes from the `format` query parameter (`pdf` by
//! default, `txt` for plain text) and the response is an attachment whose
//! filename is the upload's with its extension swapped.

use axum::{
    body::{Body, Bytes},
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::epub::{extract, resolve_package, EpubArchive};
use crate::error::{AppError, Result};
use crate::layout::paginate;
use crate::render::OutputFormat;
use crate::state::AppState;

/// The only media type this service converts.
const EPUB_MEDIA_TYPE: &str = "application/epub+zip";

/// Create the convert router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(convert))
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    #[serde(default)]
    format: OutputFormat,
}

/// The uploaded document, pulled out of the multipart body.
struct Upload {
    file_name: String,
    declared_type: Option<String>,
    data: Bytes,
}

/// What the blocking pipeline hands back to the handler.
struct ConversionOutput {
    bytes: Vec<u8>,
    media_type: &'static str,
    chapters: usize,
    pages: usize,
}

/// POST /api/v1/convert
///
/// Validates the upload's media type, runs the extraction pipeline, and
/// answers with the rendered document as an attachment.
async fn convert(
    State(state): State<AppState>,
    Query(params): Query<ConvertParams>,
    multipart: Multipart,
) -> Result<Response> {
    let request_id = Uuid::new_v4();
    let upload = read_upload(multipart).await?;

    tracing::info!(
        request_id = %request_id,
        file_name = %upload.file_name,
        size = upload.data.len(),
        format = ?params.format,
        "Conversion requested"
    );

    let media_type = effective_media_type(&upload);
    if media_type != EPUB_MEDIA_TYPE {
        return Err(AppError::UnsupportedMediaType(media_type));
    }

    let renderer = params.format.renderer();
    let output_name = replace_extension(&upload.file_name, renderer.file_extension());
    let title = file_stem(&upload.file_name).to_string();
    let config = state.config().layout.page_config();
    let data = upload.data;

    // The whole pipeline is CPU-bound; keep it off the async runtime.
    let output = tokio::task::spawn_blocking(move || -> Result<ConversionOutput> {
        let archive = EpubArchive::load(&data)?;
        let package = resolve_package(&archive)?;
        let extracted = extract(&archive, &package)?;
        let layout = paginate(&extracted.text(), config);
        let bytes = renderer.render(&title, &layout)?;
        Ok(ConversionOutput {
            bytes,
            media_type: renderer.media_type(),
            chapters: extracted.len(),
            pages: layout.page_count(),
        })
    })
    .await
    .map_err(|e| AppError::Internal(format!("Conversion task failed: {}", e)))??;

    tracing::info!(
        request_id = %request_id,
        chapters = output.chapters,
        pages = output.pages,
        size = output.bytes.len(),
        "Conversion complete"
    );

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, output.media_type)
        .header(header::CONTENT_LENGTH, output.bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", output_name),
        )
        .body(Body::from(output.bytes))
        .map_err(|e| AppError::Internal(e.to_string()))?)
}

/// Take the first multipart field that carries a filename.
///
/// The field's name is logged but not required to be anything in
/// particular; clients vary.
async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let field_name = field.name().unwrap_or("").to_string();
        let declared_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        tracing::debug!(field = %field_name, file_name = %file_name, "Upload field received");
        return Ok(Upload {
            file_name,
            declared_type,
            data,
        });
    }

    Err(AppError::BadRequest("No file in request body".to_string()))
}

/// The media type used for validation: the declared content type, unless it
/// is missing or the generic octet-stream, in which case the filename
/// extension decides.
fn effective_media_type(upload: &Upload) -> String {
    match upload.declared_type.as_deref() {
        Some(declared) if declared != "application/octet-stream" => declared.to_string(),
        _ => mime_guess::from_path(&upload.file_name)
            .first()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Filename minus its final extension.
fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) if index > 0 => &file_name[..index],
        _ => file_name,
    }
}

/// Swap the final extension for the renderer's.
fn replace_extension(file_name: &str, extension: &str) -> String {
    format!("{}.{}", file_stem(file_name), extension)
}
