//! End-to-end tests for the conversion endpoint.
//!
//! Drives the real router in-process: multipart upload in, rendered
//! document (or structured error) out.

use std::io::{Cursor, Write};

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use folio_server::config::Config;
use folio_server::routes;
use folio_server::state::AppState;

const EPUB_MIME: &str = "application/epub+zip";

fn server() -> TestServer {
    let state = AppState::new(Config::default());
    TestServer::new(routes::app(state)).unwrap()
}

fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (path, content) in entries {
            writer.start_file(*path, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }
    buffer
}

fn sample_epub() -> Vec<u8> {
    build_zip(&[
        ("mimetype", "application/epub+zip"),
        (
            "META-INF/container.xml",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
        ),
        (
            "OEBPS/content.opf",
            r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="uid">urn:uuid:11111111-2222-3333-4444-555555555555</dc:identifier>
    <dc:title>Sample Book</dc:title>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="ch1" href="chapter1.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch2" href="chapter2.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="ch1"/>
    <itemref idref="ch2"/>
  </spine>
</package>"#,
        ),
        (
            "OEBPS/chapter1.xhtml",
            r#"<html xmlns="http://www.w3.org/1999/xhtml">
<body><h1>Chapter One</h1><p>The rain had not stopped for three days.</p></body>
</html>"#,
        ),
        (
            "OEBPS/chapter2.xhtml",
            r#"<html xmlns="http://www.w3.org/1999/xhtml">
<body><h1>Chapter Two</h1><p>On the fourth day the sun came out.</p></body>
</html>"#,
        ),
    ])
}

fn epub_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes).file_name(file_name).mime_type(mime),
    )
}

#[tokio::test]
async fn test_convert_returns_pdf_attachment() {
    let server = server();
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(sample_epub(), "sample.epub", EPUB_MIME))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=\"sample.pdf\""
    );
    assert!(response.as_bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_convert_txt_format() {
    let server = server();
    let response = server
        .post("/api/v1/convert?format=txt")
        .multipart(epub_form(sample_epub(), "sample.epub", EPUB_MIME))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=\"sample.txt\""
    );

    let text = response.text();
    assert!(text.contains("Chapter One The rain had not stopped for three days."));
    assert!(text.contains("Chapter Two On the fourth day the sun came out."));
    // Chapters are separated by a blank line.
    assert!(text.contains("days.\n\nChapter Two"));
    // Default grid is 80 columns.
    assert!(text.lines().all(|line| line.chars().count() <= 80));
}

#[tokio::test]
async fn test_output_filename_keeps_stem() {
    let server = server();
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(sample_epub(), "My Great Novel.epub", EPUB_MIME))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=\"My Great Novel.pdf\""
    );
}

#[tokio::test]
async fn test_rejects_wrong_media_type() {
    let server = server();
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(sample_epub(), "sample.pdf", "application/pdf"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "unsupported_media_type");
}

#[tokio::test]
async fn test_accepts_octet_stream_with_epub_extension() {
    let server = server();
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(
            sample_epub(),
            "sample.epub",
            "application/octet-stream",
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejects_request_without_file() {
    let server = server();
    let response = server
        .post("/api/v1/convert")
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_rejects_corrupt_archive() {
    let server = server();
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(
            b"definitely not a zip archive".to_vec(),
            "broken.epub",
            EPUB_MIME,
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "corrupt_archive");
}

#[tokio::test]
async fn test_rejects_archive_without_container() {
    let server = server();
    let bytes = build_zip(&[("mimetype", "application/epub+zip")]);
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(bytes, "bare.epub", EPUB_MIME))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "missing_container");
}

#[tokio::test]
async fn test_rejects_package_without_spine() {
    let server = server();
    let bytes = build_zip(&[
        (
            "META-INF/container.xml",
            r#"<container><rootfiles><rootfile full-path="content.opf"/></rootfiles></container>"#,
        ),
        (
            "content.opf",
            r#"<package><manifest><item id="a" href="a.xhtml" media-type="application/xhtml+xml"/></manifest></package>"#,
        ),
    ]);
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(bytes, "nospine.epub", EPUB_MIME))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "malformed_package");
}

#[tokio::test]
async fn test_rejects_book_where_nothing_extracts() {
    let server = server();
    let bytes = build_zip(&[
        (
            "META-INF/container.xml",
            r#"<container><rootfiles><rootfile full-path="content.opf"/></rootfiles></container>"#,
        ),
        (
            "content.opf",
            r#"<package>
  <manifest><item id="gone" href="gone.xhtml" media-type="application/xhtml+xml"/></manifest>
  <spine><itemref idref="gone"/><itemref idref="ghost"/></spine>
</package>"#,
        ),
    ]);
    let response = server
        .post("/api/v1/convert")
        .multipart(epub_form(bytes, "hollow.epub", EPUB_MIME))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "empty_extraction");
}

#[tokio::test]
async fn test_rejects_unknown_format_param() {
    let server = server();
    let response = server
        .post("/api/v1/convert?format=docx")
        .multipart(epub_form(sample_epub(), "sample.epub", EPUB_MIME))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = server();

    for path in ["/health", "/api/v1/health"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "folio-server");
    }
}
