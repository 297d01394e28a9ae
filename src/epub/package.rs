//! Package document resolution.
//!
//! An EPUB names its package document (OPF) indirectly: the fixed-location
//! `META-INF/container.xml` carries a `rootfile` element whose `full-path`
//! attribute points at the OPF, and the OPF in turn carries the manifest
//! (id -> resource) and the spine (reading order). This module follows that
//! chain and produces a [`PackageDocument`].
//!
//! The XML is deserialized into raw serde carriers first and then folded
//! into the domain type in an explicit merge step. Repeated elements land in
//! `Vec` fields, so a manifest with one item and a manifest with fifty
//! deserialize identically; there is no one-vs-many special case anywhere
//! downstream.

use std::collections::HashMap;

use serde::Deserialize;

use super::archive::EpubArchive;
use super::error::{EpubError, Result};

/// Fixed location of the container document inside the archive.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

// Raw carriers for container.xml. Unknown attributes and elements
// (version, xmlns, links) are ignored.

#[derive(Debug, Deserialize)]
struct ContainerXml {
    rootfiles: ContainerRootfiles,
}

#[derive(Debug, Deserialize)]
struct ContainerRootfiles {
    #[serde(default)]
    rootfile: Vec<ContainerRootfile>,
}

#[derive(Debug, Deserialize)]
struct ContainerRootfile {
    #[serde(rename = "@full-path")]
    full_path: String,
}

// Raw carriers for the OPF package document. `<metadata>` and `<guide>` are
// ignored wholesale; extraction only needs manifest and spine.

#[derive(Debug, Deserialize)]
struct OpfPackage {
    manifest: OpfManifest,
    spine: OpfSpine,
}

#[derive(Debug, Deserialize)]
struct OpfManifest {
    #[serde(default)]
    item: Vec<OpfItem>,
}

#[derive(Debug, Deserialize)]
struct OpfItem {
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@media-type")]
    media_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpfSpine {
    #[serde(default)]
    itemref: Vec<OpfItemref>,
}

#[derive(Debug, Deserialize)]
struct OpfItemref {
    #[serde(rename = "@idref")]
    idref: Option<String>,
}

/// One manifest item, with its href already resolved to an archive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Archive-absolute path of the resource.
    pub path: String,
    /// Declared media type, empty when the item carried none.
    pub media_type: String,
}

/// The resolved package document: where it lives, what it catalogs, and the
/// order its content reads in.
#[derive(Debug, Clone)]
pub struct PackageDocument {
    /// Archive path of the OPF itself.
    pub root_path: String,
    /// Manifest items keyed by id.
    pub manifest: HashMap<String, ManifestEntry>,
    /// Spine idrefs in document order.
    pub spine: Vec<String>,
}

/// Follow container.xml to the OPF and build the [`PackageDocument`].
pub fn resolve_package(archive: &EpubArchive) -> Result<PackageDocument> {
    let container_xml = archive
        .read(CONTAINER_PATH)
        .ok_or(EpubError::MissingContainer)?;

    let container: ContainerXml = quick_xml::de::from_str(&container_xml)
        .map_err(|e| EpubError::MalformedContainer(e.to_string()))?;

    // EPUB 3 calls the first rootfile the default rendition; later ones are
    // alternates we don't render.
    let root_path = container
        .rootfiles
        .rootfile
        .into_iter()
        .next()
        .map(|rootfile| rootfile.full_path)
        .ok_or_else(|| EpubError::MalformedContainer("no rootfile element".into()))?;

    let opf_xml = archive
        .read(&root_path)
        .ok_or_else(|| EpubError::MissingPackageDocument(root_path.clone()))?;

    let package: OpfPackage = quick_xml::de::from_str(&opf_xml)
        .map_err(|e| EpubError::MalformedPackage(e.to_string()))?;

    Ok(merge(root_path, package))
}

/// Fold the raw OPF carriers into the domain type.
///
/// Hrefs become archive-absolute here; nothing downstream ever sees a raw
/// href. Items without an id or href can never be addressed by the spine,
/// so they are dropped with a warning rather than failing the package.
fn merge(root_path: String, package: OpfPackage) -> PackageDocument {
    let base_dir = parent_dir(&root_path);

    let mut manifest = HashMap::with_capacity(package.manifest.item.len());
    for item in package.manifest.item {
        let (Some(id), Some(href)) = (item.id, item.href) else {
            tracing::warn!("manifest item missing id or href, skipping");
            continue;
        };
        manifest.insert(
            id,
            ManifestEntry {
                path: resolve_href(base_dir, &href),
                media_type: item.media_type.unwrap_or_default(),
            },
        );
    }

    let spine = package
        .spine
        .itemref
        .into_iter()
        .filter_map(|itemref| itemref.idref)
        .collect();

    PackageDocument {
        root_path,
        manifest,
        spine,
    }
}

/// Directory portion of an archive path, without a trailing slash.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

/// Resolve an href against a base directory, collapsing `.` and `..`
/// segments. Both sides use `/` separators as stored in the archive.
fn resolve_href(base_dir: &str, href: &str) -> String {
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    segments.join("/")
}
