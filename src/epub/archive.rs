//! In-memory EPUB archive access.
//!
//! An EPUB is a ZIP container. [`EpubArchive`] inflates every file entry up
//! front into a `path -> bytes` index, so the rest of the pipeline does
//! plain map lookups instead of seeking through the ZIP repeatedly. Uploads
//! are bounded by the request body limit, so holding the whole book in
//! memory is fine.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use zip::result::ZipError;
use zip::ZipArchive;

use super::error::Result;

/// A fully-indexed EPUB container.
#[derive(Debug)]
pub struct EpubArchive {
    entries: HashMap<String, Vec<u8>>,
}

impl EpubArchive {
    /// Index every file entry in the archive.
    ///
    /// Fails with `EpubError::CorruptArchive` if the bytes are not a
    /// readable ZIP or any entry fails to inflate. There are no partial
    /// archives: either every entry is indexed or the load fails.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;

        let mut entries = HashMap::with_capacity(zip.len());
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            // The entry size declared in the central directory is untrusted
            // input; let the read grow the buffer.
            let mut data = Vec::new();
            entry.read_to_end(&mut data).map_err(ZipError::from)?;
            entries.insert(entry.name().to_string(), data);
        }

        Ok(Self { entries })
    }

    /// Look up an entry by its exact stored path and decode it as text.
    ///
    /// Paths are matched byte-for-byte and case-sensitively; there is no
    /// normalization or percent-decoding. Absence is `None`, never an error:
    /// whether a missing entry is fatal depends on who is asking.
    pub fn read(&self, path: &str) -> Option<String> {
        self.entries.get(path).map(|bytes| decode_text(bytes))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode entry bytes as UTF-8, lossily, with any leading BOM removed.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = strip_bom(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Strip a UTF-8 byte order mark if present.
fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes)
}
