//! The inbound/outbound boundary the core requires from whatever web
//! framework embeds it.
//!
//! The original hooks a Django middleware directly onto `request.FILES`. This
//! crate keeps the same shape — a streaming-chunk source in, a rebuilt file
//! out — without assuming any particular framework, per the redesign note on
//! dynamic attribute injection (thread-locals and ad-hoc request fields are
//! not reproduced here).

use std::collections::BTreeMap;
use std::io::Read;

/// What the pipeline needs from a framework's representation of one uploaded
/// part. An adapter for a specific web framework implements this once.
pub trait FrameworkFile {
    /// A reader over the part's content; may stream in chunks.
    fn reader(&mut self) -> &mut dyn Read;
    fn name(&self) -> &str;
    fn size(&self) -> u64;
    fn content_type(&self) -> &str;
    fn content_type_extra(&self) -> BTreeMap<String, String>;
    fn charset(&self) -> &str;
}

/// An in-memory stand-in for [`FrameworkFile`], handy for tests and for the
/// CLI harness that drives the pipeline over local files.
pub struct MemoryFile {
    pub name: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub content_type_extra: BTreeMap<String, String>,
    pub charset: String,
    cursor: std::io::Cursor<Vec<u8>>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>, content_type: impl Into<String>) -> Self {
        let cursor = std::io::Cursor::new(content.clone());
        Self {
            name: name.into(),
            content,
            content_type: content_type.into(),
            content_type_extra: BTreeMap::new(),
            charset: String::new(),
            cursor,
        }
    }
}

impl FrameworkFile for MemoryFile {
    fn reader(&mut self) -> &mut dyn Read {
        self.cursor.set_position(0);
        &mut self.cursor
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.content.len() as u64
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn content_type_extra(&self) -> BTreeMap<String, String> {
        self.content_type_extra.clone()
    }

    fn charset(&self) -> &str {
        &self.charset
    }
}

/// What the middleware hands back to the framework after inspection: either
/// the (possibly sanitized) file, or a 1-byte placeholder for a blocked one.
#[derive(Debug, Clone)]
pub struct RebuiltFile {
    pub name: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub content_type_extra: BTreeMap<String, String>,
    pub charset: String,
}

/// Build the outbound file the adapter should substitute back into the
/// request, per §6: a 1-byte `0x20` placeholder for blocked files, carrying
/// the original declared metadata; the live buffer otherwise.
pub fn rebuild(file: &crate::model::UploadedFile) -> RebuiltFile {
    if file.blocked() {
        RebuiltFile {
            name: file.original_name.clone(),
            content: vec![0x20],
            content_type: file.declared.content_type.clone(),
            content_type_extra: file.declared.content_type_extra.clone(),
            charset: file.declared.charset.clone(),
        }
    } else {
        RebuiltFile {
            name: file.current_name.clone(),
            content: file.content.clone(),
            content_type: file.declared.content_type.clone(),
            content_type_extra: file.declared.content_type_extra.clone(),
            charset: file.declared.charset.clone(),
        }
    }
}
