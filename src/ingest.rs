//! Ingest stage: read the upload into memory, hash it, snapshot declared metadata.
//!
//! Grounded on the original `File.__init__`/`_get_file_hashes`: join all
//! chunks into one buffer, then hash once. No rejection happens here —
//! oversize handling belongs to the Validator (§4.3).

use std::io::Read;

use anyhow::{Context, Result};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::framework::FrameworkFile;
use crate::model::{ContentHashes, Declared, UploadedFile};

fn hex<D: Digest>(mut hasher: D, content: &[u8]) -> String {
    hasher.update(content);
    hex::encode(hasher.finalize())
}

fn hash_content(content: &[u8]) -> ContentHashes {
    ContentHashes {
        sha256: hex(Sha256::new(), content),
        md5: hex(Md5::new(), content),
        sha1: hex(Sha1::new(), content),
        sha512: hex(Sha512::new(), content),
    }
}

/// Read `file` fully into memory and construct the [`UploadedFile`] that the
/// rest of the pipeline will mutate. `known_mimes` seeds the guessing-score
/// table (invariant 6).
pub fn ingest(
    file: &mut dyn FrameworkFile,
    known_mimes: impl IntoIterator<Item = &'static str>,
) -> Result<UploadedFile> {
    let mut content = Vec::with_capacity(file.size() as usize);
    file.reader()
        .read_to_end(&mut content)
        .context("Failed to read uploaded file content")?;

    let hashes = hash_content(&content);

    let declared = Declared {
        content_type: file.content_type().to_string(),
        charset: file.charset().to_string(),
        content_type_extra: file.content_type_extra(),
        size: file.size(),
    };

    log::debug!(
        "[ingest] name={} size={} sha256={}",
        file.name(),
        declared.size,
        hashes.sha256
    );

    Ok(UploadedFile::new(
        file.name().to_string(),
        content,
        declared,
        hashes,
        known_mimes,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::MemoryFile;
    use crate::mime_types::known_mime_types;

    #[test]
    fn sha256_reflects_ingested_content() {
        let mut mem = MemoryFile::new("a.txt", b"hello".to_vec(), "text/plain");
        let file = ingest(&mut mem, known_mime_types()).unwrap();
        // sha256("hello")
        assert_eq!(
            file.hashes.sha256,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn declared_metadata_is_copied_verbatim() {
        let mut mem = MemoryFile::new("a.txt", b"hello".to_vec(), "text/plain");
        let file = ingest(&mut mem, known_mime_types()).unwrap();
        assert_eq!(file.declared.content_type, "text/plain");
        assert_eq!(file.declared.size, 5);
    }
}
