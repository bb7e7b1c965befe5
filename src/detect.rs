//! Detector stage: filename splits, extensions, and the magic-number signature MIME.
//!
//! The signature MIME comes from the `infer` crate's magic-byte sniffing,
//! standing in for `libmagic`/`python-magic`. On sniffer failure we fall back
//! to the empty string, per §4.2/§7 — an unclassifiable file fails every
//! whitelist and cross-check downstream, which is the intended fail-closed
//! behaviour.

use crate::model::UploadedFile;

/// Populate `detection.filename_splits`, `detection.extensions`, and
/// `detection.signature_mime` on `file`.
pub fn detect(file: &mut UploadedFile) {
    let filename_splits: Vec<String> = file
        .current_name
        .to_lowercase()
        .split('.')
        .map(str::to_string)
        .collect();

    // Only the last split is used today; the loop shape downstream is kept
    // ready for a multi-extension policy (§9).
    let extensions = vec![filename_splits.last().cloned().unwrap_or_default()];

    let signature_mime = infer::get(&file.content)
        .map(|t| t.mime_type().to_string())
        .unwrap_or_default();

    log::debug!(
        "[detect] name={} splits={:?} signature_mime={:?}",
        file.current_name,
        filename_splits,
        signature_mime
    );

    file.detection.filename_splits = filename_splits;
    file.detection.extensions = extensions;
    file.detection.signature_mime = signature_mime;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::MemoryFile;
    use crate::ingest::ingest;
    use crate::mime_types::known_mime_types;

    #[test]
    fn splits_are_lowercased_and_dot_separated() {
        let mut mem = MemoryFile::new("My.Archive.TAR.GZ", b"data".to_vec(), "application/gzip");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        assert_eq!(
            file.detection.filename_splits,
            vec!["my", "archive", "tar", "gz"]
        );
        assert_eq!(file.detection.extensions, vec!["gz"]);
    }

    #[test]
    fn pdf_signature_is_detected_from_magic_bytes() {
        let mut mem = MemoryFile::new(
            "legit.pdf",
            b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec(),
            "application/pdf",
        );
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        assert_eq!(file.detection.signature_mime, "application/pdf");
    }

    #[test]
    fn unrecognized_content_falls_back_to_empty_signature() {
        let mut mem = MemoryFile::new("mystery.bin", b"\x01\x02\x03".to_vec(), "application/octet-stream");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        assert_eq!(file.detection.signature_mime, "");
    }
}
