//! Image structural integrity check, using the same `image`-crate decode
//! shape as a built-in corruption-detection handler, applied to the
//! original's PIL-based two-pass verify/transpose dance.
//!
//! Two independent decodes of the same buffer: the first exercises the
//! decoder's own structural checks, the second forces a full pixel-buffer
//! materialization via a horizontal flip, which some malformed images survive
//! the first pass but choke on.

use crate::model::UploadedFile;

fn check_integrity(content: &[u8]) -> bool {
    if let Err(e) = image::load_from_memory(content) {
        log::error!("[validate:image] CHECK: Image integrity (1) - FAILED: {}", e);
        return false;
    }

    match image::load_from_memory(content) {
        Ok(img) => {
            let _ = img.fliph();
        }
        Err(e) => {
            log::error!("[validate:image] CHECK: Image integrity (2) - FAILED: {}", e);
            return false;
        }
    }

    log::debug!("[validate:image] CHECK: Image integrity - PASSED");
    true
}

/// Only meaningful when `guessed_mime` starts with `image/` (§4.4); advisory,
/// never gates the pipeline on its own.
pub fn validate(file: &mut UploadedFile) {
    if !file.detection.guessed_mime.starts_with("image/") {
        return;
    }

    file.validation.file_integrity_ok = check_integrity(&file.content);
    file.validation.file_integrity_check_done = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect;
    use crate::framework::MemoryFile;
    use crate::guess::guess_mime_type;
    use crate::ingest::ingest;
    use crate::mime_types::known_mime_types;

    fn png_1x1() -> Vec<u8> {
        // A minimal valid 1x1 transparent PNG.
        vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
            0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
            0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
            0x9C, 0x63, 0x64, 0x60, 0x60, 0x60, 0x00, 0x00, 0x00, 0x05, 0x00, 0x01, 0x5F, 0x4D,
            0x8B, 0x35, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
        ]
    }

    #[test]
    fn valid_png_passes_integrity_check() {
        let mut mem = MemoryFile::new("pixel.png", png_1x1(), "image/png");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        guess_mime_type(&mut file);
        validate(&mut file);
        assert!(file.validation.file_integrity_ok);
        assert!(file.validation.file_integrity_check_done);
    }

    #[test]
    fn truncated_png_fails_integrity_check() {
        let mut content = png_1x1();
        content.truncate(20);
        let mut mem = MemoryFile::new("pixel.png", content, "image/png");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        file.detection.guessed_mime = "image/png".to_string();
        validate(&mut file);
        assert!(!file.validation.file_integrity_ok);
    }

    #[test]
    fn non_image_mime_skips_the_check_entirely() {
        let mut mem = MemoryFile::new("a.txt", b"hello".to_vec(), "text/plain");
        let mut file = ingest(&mut mem, known_mime_types()).unwrap();
        detect(&mut file);
        guess_mime_type(&mut file);
        validate(&mut file);
        assert!(!file.validation.file_integrity_check_done);
    }
}
