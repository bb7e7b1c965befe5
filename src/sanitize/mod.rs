//! Sanitizer stage: filename randomization plus type-specific content disarm.
//!
//! Grounded on `modules/sanitization/sanitizer.py`: basic sanitization always
//! runs first (unless configured off), then a type dispatch to the one
//! content-specific sanitizer this crate implements (PDF disarm).

pub mod filename;
pub mod pdf;

use crate::config::UploadConfig;
use crate::model::UploadedFile;

/// Runs only if `file` is not blocked at entry (§4.7, invariant 4).
pub fn sanitize(file: &mut UploadedFile, config: &UploadConfig) {
    if file.blocked() {
        return;
    }

    log::debug!("[sanitize] {} - Starting sanitization", file.current_name);

    if !config.keep_original_filename {
        filename::randomize(file);
    }

    if file.detection.guessed_mime == "application/pdf" {
        pdf::sanitize(file);
    }
}
