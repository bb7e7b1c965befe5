//! The Validator stage, split into the strict (fail-closed) checks and the
//! advisory (fail-open) engine-backed checks, per §4.3/§4.4.

pub mod clamav;
pub mod image;
pub mod quicksand;
pub mod strict;
pub mod yara;

pub use quicksand::QuicksandEngine;

use crate::config::UploadConfig;
use crate::model::UploadedFile;

/// Run every advisory check, in the original's order (YARA, image, Quicksand,
/// ClamAV), but only if the strict validator left `file` unblocked.
pub fn validate_advisory(
    file: &mut UploadedFile,
    config: &UploadConfig,
    quicksand_engine: Option<&dyn QuicksandEngine>,
) {
    if file.blocked() {
        return;
    }

    yara::validate(file, config.yara_file_location.as_deref());
    image::validate(file);

    if config.quicksand {
        quicksand::validate(file, quicksand_engine);
    }

    if config.clamav {
        clamav::validate(file, clamav::DEFAULT_SOCKET_PATH);
    }
}
