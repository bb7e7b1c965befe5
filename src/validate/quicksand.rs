//! Quicksand macro/exploit analysis, grounded on the original's
//! `perform_quicksand_scan`.
//!
//! No Rust crate wraps Quicksand, so it is modeled as a pluggable trait
//! instead of being fabricated as a dependency: a deployment that wants
//! Quicksand analysis provides an implementation (e.g. shelling out to the
//! `quicksand` CLI, or binding to `libquicksand` via FFI) and hands it to
//! [`validate`]. With no engine configured, this stage is a documented no-op
//! per §7 — an absent scanner must never block an upload.

use std::time::Duration;

use crate::model::UploadedFile;

/// The result of one Quicksand scan.
pub struct QuicksandResult {
    pub rating: f64,
    pub risk: String,
}

/// A pluggable Quicksand backend. Implementations are expected to enforce
/// their own internal timeout; [`QUICKSAND_TIMEOUT`] documents the contract
/// the original enforces (18 seconds) for implementations that want it.
pub trait QuicksandEngine {
    fn scan(&self, content: &[u8], timeout: Duration) -> anyhow::Result<QuicksandResult>;
}

/// The original's scan timeout, with string extraction enabled.
pub const QUICKSAND_TIMEOUT: Duration = Duration::from_secs(18);

/// A rating above this threshold fails the check (§4.4).
const RATING_THRESHOLD: f64 = 1.0;

/// Runs only when `config.quicksand` is true and an engine is configured.
pub fn validate(file: &mut UploadedFile, engine: Option<&dyn QuicksandEngine>) {
    let Some(engine) = engine else {
        log::info!("[validate:quicksand] Skipping Quicksand analysis: no engine configured");
        return;
    };

    log::debug!("[validate:quicksand] Running Quicksand");
    match engine.scan(&file.content, QUICKSAND_TIMEOUT) {
        Ok(result) if result.rating > RATING_THRESHOLD => {
            file.mark_blocked();
            file.validation.quicksand_result_ok = false;
            file.validation.quicksand_result_detail = result.risk;
            log::warn!(
                "[validate:quicksand] {} - Blocking file: Quicksand detection",
                file.current_name
            );
        }
        Ok(_) => {
            log::debug!("[validate:quicksand] PASSED");
        }
        Err(e) => {
            log::error!("[validate:quicksand] Scan failed, leaving check passing: {}", e);
        }
    }
}
