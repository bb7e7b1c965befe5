//! ClamAV scanning over a UNIX socket, grounded on the original's
//! `get_clamAV_results`.
//!
//! Compiled in only behind the `clamav-engine` feature. Daemon connection
//! errors are logged but never fail the check (§7: a down daemon must not
//! DoS uploads) — only an explicit `FOUND` response blocks.

use crate::model::UploadedFile;

/// Default per the original: `clamd`'s UNIX control socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/clamav/clamd.ctl";

#[cfg(feature = "clamav-engine")]
fn scan(socket_path: &str, content: &[u8]) -> anyhow::Result<String> {
    let response = clamav_client::scan_buffer_unix_socket(content, socket_path, None)
        .map_err(|e| anyhow::anyhow!("clamAV scan failed: {}", e))?;
    Ok(String::from_utf8_lossy(&response).into_owned())
}

/// Runs only when `config.clamav` is true (checked by the caller).
pub fn validate(file: &mut UploadedFile, socket_path: &str) {
    #[cfg(feature = "clamav-engine")]
    {
        log::debug!("[validate:clamav] Running clamAV check");
        match scan(socket_path, &file.content) {
            Ok(response) if response.contains("FOUND") => {
                file.mark_blocked();
                file.validation.clamav_result_ok = false;
                file.validation.clamav_result_detail = response
                    .split(':')
                    .nth(1)
                    .unwrap_or(&response)
                    .trim()
                    .trim_end_matches("FOUND")
                    .trim()
                    .to_string();
                log::warn!("[validate:clamav] {} - Blocking file: clamAV detection", file.current_name);
            }
            Ok(_) => {
                log::debug!("[validate:clamav] PASSED");
            }
            Err(e) => {
                log::error!("[validate:clamav] Cannot connect to clamAV service: {}", e);
            }
        }
    }

    #[cfg(not(feature = "clamav-engine"))]
    {
        let _ = socket_path;
        log::info!(
            "[validate:clamav] Skipping clamAV validation as the clamav-engine feature is not compiled in"
        );
    }
}
