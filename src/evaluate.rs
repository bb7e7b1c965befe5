//! Evaluator: pure aggregation of every validator outcome into the block
//! decision, reason tags, and the request-wide error message.
//!
//! Ported phrase-for-phrase from `modules/evaluator.py`. Four ordered,
//! cumulative policies; each can independently set `blocked` and append its
//! own reason tag and message fragment.

use crate::context::InspectionContext;
use crate::model::UploadedFile;

/// Collapse whitespace runs (including embedded tabs/newlines, which the
/// original's triple-quoted f-strings leave behind) into single spaces before
/// the fragment is appended to the request-wide message.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply the four-policy block decision to `file`, updating `ctx` in place.
pub fn evaluate(file: &mut UploadedFile, ctx: &mut InspectionContext) {
    log::debug!("[evaluate] {} - Starting maliciousness evaluation", file.current_name);

    // 1. Strict validation + attack detection.
    let strict_ok = file.validation.file_size_ok
        && file.validation.matching_extension_signature_request_ok
        && file.validation.filename_length_ok
        && file.validation.extensions_whitelist_ok
        && file.validation.request_whitelist_ok
        && file.validation.signature_whitelist_ok;
    let no_attacks = !file.attacks.mime_manipulation && !file.attacks.null_byte_injection;

    if !(strict_ok && no_attacks) {
        ctx.block();
        file.validation.malicious = true;
        file.block("strict_eval_failed");

        let mut detail = format!("File: [{}] ERROR: ", file.current_name);
        if !file.validation.file_size_ok {
            detail.push_str("File size not match;");
        }
        if !file.validation.matching_extension_signature_request_ok {
            detail.push_str("File extension and signature not match;");
        }
        if !file.validation.filename_length_ok {
            detail.push_str("Filename length not match;");
        }
        if !file.validation.extensions_whitelist_ok {
            detail.push_str("File extensions whitelist not match;");
        }
        if !file.validation.request_whitelist_ok {
            detail.push_str("Request whitelist not match;");
        }
        if !file.validation.signature_whitelist_ok {
            detail.push_str("Signature whitelist not match;");
        }
        if file.attacks.mime_manipulation {
            detail.push_str("File with mime_manipulation;");
        }
        if file.attacks.null_byte_injection {
            detail.push_str("File with null_byte_injection;");
        }

        ctx.push_errmsg(&normalize_whitespace(&detail));
        log::warn!("[evaluate] Blocking: Strict evaluation FAILED");
    } else {
        log::debug!("[evaluate] Strict evaluation PASSED");
    }

    // 2. YARA.
    if !file.validation.yara_rules_ok {
        ctx.block();
        file.validation.malicious = true;
        file.block("yara_eval_failed");
        let detail = format!("File: [{}]: YARA evaluation FAILED;", file.current_name);
        ctx.push_errmsg(&normalize_whitespace(&detail));
        log::warn!("[evaluate] Blocking: YARA evaluation FAILED");
    } else {
        log::debug!("[evaluate] YARA evaluation PASSED");
    }

    // 3. Quicksand.
    let quicksand_ok = file.validation.quicksand_result_ok;
    if !quicksand_ok {
        ctx.block();
        file.validation.malicious = true;
        file.block("QS_detection");
        let detail = format!(
            "File: [{}]: Quicksand evaluation FAILED: {};",
            file.current_name, file.validation.quicksand_result_detail
        );
        ctx.push_errmsg(&normalize_whitespace(&detail));
        log::warn!("[evaluate] Blocking: Quicksand evaluation FAILED");
    } else {
        log::debug!("[evaluate] Quicksand evaluation PASSED");
    }

    // 4. ClamAV.
    let clamav_ok = file.validation.clamav_result_ok;
    if !clamav_ok {
        ctx.block();
        file.validation.malicious = true;
        file.block("clamav");
        let detail = format!(
            "File: [{}]: clamAV evaluation FAILED: {};",
            file.current_name, file.validation.clamav_result_detail
        );
        ctx.push_errmsg(&normalize_whitespace(&detail));
        log::warn!("[evaluate] Blocking: clamAV evaluation FAILED");
    } else {
        log::debug!("[evaluate] clamAV evaluation PASSED");
    }
}
