//! Strict Validator: size, whitelist, cross-check, filename, and null-byte checks.
//!
//! Ported check-for-check from `modules/validation/basic.py`. Each check
//! writes its boolean into `validation` and flips `blocked` on failure; the
//! Evaluator is solely responsible for turning those booleans into reasons.

use crate::config::UploadConfig;
use crate::mime_types::guess_from_extension;
use crate::model::UploadedFile;
use crate::whitelist::equivalence_class;

/// Run every strict check over `file` against `config`, in the original's order.
pub fn validate(file: &mut UploadedFile, config: &UploadConfig) {
    check_file_size_allowed(file, config);
    check_request_header_mime(file, config);
    check_signature_and_request_mime_match_file_extensions(file);
    check_file_signature(file, config);
    check_filename_length(file, config);
    check_filename_extensions(file, config);
    check_filename_for_null_byte_injections(file);
}

fn mime_in_whitelist(mime: &str, config: &UploadConfig) -> bool {
    config.whitelist.contains(mime)
}

fn check_file_size_allowed(file: &mut UploadedFile, config: &UploadConfig) {
    let ok = match config.file_size_limit {
        Some(limit) => file.declared.size / 1000 <= limit,
        None => true,
    };
    file.validation.file_size_ok = ok;
    if !ok {
        file.mark_blocked();
        log::warn!("[validate] {} - File size is too big.", file.current_name);
    }
}

fn check_request_header_mime(file: &mut UploadedFile, config: &UploadConfig) {
    let ok = mime_in_whitelist(&file.declared.content_type, config);
    file.validation.request_whitelist_ok = ok;
    if !ok {
        file.mark_blocked();
        log::warn!("[validate] {} - Content-Type not whitelisted", file.current_name);
    }
}

fn check_signature_and_request_mime_match_file_extensions(file: &mut UploadedFile) {
    let mut all_match = true;

    for extension in file.detection.extensions.clone() {
        let extension_mime = guess_from_extension(&extension).unwrap_or_default();

        let mut possible: Vec<&str> = vec![extension_mime];
        let class = equivalence_class(extension_mime);
        if !class.is_empty() {
            possible.extend(class);
        }

        let matches = possible.contains(&file.declared.content_type.as_str())
            && possible.contains(&file.detection.signature_mime.as_str());

        all_match &= matches;
    }

    file.validation.matching_extension_signature_request_ok = all_match;
    file.attacks.mime_manipulation = !all_match;

    if !all_match {
        file.mark_blocked();
        log::warn!("[validate] {} - Extension MIME does not match", file.current_name);
    }
}

fn check_file_signature(file: &mut UploadedFile, config: &UploadConfig) {
    let ok = mime_in_whitelist(&file.detection.signature_mime, config);
    file.validation.signature_whitelist_ok = ok;
    if !ok {
        file.mark_blocked();
        log::warn!("[validate] {} - Signature not whitelisted", file.current_name);
    }
}

fn check_filename_length(file: &mut UploadedFile, config: &UploadConfig) {
    let ok = match config.filename_length_limit {
        Some(limit) => file.current_name.len() <= limit,
        None => true,
    };
    file.validation.filename_length_ok = ok;
    if !ok {
        file.mark_blocked();
        log::warn!("[validate] {} - Filename length too long", file.current_name);
    }
}

fn check_filename_extensions(file: &mut UploadedFile, config: &UploadConfig) {
    let all_whitelisted = file
        .detection
        .extensions
        .clone()
        .iter()
        .all(|ext| mime_in_whitelist(guess_from_extension(ext).unwrap_or_default(), config));

    file.validation.extensions_whitelist_ok = all_whitelisted;
    if !all_whitelisted {
        file.mark_blocked();
        log::warn!("[validate] {} - Extension not whitelisted", file.current_name);
    }

    // TODO: detect alternate media file extensions such as .php5
}

fn check_filename_for_null_byte_injections(file: &mut UploadedFile) {
    let null_byte_found = file
        .detection
        .filename_splits
        .iter()
        .any(|split| split.contains("0x00") || split.contains("%00") || split.contains('\0'));

    file.attacks.null_byte_injection = null_byte_found;
    if null_byte_found {
        file.mark_blocked();
        log::warn!("[validate] {} - Null byte injection found", file.current_name);
    }
}
