//! The inspection subject and its nested result records.
//!
//! Mirrors the shape of the original `File` dataclass family: one flat, mutable
//! struct per upload, filled in by each pipeline stage in turn. See the
//! redesign notes for why this stays a mutable record instead of a
//! stage-typed wrapper chain.

use std::collections::BTreeMap;

/// Metadata the HTTP framework reported for the part, taken verbatim at ingest.
#[derive(Debug, Clone)]
pub struct Declared {
    pub content_type: String,
    pub charset: String,
    pub content_type_extra: BTreeMap<String, String>,
    pub size: u64,
}

/// Hashes computed once over the ingested content buffer.
///
/// Only `sha256` is load-bearing; the rest exist for log correlation.
#[derive(Debug, Clone)]
pub struct ContentHashes {
    pub sha256: String,
    pub md5: String,
    pub sha1: String,
    pub sha512: String,
}

/// Output of the Detector stage.
#[derive(Debug, Clone, Default)]
pub struct DetectionResults {
    pub filename_splits: Vec<String>,
    pub extensions: Vec<String>,
    pub signature_mime: String,
    pub guessed_mime: String,
    pub yara_matches: Vec<YaraMatch>,
}

#[derive(Debug, Clone)]
pub struct YaraMatch {
    pub rule: String,
}

/// Every boolean/detail the Validator stages write.
#[derive(Debug, Clone)]
pub struct ValidationResults {
    pub file_size_ok: bool,
    pub matching_extension_signature_request_ok: bool,
    pub filename_length_ok: bool,
    pub extensions_whitelist_ok: bool,
    pub request_whitelist_ok: bool,
    pub signature_whitelist_ok: bool,

    pub yara_rules_ok: bool,
    pub quicksand_result_ok: bool,
    pub quicksand_result_detail: String,
    pub clamav_result_ok: bool,
    pub clamav_result_detail: String,

    pub file_integrity_ok: bool,
    pub file_integrity_check_done: bool,

    pub malicious: bool,

    pub total_points_overall: u32,
    pub guessing_scores: BTreeMap<String, u32>,
}

impl ValidationResults {
    /// One zeroed entry per known MIME type, per the construction invariant.
    pub fn new(known_mimes: impl IntoIterator<Item = &'static str>) -> Self {
        let guessing_scores = known_mimes.into_iter().map(|m| (m.to_string(), 0)).collect();
        Self {
            file_size_ok: true,
            matching_extension_signature_request_ok: true,
            filename_length_ok: true,
            extensions_whitelist_ok: true,
            request_whitelist_ok: true,
            signature_whitelist_ok: true,
            yara_rules_ok: true,
            quicksand_result_ok: true,
            quicksand_result_detail: String::new(),
            clamav_result_ok: true,
            clamav_result_detail: String::new(),
            file_integrity_ok: true,
            file_integrity_check_done: false,
            malicious: false,
            total_points_overall: 0,
            guessing_scores,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PossibleAttacks {
    pub mime_manipulation: bool,
    pub null_byte_injection: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SanitizationResults {
    pub created_random_filename_with_guessed_extension: bool,
    pub disarmed_pdf: bool,
}

/// The inspection subject. Constructed once per uploaded part by [`crate::ingest::ingest`]
/// and mutated in place by every later stage.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub current_name: String,
    pub content: Vec<u8>,
    pub declared: Declared,
    pub hashes: ContentHashes,
    pub detection: DetectionResults,
    pub validation: ValidationResults,
    pub attacks: PossibleAttacks,
    pub sanitization: SanitizationResults,
    blocked: bool,
    block_reasons: Vec<String>,
}

impl UploadedFile {
    pub fn new(
        name: String,
        content: Vec<u8>,
        declared: Declared,
        hashes: ContentHashes,
        known_mimes: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            original_name: name.clone(),
            current_name: name,
            content,
            declared,
            hashes,
            detection: DetectionResults::default(),
            validation: ValidationResults::new(known_mimes),
            attacks: PossibleAttacks::default(),
            sanitization: SanitizationResults::default(),
            blocked: false,
            block_reasons: Vec::new(),
        }
    }

    pub fn blocked(&self) -> bool {
        self.blocked
    }

    pub fn block_reasons(&self) -> &[String] {
        &self.block_reasons
    }

    /// Latch `blocked` without recording a reason tag. Used by the Validator
    /// stages, which only gate later stages (advisory validators, the MIME
    /// guesser) on the bare flag; the Evaluator is solely responsible for
    /// turning a failing check into a reason tag (§4.6).
    pub fn mark_blocked(&mut self) {
        self.blocked = true;
    }

    /// Append a reason tag and latch `blocked`. Reasons are never removed.
    /// Once the Evaluator has run over every check, `blocked` is true iff
    /// this has been called at least once (invariant 1); during the
    /// Validator stages `blocked` may already be true via [`Self::mark_blocked`]
    /// while `block_reasons` is still empty.
    pub fn block(&mut self, reason: impl Into<String>) {
        self.blocked = true;
        self.block_reasons.push(reason.into());
    }
}
