//! Top-level orchestration: the fixed stage order from Ingest through
//! Sanitizer, for one uploaded file against one resolved configuration.

use anyhow::Result;

use crate::config::UploadConfig;
use crate::context::{InspectionContext, StageTimings};
use crate::detect::detect;
use crate::evaluate::evaluate;
use crate::framework::FrameworkFile;
use crate::guess::guess_mime_type;
use crate::ingest::ingest;
use crate::mime_types::known_mime_types;
use crate::model::UploadedFile;
use crate::sanitize::sanitize;
use crate::validate::{strict, validate_advisory, QuicksandEngine};

/// Inspect one uploaded part end to end: Ingest → Detector → strict Validator
/// → (if unblocked) MIME Guesser → advisory Validator → Evaluator → (if
/// unblocked) Sanitizer. Updates `ctx` with the request-wide verdict.
///
/// The Guesser runs ahead of the advisory Validator, not after it: the
/// image-integrity check only fires when `guessed_mime` starts with
/// `image/`, so `guessed_mime` must already be populated by the time
/// `validate_advisory` reaches it.
///
/// `timings`, when given, records a mark after every stage — diagnostics
/// only, per §5; nothing here ever reads them back to make a decision.
pub fn inspect(
    framework_file: &mut dyn FrameworkFile,
    config: &UploadConfig,
    ctx: &mut InspectionContext,
    quicksand_engine: Option<&dyn QuicksandEngine>,
    mut timings: Option<&mut StageTimings>,
) -> Result<UploadedFile> {
    let mut file = ingest(framework_file, known_mime_types())?;
    mark(&mut timings, "ingest");

    detect(&mut file);
    mark(&mut timings, "detect");

    strict::validate(&mut file, config);
    mark(&mut timings, "validate_strict");

    if !file.blocked() {
        guess_mime_type(&mut file);
    }
    mark(&mut timings, "guess");

    validate_advisory(&mut file, config, quicksand_engine);
    mark(&mut timings, "validate_advisory");

    evaluate(&mut file, ctx);
    mark(&mut timings, "evaluate");

    if config.sanitization {
        sanitize(&mut file, config);
    }
    mark(&mut timings, "sanitize");

    Ok(file)
}

fn mark(timings: &mut Option<&mut StageTimings>, stage: &'static str) {
    if let Some(t) = timings.as_deref_mut() {
        t.mark(stage);
    }
}
