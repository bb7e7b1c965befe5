//! The explicit, non-thread-local carrier for request-wide inspection state.
//!
//! The original smuggles `block_upload`/`upload_errmsg`/`middleware_timers`
//! onto the request object via dynamic attribute injection and thread-locals.
//! Here both live on one struct the pipeline driver owns and the caller
//! threads alongside the request explicitly.

use std::time::{Duration, Instant};

/// Request-wide accumulator updated once per inspected file. `block_upload`
/// is sticky: once true it never reverts. `upload_errmsg` is concatenated in
/// file-processing order.
#[derive(Debug, Clone, Default)]
pub struct InspectionContext {
    block_upload: bool,
    upload_errmsg: String,
}

impl InspectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_upload(&self) -> bool {
        self.block_upload
    }

    pub fn upload_errmsg(&self) -> &str {
        &self.upload_errmsg
    }

    /// Latch the block flag; never clears it once set.
    pub fn block(&mut self) {
        self.block_upload = true;
    }

    /// Append one normalized reason fragment to the running message.
    pub fn push_errmsg(&mut self, fragment: &str) {
        self.upload_errmsg.push_str(fragment);
    }
}

/// Per-stage wall-clock timing, analogous to the original's `middleware_timers`
/// list of timestamps. `pipeline::inspect` marks one of these after every
/// stage when a caller passes one in. Used for diagnostics, never for
/// pipeline decisions.
#[derive(Debug, Default)]
pub struct StageTimings {
    marks: Vec<(&'static str, Instant)>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    pub fn mark(&mut self, stage: &'static str) {
        self.marks.push((stage, now_placeholder()));
    }

    /// Elapsed wall-clock time between two marked stages, if both were recorded.
    pub fn elapsed_between(&self, from: &str, to: &str) -> Option<Duration> {
        let start = self.marks.iter().find(|(name, _)| *name == from)?.1;
        let end = self.marks.iter().find(|(name, _)| *name == to)?.1;
        end.checked_duration_since(start)
    }
}

/// `Instant::now()` wrapped behind a named function so call sites read like
/// the intent ("mark the current time for this stage") rather than a bare
/// stdlib call buried in loop bodies.
fn now_placeholder() -> Instant {
    Instant::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_upload_is_sticky() {
        let mut ctx = InspectionContext::new();
        assert!(!ctx.block_upload());
        ctx.block();
        assert!(ctx.block_upload());
        ctx.block();
        assert!(ctx.block_upload());
    }

    #[test]
    fn errmsg_accumulates_in_order() {
        let mut ctx = InspectionContext::new();
        ctx.push_errmsg("first;");
        ctx.push_errmsg("second;");
        assert_eq!(ctx.upload_errmsg(), "first;second;");
    }

    #[test]
    fn timings_record_marks_in_order() {
        let mut timings = StageTimings::new();
        timings.mark("ingest");
        timings.mark("detect");
        assert!(timings.elapsed_between("ingest", "detect").is_some());
        assert!(timings.elapsed_between("ingest", "missing").is_none());
    }
}
