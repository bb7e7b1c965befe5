//! YARA rule matching, grounded on the original's `perform_yara_matching` +
//! `check_yara_rules`.
//!
//! Compiled in only behind the `yara-engine` feature, since it links against
//! libyara. Without the feature (or if the rule directory is missing/unreadable),
//! this stage is a documented no-op that leaves `yara_rules_ok = true` — an
//! absent scanner must never block an upload (§7). Compiled rulesets are
//! cached per rule directory so repeat inspections skip recompilation.

use std::path::Path;

use crate::model::{UploadedFile, YaraMatch};

#[cfg(feature = "yara-engine")]
mod engine {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use lazy_static::lazy_static;

    use crate::model::YaraMatch;

    lazy_static! {
        /// Compiled rulesets are immutable once built and reused across
        /// inspections keyed by the directory they were compiled from (§5),
        /// cached the same way a one-time-built handler registry would be.
        static ref RULESET_CACHE: Mutex<HashMap<PathBuf, Arc<yara::Rules>>> =
            Mutex::new(HashMap::new());
    }

    fn compile(dir: &Path) -> anyhow::Result<yara::Rules> {
        let mut compiler = yara::Compiler::new()?;

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_rule_file = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("yar") || ext.eq_ignore_ascii_case("yara"))
                .unwrap_or(false);
            if !is_rule_file {
                continue;
            }

            let namespace = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default()
                .to_string();

            compiler = compiler.add_rules_file_with_namespace(&path, &namespace)?;
        }

        Ok(compiler.compile_rules()?)
    }

    fn cached_ruleset(dir: &Path) -> anyhow::Result<Arc<yara::Rules>> {
        let mut cache = RULESET_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(rules) = cache.get(dir) {
            return Ok(Arc::clone(rules));
        }
        let rules = Arc::new(compile(dir)?);
        cache.insert(dir.to_path_buf(), Arc::clone(&rules));
        Ok(rules)
    }

    /// Compile (or reuse the cached compile of) every `.yar`/`.yara` file
    /// directly under `dir` into one ruleset, namespaced by filename stem,
    /// and scan `content`.
    pub fn scan(dir: &Path, content: &[u8]) -> anyhow::Result<Vec<YaraMatch>> {
        let rules = cached_ruleset(dir)?;
        let matches = rules.scan_mem(content, 60)?;

        Ok(matches
            .into_iter()
            .map(|m| YaraMatch {
                rule: m.identifier.to_string(),
            })
            .collect())
    }
}

/// Runs only when the caller has already confirmed `!file.blocked()` (§4.4).
pub fn validate(file: &mut UploadedFile, yara_file_location: Option<&Path>) {
    let Some(dir) = yara_file_location else {
        log::info!("[validate:yara] Skipping YARA validation: no rule directory configured");
        return;
    };

    #[cfg(feature = "yara-engine")]
    {
        match engine::scan(dir, &file.content) {
            Ok(matches) => {
                file.validation.yara_rules_ok = matches.is_empty();
                if !matches.is_empty() {
                    file.mark_blocked();
                    for m in &matches {
                        log::warn!("[validate:yara] match: {}", m.rule);
                    }
                }
                file.detection.yara_matches = matches;
            }
            Err(e) => {
                log::error!("[validate:yara] Failed to compile or run rules: {}", e);
            }
        }
    }

    #[cfg(not(feature = "yara-engine"))]
    {
        let _ = dir;
        let _: Option<Vec<YaraMatch>> = None;
        log::info!(
            "[validate:yara] Skipping YARA validation as the yara-engine feature is not compiled in"
        );
    }
}
