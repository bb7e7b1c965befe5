//! Definitions for the upload inspection configuration file.
//!
//! Loading follows a `verifiers.toml`-style idiom: a `validator`-annotated
//! raw schema deserialized from TOML, checked for referential integrity, then
//! converted into the immutable runtime config the pipeline actually consumes.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::whitelist::{self, WhitelistName};

/// The compiled-in global defaults, embedded the same way a default
/// `verifiers.toml` is embedded, via `include_str!`.
pub const DEFAULT_CONFIG: &str = include_str!("../upload_config.toml");

/// Raw, on-disk shape of one `[global]` or `[routes.*]` table. All fields are
/// optional so a route overlay can leave most of them unset and inherit from
/// `[global]`.
#[derive(Debug, Deserialize, Validate)]
pub struct UploadConfigRaw {
    #[serde(default)]
    pub quicksand: Option<bool>,
    #[serde(default)]
    pub clamav: Option<bool>,
    #[serde(default)]
    pub file_size_limit: Option<u64>,
    #[serde(default)]
    pub filename_length_limit: Option<usize>,
    #[serde(default)]
    pub whitelist_name: Option<WhitelistName>,
    #[serde(default)]
    pub whitelist: Option<Vec<String>>,
    #[serde(default)]
    pub sanitization: Option<bool>,
    #[serde(default)]
    pub keep_original_filename: Option<bool>,
    #[serde(default)]
    #[validate(length(min = 1, message = "'yara_file_location' must not be an empty string if present"))]
    pub yara_file_location: Option<String>,
}

/// Root of the configuration schema: a mandatory `[global]` table plus any
/// number of named `[routes.*]` overlay tables.
#[derive(Debug, Deserialize, Validate)]
pub struct RootRaw {
    #[validate]
    pub global: UploadConfigRaw,
    #[serde(default)]
    pub routes: HashMap<String, UploadConfigRaw>,
}

/// The resolved, immutable configuration the pipeline consults for one request.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub quicksand: bool,
    pub clamav: bool,
    pub file_size_limit: Option<u64>,
    pub filename_length_limit: Option<usize>,
    pub whitelist_name: WhitelistName,
    pub whitelist: BTreeSet<String>,
    pub sanitization: bool,
    pub keep_original_filename: bool,
    pub yara_file_location: Option<PathBuf>,
}

impl Default for UploadConfig {
    /// Mirrors the original's `DEFAULT_UPLOAD_CONFIG`: scanners off, no size or
    /// name limits, the restrictive whitelist, sanitization on, filenames randomized.
    fn default() -> Self {
        Self {
            quicksand: false,
            clamav: false,
            file_size_limit: None,
            filename_length_limit: None,
            whitelist_name: WhitelistName::Restrictive,
            whitelist: whitelist::resolve(WhitelistName::Restrictive),
            sanitization: true,
            keep_original_filename: false,
            yara_file_location: None,
        }
    }
}

/// Overlay `raw` on top of `base`, inheriting unset fields, then resolve the
/// named whitelist if it isn't `CUSTOM` (§4.8: the overlay can't smuggle a
/// custom whitelist in under a named whitelist's identity).
fn resolve(base: &UploadConfig, raw: &UploadConfigRaw) -> UploadConfig {
    let whitelist_name = raw.whitelist_name.unwrap_or(base.whitelist_name);
    let whitelist = if whitelist_name == WhitelistName::Custom {
        raw.whitelist
            .clone()
            .map(|v| v.into_iter().collect())
            .unwrap_or_else(|| base.whitelist.clone())
    } else {
        whitelist::resolve(whitelist_name)
    };

    UploadConfig {
        quicksand: raw.quicksand.unwrap_or(base.quicksand),
        clamav: raw.clamav.unwrap_or(base.clamav),
        file_size_limit: raw.file_size_limit.or(base.file_size_limit),
        filename_length_limit: raw.filename_length_limit.or(base.filename_length_limit),
        whitelist_name,
        whitelist,
        sanitization: raw.sanitization.unwrap_or(base.sanitization),
        keep_original_filename: raw.keep_original_filename.unwrap_or(base.keep_original_filename),
        yara_file_location: raw
            .yara_file_location
            .clone()
            .map(PathBuf::from)
            .or_else(|| base.yara_file_location.clone()),
    }
}

/// Reformat `validator` crate errors into a human-readable summary.
pub fn format_validation_errors(errors: ValidationErrors) -> anyhow::Error {
    use validator::ValidationErrorsKind::Field;

    let mut out_str = String::with_capacity(80);
    let _ = writeln!(&mut out_str, "Errors found in the configuration file:");
    for (section, sec_errors) in errors.into_errors() {
        #[allow(clippy::wildcard_enum_match_arm)]
        match sec_errors {
            Field(x) => {
                for err in x {
                    let _ = writeln!(
                        &mut out_str,
                        "  {} field: {}",
                        section,
                        err.message.as_ref().unwrap_or(&err.code)
                    );
                }
            }
            x => {
                let _ = writeln!(&mut out_str, "{:#?}", x);
            }
        }
    }
    anyhow::anyhow!(out_str)
}

/// The global config plus one resolved overlay per named route.
pub struct ResolvedConfig {
    pub global: UploadConfig,
    pub routes: HashMap<String, UploadConfig>,
}

/// Parse, validate, and resolve a configuration document.
pub fn parse(toml_str: &str) -> Result<ResolvedConfig> {
    let parsed: RootRaw =
        toml_edit::de::from_str(toml_str).with_context(|| "Error parsing configuration file")?;
    parsed.validate().map_err(format_validation_errors)?;

    let base = UploadConfig::default();
    let global = resolve(&base, &parsed.global);

    let routes = parsed
        .routes
        .iter()
        .map(|(name, raw)| (name.clone(), resolve(&global, raw)))
        .collect();

    Ok(ResolvedConfig { global, routes })
}

/// Parse the compiled-in defaults. Panics only if the embedded document itself
/// is malformed, which would be a build-time bug, not a runtime condition.
pub fn load_default() -> UploadConfig {
    parse(DEFAULT_CONFIG)
        .expect("embedded default upload_config.toml must parse and validate")
        .global
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_restrictive() {
        let cfg = UploadConfig::default();
        assert_eq!(cfg.whitelist_name, WhitelistName::Restrictive);
        assert!(cfg.whitelist.contains("application/pdf"));
        assert!(!cfg.quicksand);
        assert!(!cfg.clamav);
    }

    #[test]
    fn overlay_inherits_unset_fields() {
        let base = UploadConfig::default();
        let raw = UploadConfigRaw {
            quicksand: Some(true),
            clamav: None,
            file_size_limit: None,
            filename_length_limit: None,
            whitelist_name: None,
            whitelist: None,
            sanitization: None,
            keep_original_filename: None,
            yara_file_location: None,
        };
        let resolved = resolve(&base, &raw);
        assert!(resolved.quicksand);
        assert_eq!(resolved.clamav, base.clamav);
        assert_eq!(resolved.whitelist_name, base.whitelist_name);
    }

    #[test]
    fn custom_whitelist_name_keeps_explicit_set() {
        let base = UploadConfig::default();
        let raw = UploadConfigRaw {
            quicksand: None,
            clamav: None,
            file_size_limit: None,
            filename_length_limit: None,
            whitelist_name: Some(WhitelistName::Custom),
            whitelist: Some(vec!["text/plain".to_string()]),
            sanitization: None,
            keep_original_filename: None,
            yara_file_location: None,
        };
        let resolved = resolve(&base, &raw);
        assert_eq!(resolved.whitelist, ["text/plain".to_string()].into());
    }

    #[test]
    fn named_whitelist_name_ignores_supplied_custom_set() {
        let base = UploadConfig::default();
        let raw = UploadConfigRaw {
            quicksand: None,
            clamav: None,
            file_size_limit: None,
            filename_length_limit: None,
            whitelist_name: Some(WhitelistName::All),
            whitelist: Some(vec!["text/plain".to_string()]),
            sanitization: None,
            keep_original_filename: None,
            yara_file_location: None,
        };
        let resolved = resolve(&base, &raw);
        assert_eq!(resolved.whitelist, whitelist::resolve(WhitelistName::All));
    }

    #[test]
    fn embedded_default_config_parses() {
        let resolved = parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(resolved.global.whitelist_name, WhitelistName::Restrictive);
    }
}
