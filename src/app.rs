/*! Application-specific logic lives here */

// Parts Copyright 2017-2020, Stephan Sokolow

// Standard library imports
use std::fs;
use std::path::PathBuf;

// 3rd-party crate imports
use anyhow::{Context, Result};
use clap::Parser;
use ignore::WalkBuilder;

use log::{debug, warn};

// Local imports
use crate::helpers::HELP_TEMPLATE;
use upload_inspector::config::{self, UploadConfig};
use upload_inspector::context::InspectionContext;
use upload_inspector::framework::{rebuild, MemoryFile};
use upload_inspector::mime_types::guess_from_extension;
use upload_inspector::pipeline::inspect;

/// Command-line argument schema
#[derive(Parser, Debug)]
#[clap(template = HELP_TEMPLATE,
       about = "Walk a set of paths and run each file through the upload inspection pipeline.",
       version,
       long_about = None)]
pub struct CliOpts {
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Display timestamps on log messages (sec, ms, ns, none)
    #[clap(short, long, value_name = "resolution")]
    pub timestamp: Option<stderrlog::Timestamp>,

    /// Path to a TOML configuration file to use instead of the embedded default
    #[clap(long, value_parser, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Named `[routes.*]` table from the configuration file to resolve against,
    /// instead of `[global]`
    #[clap(long, value_name = "name")]
    pub route: Option<String>,

    /// File(s) or directory/directories to walk and inspect
    ///
    /// **TODO:** Restore use of the `path_input_file_or_dir` validator
    #[clap(value_parser)]
    inpath: Vec<PathBuf>,
}

/// Read one path from disk into the in-memory adapter the pipeline expects,
/// guessing a declared MIME the way a multipart parser would: from the
/// filename extension, falling back to the generic octet-stream type.
fn load(path: &std::path::Path) -> Result<MemoryFile> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let extension = name.rsplit('.').next().unwrap_or_default().to_lowercase();
    let declared_mime = guess_from_extension(&extension).unwrap_or("application/octet-stream");
    Ok(MemoryFile::new(name, content, declared_mime))
}

/// The actual `main()`
pub fn main(opts: CliOpts) -> Result<()> {
    let resolved = match &opts.config {
        Some(path) => {
            let toml_str = fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
            config::parse(&toml_str)?
        }
        None => config::parse(config::DEFAULT_CONFIG)?,
    };

    let route_config: &UploadConfig = match &opts.route {
        Some(name) => resolved
            .routes
            .get(name)
            .with_context(|| format!("No [routes.{}] table in the configuration", name))?,
        None => &resolved.global,
    };

    let mut ctx = InspectionContext::new();
    let mut any_blocked = false;
    let mut any_inspected = false;

    let mut builder = match opts.inpath.split_first() {
        Some((first, rest)) => {
            let mut builder = WalkBuilder::new(first);
            builder.standard_filters(false);
            for path in rest {
                builder.add(path);
            }
            builder
        }
        None => {
            warn!("No input paths given; nothing to inspect");
            return Ok(());
        }
    };

    for result in builder.build() {
        let entry = result.context("Failed to walk input path")?;
        if entry.file_type().is_some_and(|t| !t.is_file()) {
            continue;
        }
        let path = entry.path();
        debug!("Inspecting {}", path.display());

        let mut mem = load(path)?;
        let file = inspect(&mut mem, route_config, &mut ctx, None, None)?;
        any_inspected = true;

        if file.blocked() {
            any_blocked = true;
            println!("BLOCK {}: {}", path.display(), file.block_reasons().join(" "));
        } else {
            let rebuilt = rebuild(&file);
            println!("ALLOW {} -> {}", path.display(), rebuilt.name);
        }
    }

    if !any_inspected {
        warn!("No files found under the given input paths");
    }

    if any_blocked {
        std::process::exit(1);
    }

    Ok(())
}
