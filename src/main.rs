//! CLI harness: walk a set of paths and run the upload inspection pipeline
//! over each file found, reporting an ALLOW/BLOCK verdict per file.

// This source file provided by
// [rust-cli-boilerplate](https://github.com/ssokolow/rust-cli-boilerplate)
//
// Copyright 2017-2020, Stephan Sokolow

// Make rustc's built-in lints more strict and set clippy into a whitelist-based configuration so
// we see new lints as they get written, then opt out of ones we have seen and don't want
#![warn(warnings, rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::restriction)]
#![allow(clippy::float_arithmetic, clippy::implicit_return, clippy::needless_return)]
#![allow(clippy::blanket_clippy_restriction_lints)]
#![forbid(unsafe_code)] // Enforce my policy of only allowing it in my own code as a last resort

// 3rd-party imports
use anyhow::{Context, Result};
use clap::Parser;

// Local imports
mod app;
mod helpers;
mod validators;

/// Boilerplate to parse command-line arguments, set up logging, and handle bubbled-up `Error`s.
///
/// See `app::main` for the application-specific logic.
fn main() -> Result<()> {
    // Parse command-line arguments (exiting on parse error, --version, or --help)
    let opts = app::CliOpts::parse();

    stderrlog::new()
        .module(module_path!())
        .module("upload_inspector")
        .verbosity(opts.verbose.log_level_filter())
        .timestamp(opts.timestamp.unwrap_or(stderrlog::Timestamp::Off))
        .init()
        .context("Failed to initialize logging output")?;

    app::main(opts)
}


// vim: set sw=4 sts=4 expandtab :
