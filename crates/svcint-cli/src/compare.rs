//! # Compare Subcommand
//!
//! Checks a manifest against a stored config entry and reports whether a
//! write is needed.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use svcint_consul::ConfigEntry;

use crate::config::Settings;
use crate::validate::load_defaulted;

/// Arguments for the compare subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Manifest describing the desired policy.
    pub manifest: PathBuf,

    /// Stored config entry, as JSON returned by the store.
    #[arg(long)]
    pub stored: PathBuf,
}

/// Run the comparison. Returns whether the stored entry is in sync.
pub fn run_compare(args: &CompareArgs, settings: &Settings, out: &mut impl Write) -> anyhow::Result<bool> {
    let si = load_defaulted(&args.manifest, &settings.namespaces)?;
    let body = std::fs::read_to_string(&args.stored)
        .with_context(|| format!("reading stored entry {}", args.stored.display()))?;
    let stored = ConfigEntry::from_json(&body)
        .with_context(|| format!("parsing stored entry {}", args.stored.display()))?;

    let in_sync = si.matches_consul(&stored);
    writeln!(out, "{}", if in_sync { "in sync" } else { "write needed" })?;
    Ok(in_sync)
}
