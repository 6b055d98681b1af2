//! # Validate Subcommand
//!
//! Defaults and validates each manifest, printing `<file>: OK` or the
//! aggregate error. Fails when any manifest is invalid.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use svcint_core::{FieldPath, NamespaceConfig};
use svcint_intentions::{load_manifest, ServiceIntentions};

use crate::config::Settings;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Manifests to validate (`.yaml`, `.yml` or `.json`).
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,
}

/// Load a manifest and apply namespace defaulting.
pub fn load_defaulted(path: &Path, namespaces: &NamespaceConfig) -> anyhow::Result<ServiceIntentions> {
    let mut si = load_manifest(path).with_context(|| format!("loading {}", path.display()))?;
    si.default_namespaces(namespaces);
    Ok(si)
}

/// Run validation. Returns whether every manifest passed.
pub fn run_validate(args: &ValidateArgs, settings: &Settings, out: &mut impl Write) -> anyhow::Result<bool> {
    let mut all_ok = true;
    for path in &args.manifests {
        let si = load_defaulted(path, &settings.namespaces)?;
        match si.validate(settings.namespaces.enabled) {
            Ok(()) => {
                log_rules(&si);
                writeln!(out, "{}: OK", path.display())?;
            }
            Err(e) => {
                tracing::debug!(file = %path.display(), violations = e.errors.len(), "manifest rejected");
                writeln!(out, "{}: {e}", path.display())?;
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

fn log_rules(si: &ServiceIntentions) {
    let sources = FieldPath::new("spec").child("sources");
    for (i, source) in si.spec.sources.iter().enumerate() {
        if let Ok(Some(rule)) = source.rule(&sources.index(i)) {
            tracing::debug!(
                resource = %si.metadata,
                source = %source.name,
                rule = %rule,
                "source rule"
            );
        }
    }
}
