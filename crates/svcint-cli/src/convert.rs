//! # Convert Subcommand
//!
//! Prints the Consul `service-intentions` entry a manifest converts to.
//! The entry goes to stdout as JSON; its fingerprint goes to stderr.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::validate::load_defaulted;

/// Arguments for the convert subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Manifest to convert.
    pub manifest: PathBuf,
}

/// Run conversion. Invalid manifests are errors.
pub fn run_convert(
    args: &ConvertArgs,
    settings: &Settings,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    let datacenter = settings.require_datacenter()?;
    let si = load_defaulted(&args.manifest, &settings.namespaces)?;
    si.validate(settings.namespaces.enabled)?;

    let entry = si.to_consul(datacenter);
    tracing::info!(
        resource = %si.metadata,
        kind = entry.kind(),
        name = entry.name(),
        sources = si.spec.sources.len(),
        "converted"
    );
    writeln!(out, "{}", entry.to_json_pretty()?)?;
    writeln!(err, "fingerprint: {}", entry.fingerprint()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcint_consul::ConfigEntry;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../svcint-intentions/tests/fixtures")
            .join(name)
    }

    fn settings(dc: &str) -> Settings {
        Settings {
            datacenter: Some(dc.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_prints_entry_and_fingerprint() {
        let args = ConvertArgs {
            manifest: fixture("valid-l4.yaml"),
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_convert(&args, &settings("dc1"), &mut out, &mut err).unwrap();

        let entry = ConfigEntry::from_json(std::str::from_utf8(&out).unwrap()).unwrap();
        assert_eq!(entry.name(), "web");
        assert_eq!(entry.datacenter(), "dc1");
        assert_eq!(entry.as_service_intentions().unwrap().precedences(), vec![1, 0]);

        let err = String::from_utf8(err).unwrap();
        assert_eq!(err.trim(), format!("fingerprint: {}", entry.fingerprint().unwrap()));
    }

    #[test]
    fn test_convert_requires_datacenter() {
        let args = ConvertArgs {
            manifest: fixture("valid-l4.yaml"),
        };
        let err = run_convert(&args, &Settings::default(), &mut Vec::new(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("datacenter"));
    }

    #[test]
    fn test_convert_rejects_invalid_manifest() {
        let args = ConvertArgs {
            manifest: fixture("invalid-mixed.yaml"),
        };
        let mut out = Vec::new();
        let err = run_convert(&args, &settings("dc1"), &mut out, &mut Vec::new()).unwrap_err();
        assert!(err.downcast_ref::<svcint_core::InvalidResource>().is_some());
        assert!(out.is_empty());
    }
}
