//! # Settings
//!
//! Deployment settings shared by every subcommand: the namespace flags and
//! the datacenter written into provenance tags.
//!
//! Sources, lowest priority first: the YAML file named by `--config`, then
//! environment variables, then explicit flags. Clap merges the last two;
//! [`SettingsArgs::resolve`] lays the result over the file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Deserialize;

use svcint_core::NamespaceConfig;

/// Global settings flags.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// YAML settings file. Flags and environment variables override it.
    #[arg(long, global = true, env = "SVCINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Consul Enterprise namespaces are enabled.
    #[arg(long, global = true, env = "SVCINT_ENABLE_NAMESPACES")]
    pub enable_namespaces: bool,

    /// Namespace for destinations that do not name one.
    #[arg(long, global = true, env = "SVCINT_DESTINATION_NAMESPACE")]
    pub destination_namespace: Option<String>,

    /// Mirror the resource's namespace into the destination namespace.
    #[arg(long, global = true, env = "SVCINT_ENABLE_NS_MIRRORING")]
    pub enable_ns_mirroring: bool,

    /// Prefix for mirrored namespaces.
    #[arg(long, global = true, env = "SVCINT_NS_MIRRORING_PREFIX")]
    pub ns_mirroring_prefix: Option<String>,

    /// Datacenter recorded in the converted entry's provenance tags.
    #[arg(long, global = true, env = "SVCINT_DATACENTER")]
    pub datacenter: Option<String>,
}

/// Settings file contents.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FileSettings {
    pub namespaces: NamespaceConfig,
    pub datacenter: Option<String>,
}

impl FileSettings {
    /// Read a settings file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing settings file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Resolved settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub namespaces: NamespaceConfig,
    pub datacenter: Option<String>,
}

impl Settings {
    /// The datacenter, or an error naming how to set it.
    pub fn require_datacenter(&self) -> anyhow::Result<&str> {
        self.datacenter
            .as_deref()
            .filter(|dc| !dc.is_empty())
            .context("no datacenter set: pass --datacenter or set SVCINT_DATACENTER")
    }
}

impl SettingsArgs {
    /// Load the settings file, if any, and apply flags over it.
    pub fn resolve(&self) -> anyhow::Result<Settings> {
        let file = match &self.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Ok(self.apply(file))
    }

    /// Flags over file values. Boolean flags can only switch features on.
    pub fn apply(&self, file: FileSettings) -> Settings {
        let FileSettings {
            namespaces: mut ns,
            datacenter,
        } = file;
        ns.enabled |= self.enable_namespaces;
        ns.mirroring |= self.enable_ns_mirroring;
        if let Some(dest) = &self.destination_namespace {
            ns.destination_namespace = dest.clone();
        }
        if let Some(prefix) = &self.ns_mirroring_prefix {
            ns.mirroring_prefix = prefix.clone();
        }
        Settings {
            namespaces: ns,
            datacenter: self.datacenter.clone().or(datacenter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        settings: SettingsArgs,
    }

    const FILE: &str = r#"
namespaces:
  enabled: true
  destinationNamespace: from-file
  mirroring: false
  mirroringPrefix: file-
datacenter: dc-file
"#;

    #[test]
    fn test_parse_file() {
        let file = FileSettings::parse(FILE).unwrap();
        assert!(file.namespaces.enabled);
        assert_eq!(file.namespaces.destination_namespace, "from-file");
        assert_eq!(file.datacenter.as_deref(), Some("dc-file"));
    }

    #[test]
    fn test_unknown_file_key_rejected() {
        assert!(FileSettings::parse("datacentre: dc1\n").is_err());
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = SettingsArgs::default().apply(FileSettings::default());
        assert_eq!(settings.namespaces, NamespaceConfig::disabled());
        assert!(settings.datacenter.is_none());
        assert!(settings.require_datacenter().is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let cli = TestCli::try_parse_from([
            "svcint",
            "--destination-namespace",
            "from-flag",
            "--enable-ns-mirroring",
            "--datacenter",
            "dc-flag",
        ])
        .unwrap();
        let settings = cli.settings.apply(FileSettings::parse(FILE).unwrap());
        assert!(settings.namespaces.enabled);
        assert!(settings.namespaces.mirroring);
        assert_eq!(settings.namespaces.destination_namespace, "from-flag");
        assert_eq!(settings.namespaces.mirroring_prefix, "file-");
        assert_eq!(settings.require_datacenter().unwrap(), "dc-flag");
    }

    #[test]
    fn test_file_fills_unset_flags() {
        let cli = TestCli::try_parse_from(["svcint"]).unwrap();
        let settings = cli.settings.apply(FileSettings::parse(FILE).unwrap());
        assert_eq!(settings.namespaces.destination_namespace, "from-file");
        assert_eq!(settings.require_datacenter().unwrap(), "dc-file");
    }

    #[test]
    fn test_missing_settings_file() {
        let args = SettingsArgs {
            config: Some(PathBuf::from("/nonexistent/svcint.yaml")),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(format!("{err:#}").contains("reading settings file"));
    }
}
