//! # Manifest Loading
//!
//! Reads a `ServiceIntentions` manifest from disk. The format follows the
//! file extension: `.yaml`/`.yml` are YAML, anything else is JSON.

use std::path::Path;

use svcint_core::SvcintError;

use crate::resource::KIND;
use crate::types::ServiceIntentions;

/// Manifest encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "yaml" | "yml" => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load a manifest from `path`.
///
/// # Errors
///
/// Returns [`SvcintError::DocumentLoad`] when the file cannot be read,
/// does not parse, or declares a kind other than `ServiceIntentions`.
pub fn load_manifest(path: &Path) -> Result<ServiceIntentions, SvcintError> {
    let content = std::fs::read_to_string(path).map_err(|e| load_error(path, format!("cannot read file: {e}")))?;
    parse_manifest(&content, ManifestFormat::from_path(path)).map_err(|reason| load_error(path, reason))
}

/// Parse manifest text in the given format. The error is a human-readable
/// reason.
pub fn parse_manifest(content: &str, format: ManifestFormat) -> Result<ServiceIntentions, String> {
    let resource: ServiceIntentions = match format {
        ManifestFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?
        }
        ManifestFormat::Json => {
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?
        }
    };
    if resource.kind != KIND {
        return Err(format!("expected kind {KIND:?}, found {:?}", resource.kind));
    }
    Ok(resource)
}

fn load_error(path: &Path, reason: String) -> SvcintError {
    SvcintError::DocumentLoad {
        path: path.display().to_string(),
        reason,
    }
}
