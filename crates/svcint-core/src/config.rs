//! # Namespace Configuration
//!
//! The environment flags that gate namespace support and drive destination
//! namespace defaulting. These come from the deployment (command-line flags,
//! environment variables or a config file), never from the user's policy.

use serde::{Deserialize, Serialize};

/// Reserved namespace value meaning "all namespaces".
pub const WILDCARD_NAMESPACE: &str = "*";

/// Environment-supplied namespace settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamespaceConfig {
    /// Whether Consul Enterprise namespaces are enabled. When false, every
    /// namespace field in a policy must be empty.
    pub enabled: bool,
    /// Namespace assigned to a destination that does not name one.
    pub destination_namespace: String,
    /// Whether destination namespaces mirror the declaring resource's
    /// namespace. Consulted only when `destination_namespace` is empty.
    pub mirroring: bool,
    /// Prefix prepended to the mirrored namespace.
    pub mirroring_prefix: String,
}

impl NamespaceConfig {
    /// Namespaces disabled; the defaulter leaves everything untouched.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// The namespace a destination declared in `resource_namespace` falls
    /// back to, or `None` when no default applies.
    ///
    /// Resolution order: explicit default destination namespace, then
    /// mirroring (`mirroring_prefix + resource_namespace`), then nothing.
    pub fn default_destination_namespace(&self, resource_namespace: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }
        if !self.destination_namespace.is_empty() {
            return Some(self.destination_namespace.clone());
        }
        if self.mirroring {
            return Some(format!("{}{}", self.mirroring_prefix, resource_namespace));
        }
        None
    }
}
