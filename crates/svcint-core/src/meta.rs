//! # Resource Identity
//!
//! The slice of Kubernetes object metadata this workspace reads: the
//! resource's own name (used in validation reports) and namespace (used by
//! namespace mirroring). Lifecycle fields such as finalizers and status
//! conditions belong to the surrounding controller and are not modeled.

use serde::{Deserialize, Serialize};

/// Name and namespace of the resource declaring a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Resource name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Namespace the resource lives in.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

impl ObjectMeta {
    /// Metadata for a resource named `name` in `namespace`.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl std::fmt::Display for ObjectMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}
