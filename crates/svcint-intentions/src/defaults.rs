//! # Namespace Defaulting
//!
//! Fills in an empty destination namespace from the deployment's
//! [`NamespaceConfig`]. Runs once, before validation, and touches nothing
//! else: source namespaces and every other field are left as written.

use svcint_core::NamespaceConfig;

use crate::types::ServiceIntentions;

impl ServiceIntentions {
    /// Default `spec.destination.namespace` when it is empty and namespaces
    /// are enabled.
    ///
    /// The configured default destination namespace wins; otherwise, with
    /// mirroring on, the resource's own namespace behind the mirroring
    /// prefix. When namespaces are disabled the field is left alone, even if
    /// set; rejecting it is the validator's job.
    ///
    /// Idempotent: once the namespace is set, later calls are no-ops.
    pub fn default_namespaces(&mut self, config: &NamespaceConfig) {
        if !self.spec.destination.namespace.is_empty() {
            return;
        }
        if let Some(ns) = config.default_destination_namespace(&self.metadata.namespace) {
            tracing::debug!(
                resource = %self.metadata,
                namespace = %ns,
                "defaulted destination namespace"
            );
            self.spec.destination.namespace = ns;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Destination, ServiceIntentionsSpec};
    use svcint_core::ObjectMeta;

    fn input() -> ServiceIntentions {
        ServiceIntentions::new(
            ObjectMeta::new("foo", "bar"),
            ServiceIntentionsSpec {
                destination: Destination {
                    name: "bar".into(),
                    namespace: String::new(),
                },
                sources: vec![],
            },
        )
    }

    fn config(enabled: bool, dest: &str, mirroring: bool, prefix: &str) -> NamespaceConfig {
        NamespaceConfig {
            enabled,
            destination_namespace: dest.into(),
            mirroring,
            mirroring_prefix: prefix.into(),
        }
    }

    #[test]
    fn test_defaulting_table() {
        let cases = [
            ("disabled", config(false, "", false, ""), ""),
            ("destinationNS", config(true, "foo", false, ""), "foo"),
            ("mirroringEnabledWithoutPrefix", config(true, "", true, ""), "bar"),
            ("mirroringWithPrefix", config(true, "", true, "ns-"), "ns-bar"),
            ("enabledNoDefaults", config(true, "", false, "ns-"), ""),
        ];
        for (name, cfg, expected) in cases {
            let mut si = input();
            si.default_namespaces(&cfg);
            let mut want = input();
            want.spec.destination.namespace = expected.to_string();
            assert_eq!(si, want, "case {name}");
        }
    }

    #[test]
    fn test_existing_namespace_kept() {
        let mut si = input();
        si.spec.destination.namespace = "explicit".into();
        si.default_namespaces(&config(true, "foo", true, "ns-"));
        assert_eq!(si.spec.destination.namespace, "explicit");
    }

    #[test]
    fn test_disabled_leaves_set_namespace_for_validator() {
        let mut si = input();
        si.spec.destination.namespace = "explicit".into();
        si.default_namespaces(&NamespaceConfig::disabled());
        assert_eq!(si.spec.destination.namespace, "explicit");
    }

    #[test]
    fn test_source_namespaces_untouched() {
        let mut si = input();
        si.spec.sources.push(crate::types::SourceIntention {
            name: "web".into(),
            action: "allow".into(),
            ..Default::default()
        });
        si.default_namespaces(&config(true, "foo", false, ""));
        assert_eq!(si.spec.sources[0].namespace, "");
    }

    #[test]
    fn test_idempotent() {
        let cfg = config(true, "", true, "ns-");
        let mut once = input();
        once.default_namespaces(&cfg);
        let mut twice = once.clone();
        twice.default_namespaces(&cfg);
        assert_eq!(once, twice);
    }
}
