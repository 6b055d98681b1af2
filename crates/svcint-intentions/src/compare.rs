//! # Equivalence Against a Stored Entry
//!
//! Decides whether the store already holds what this resource would write.
//! A `true` answer means no write is needed.

use svcint_consul::ConfigEntry;

use crate::types::ServiceIntentions;

impl ServiceIntentions {
    /// Whether `candidate` already encodes this resource.
    ///
    /// Entries of any other kind, modelled or not, never match. For a
    /// `service-intentions` entry the resource is converted using the
    /// datacenter recorded in the candidate's `Meta`, then compared field
    /// for field, precedence and list order included. Store indices are
    /// ignored.
    pub fn matches_consul(&self, candidate: &ConfigEntry) -> bool {
        match candidate {
            ConfigEntry::ServiceIntentions(stored) => {
                let ours = self.to_config_entry(stored.datacenter());
                let same = ours.same_policy(stored);
                if !same {
                    tracing::debug!(
                        resource = %self.metadata,
                        ours = %fingerprint_or_unknown(&ConfigEntry::ServiceIntentions(ours)),
                        stored = %fingerprint_or_unknown(candidate),
                        "stored service-intentions entry differs"
                    );
                }
                same
            }
            ConfigEntry::ServiceDefaults(_)
            | ConfigEntry::ProxyDefaults(_)
            | ConfigEntry::Other(_) => {
                tracing::debug!(
                    resource = %self.metadata,
                    stored_kind = candidate.kind(),
                    "stored entry has a different kind"
                );
                false
            }
        }
    }
}

fn fingerprint_or_unknown(entry: &ConfigEntry) -> String {
    entry
        .fingerprint()
        .map(|d| d.to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Destination, IntentionHttpHeaderPermission, IntentionHttpPermission, IntentionPermission,
        ServiceIntentionsSpec, SourceIntention,
    };
    use svcint_consul::{
        self as consul, provenance_meta, ServiceConfigEntry, ServiceIntentionsConfigEntry,
    };
    use svcint_core::ObjectMeta;

    fn resource(sources: Vec<SourceIntention>) -> ServiceIntentions {
        ServiceIntentions::new(
            ObjectMeta::new("name", "namespace"),
            ServiceIntentionsSpec {
                destination: Destination {
                    name: "svc-name".into(),
                    namespace: "test".into(),
                },
                sources,
            },
        )
    }

    fn source(name: &str, ns: &str, action: &str) -> SourceIntention {
        SourceIntention {
            name: name.into(),
            namespace: ns.into(),
            action: action.into(),
            ..Default::default()
        }
    }

    fn stored(sources: Vec<consul::SourceIntention>) -> ServiceIntentionsConfigEntry {
        ServiceIntentionsConfigEntry {
            name: "svc-name".into(),
            namespace: "test".into(),
            sources,
            meta: provenance_meta("datacenter"),
            create_index: 1,
            modify_index: 2,
        }
    }

    fn stored_source(name: &str, ns: &str, action: &str, precedence: i32) -> consul::SourceIntention {
        consul::SourceIntention {
            name: name.into(),
            namespace: ns.into(),
            action: action.into(),
            precedence,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_fields_set() {
        let si = resource(vec![source("svc1", "test", "allow"), source("*", "not-test", "deny")]);
        let entry = stored(vec![
            stored_source("svc1", "test", "allow", 1),
            stored_source("*", "not-test", "deny", 0),
        ]);
        assert!(si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_empty_fields_match() {
        let si = ServiceIntentions::new(ObjectMeta::new("name", ""), ServiceIntentionsSpec::default());
        let entry = ServiceIntentionsConfigEntry {
            meta: provenance_meta("datacenter"),
            create_index: 1,
            modify_index: 2,
            ..Default::default()
        };
        assert!(si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_indices_ignored() {
        let si = resource(vec![source("svc1", "test", "allow")]);
        let mut entry = stored(vec![stored_source("svc1", "test", "allow", 0)]);
        entry.create_index = 99;
        entry.modify_index = 100;
        assert!(si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_precedence_differs() {
        let si = resource(vec![source("svc1", "test", "allow"), source("svc2", "test", "deny")]);
        let entry = stored(vec![
            stored_source("svc1", "test", "allow", 0),
            stored_source("svc2", "test", "deny", 1),
        ]);
        assert!(!si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_order_differs() {
        let si = resource(vec![source("svc1", "test", "allow"), source("svc2", "test", "deny")]);
        let entry = stored(vec![
            stored_source("svc2", "test", "deny", 1),
            stored_source("svc1", "test", "allow", 0),
        ]);
        assert!(!si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_datacenter_taken_from_candidate() {
        let si = resource(vec![source("svc1", "test", "allow")]);
        let mut entry = stored(vec![stored_source("svc1", "test", "allow", 0)]);
        entry.meta = provenance_meta("dc-other");
        assert!(si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_extra_meta_does_not_match() {
        let si = resource(vec![source("svc1", "test", "allow")]);
        let mut entry = stored(vec![stored_source("svc1", "test", "allow", 0)]);
        entry.meta.insert("extra".into(), "tag".into());
        assert!(!si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_missing_meta_does_not_match() {
        let si = resource(vec![source("svc1", "test", "allow")]);
        let mut entry = stored(vec![stored_source("svc1", "test", "allow", 0)]);
        entry.meta.clear();
        assert!(!si.matches_consul(&entry.into()));
    }

    #[test]
    fn test_different_kind_never_matches() {
        let si = resource(vec![source("svc1", "test", "allow")]);
        let entry = ConfigEntry::ServiceDefaults(ServiceConfigEntry {
            name: "svc-name".into(),
            namespace: "test".into(),
            meta: provenance_meta("datacenter"),
            ..Default::default()
        });
        assert!(!si.matches_consul(&entry));
    }

    #[test]
    fn test_unmodelled_kind_never_matches() {
        let si = resource(vec![source("svc1", "test", "allow")]);
        let entry = ConfigEntry::from_json(
            r#"{"Kind":"service-router","Name":"svc-name","Namespace":"test",
                "Meta":{"external-source":"kubernetes","consul.hashicorp.com/source-datacenter":"datacenter"}}"#,
        )
        .unwrap();
        assert!(!si.matches_consul(&entry));
    }

    #[test]
    fn test_l7_permissions_compared() {
        let http = IntentionHttpPermission {
            path_prefix: "/admin".into(),
            header: vec![IntentionHttpHeaderPermission {
                name: "x-debug".into(),
                present: true,
                ..Default::default()
            }],
            methods: vec!["GET".into()],
            ..Default::default()
        };
        let mut l7 = source("svc1", "test", "");
        l7.permissions = vec![IntentionPermission {
            action: "deny".into(),
            http: Some(http.clone()),
        }];
        let si = resource(vec![l7]);

        let mut stored_l7 = stored_source("svc1", "test", "", 0);
        stored_l7.permissions = vec![consul::IntentionPermission {
            action: "deny".into(),
            http: Some((&http).into()),
        }];
        assert!(si.matches_consul(&stored(vec![stored_l7.clone()]).into()));

        if let Some(h) = stored_l7.permissions[0].http.as_mut() {
            h.methods.push("PUT".into());
        }
        assert!(!si.matches_consul(&stored(vec![stored_l7]).into()));
    }

    #[test]
    fn test_converted_entry_matches_itself() {
        let si = resource(vec![source("a", "", "allow"), source("b", "", "deny")]);
        assert!(si.matches_consul(&si.to_consul("dc7")));
    }
}
