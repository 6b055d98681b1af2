//! # Service-Intentions Config Entry
//!
//! The store's representation of an intentions policy: one destination and
//! an ordered list of sources, each carrying a derived `Precedence`. Field
//! names serialize in the store's PascalCase (`Name`, `Sources`,
//! `PathPrefix`, `HTTP`, ...). Empty strings, `false` and empty lists are
//! omitted, so an absent field and an empty one compare and serialize alike.
//!
//! Values are carried verbatim. The store, not this crate, interprets
//! actions, wildcards and header matchers.

use serde::{Deserialize, Serialize};

use crate::meta::{datacenter_of, Meta};

fn is_zero(n: &u64) -> bool {
    *n == 0
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A `service-intentions` config entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServiceIntentionsConfigEntry {
    /// Destination service name (`*` for all services).
    pub name: String,
    /// Destination namespace (`*` for all namespaces).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Sources in precedence order, highest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceIntention>,
    /// Provenance tags.
    #[serde(skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
    /// Store bookkeeping: index at which the entry was created.
    #[serde(skip_serializing_if = "is_zero")]
    pub create_index: u64,
    /// Store bookkeeping: index of the last modification.
    #[serde(skip_serializing_if = "is_zero")]
    pub modify_index: u64,
}

impl ServiceIntentionsConfigEntry {
    /// The datacenter recorded in this entry's provenance tags.
    pub fn datacenter(&self) -> &str {
        datacenter_of(&self.meta)
    }

    /// Precedence values in source order.
    pub fn precedences(&self) -> Vec<i32> {
        self.sources.iter().map(|s| s.precedence).collect()
    }

    /// Whether `self` and `other` describe the same policy.
    ///
    /// Every field takes part except the store bookkeeping indices, which
    /// are assigned by the store on write and never produced by conversion.
    pub fn same_policy(&self, other: &Self) -> bool {
        let Self {
            name,
            namespace,
            sources,
            meta,
            create_index: _,
            modify_index: _,
        } = self;
        *name == other.name
            && *namespace == other.namespace
            && *sources == other.sources
            && *meta == other.meta
    }

    /// A copy with the store bookkeeping indices cleared.
    pub fn without_indices(&self) -> Self {
        Self {
            create_index: 0,
            modify_index: 0,
            ..self.clone()
        }
    }
}

/// One source of traffic to the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SourceIntention {
    /// Source service name (`*` for all services).
    pub name: String,
    /// Source namespace (`*` for all namespaces).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Coarse `allow`/`deny`. Empty when `permissions` is used.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    /// Fine-grained HTTP rules, first match wins.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<IntentionPermission>,
    /// Rank among the destination's sources; higher is evaluated first.
    pub precedence: i32,
    /// Free-text description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// An HTTP-layer rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct IntentionPermission {
    /// `allow` or `deny`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    /// Request matcher; absent matches every request.
    #[serde(rename = "HTTP", skip_serializing_if = "Option::is_none")]
    pub http: Option<IntentionHttpPermission>,
}

/// HTTP request matcher. An empty field places no constraint on its
/// dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct IntentionHttpPermission {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path_exact: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path_regex: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<IntentionHttpHeaderPermission>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
}

/// Header matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct IntentionHttpHeaderPermission {
    pub name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub present: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub exact: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub regex: String,
    #[serde(skip_serializing_if = "is_false")]
    pub invert: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::provenance_meta;

    fn entry() -> ServiceIntentionsConfigEntry {
        ServiceIntentionsConfigEntry {
            name: "svc-name".into(),
            namespace: "test".into(),
            sources: vec![
                SourceIntention {
                    name: "svc1".into(),
                    action: "allow".into(),
                    precedence: 1,
                    ..Default::default()
                },
                SourceIntention {
                    name: "*".into(),
                    action: "deny".into(),
                    precedence: 0,
                    ..Default::default()
                },
            ],
            meta: provenance_meta("dc1"),
            ..Default::default()
        }
    }

    #[test]
    fn test_same_policy_ignores_indices() {
        let ours = entry();
        let mut theirs = entry();
        theirs.create_index = 1;
        theirs.modify_index = 2;
        assert!(ours.same_policy(&theirs));
        assert_ne!(ours, theirs);
        assert_eq!(ours, theirs.without_indices());
    }

    #[test]
    fn test_same_policy_sees_precedence() {
        let ours = entry();
        let mut theirs = entry();
        theirs.sources[0].precedence = 0;
        theirs.sources[1].precedence = 1;
        assert!(!ours.same_policy(&theirs));
    }

    #[test]
    fn test_same_policy_sees_meta() {
        let ours = entry();
        let mut theirs = entry();
        theirs.meta.clear();
        assert!(!ours.same_policy(&theirs));
    }

    #[test]
    fn test_precedences_in_source_order() {
        assert_eq!(entry().precedences(), vec![1, 0]);
    }

    #[test]
    fn test_datacenter_from_meta() {
        assert_eq!(entry().datacenter(), "dc1");
        assert_eq!(ServiceIntentionsConfigEntry::default().datacenter(), "");
    }

    #[test]
    fn test_http_field_renamed() {
        let perm = IntentionPermission {
            action: "allow".into(),
            http: Some(IntentionHttpPermission {
                path_prefix: "/bar".into(),
                ..Default::default()
            }),
        };
        let json = serde_json::to_string(&perm).unwrap();
        assert_eq!(json, r#"{"Action":"allow","HTTP":{"PathPrefix":"/bar"}}"#);
    }

    #[test]
    fn test_precedence_zero_still_serialized() {
        let src = SourceIntention {
            name: "db".into(),
            action: "deny".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&src).unwrap();
        assert_eq!(json, r#"{"Name":"db","Action":"deny","Precedence":0}"#);
    }

    #[test]
    fn test_missing_lists_deserialize_empty() {
        let entry: ServiceIntentionsConfigEntry =
            serde_json::from_str(r#"{"Name":"web","Sources":[{"Name":"db","Action":"deny"}]}"#)
                .unwrap();
        assert!(entry.meta.is_empty());
        assert!(entry.sources[0].permissions.is_empty());
        assert_eq!(entry.sources[0].precedence, 0);
    }
}
