//! # Config Entries — The Stored Object Sum Type
//!
//! A stored config entry is one of several kinds, distinguished on the wire
//! by its `Kind` field. `ConfigEntry` models that as an enum so a caller
//! comparing against a fetched entry matches on the variant instead of
//! asserting a runtime type.
//!
//! Only `service-intentions` is produced by this workspace. Two neighbouring
//! kinds are modelled by name; every other kind (`service-router`, `mesh`,
//! ...) lands in [`ConfigEntry::Other`] with its body kept opaque. A fetched
//! entry of any kind therefore parses, and only a missing `Kind` is an error.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use svcint_core::{sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest, SvcintError};

use crate::intentions::ServiceIntentionsConfigEntry;
use crate::meta::{datacenter_of, Meta};

/// Wire kind of a service-intentions entry.
pub const SERVICE_INTENTIONS: &str = "service-intentions";
/// Wire kind of a service-defaults entry.
pub const SERVICE_DEFAULTS: &str = "service-defaults";
/// Wire kind of a proxy-defaults entry.
pub const PROXY_DEFAULTS: &str = "proxy-defaults";

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// A config entry as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEntry {
    /// Which services may call a destination.
    ServiceIntentions(ServiceIntentionsConfigEntry),
    /// Per-service defaults.
    ServiceDefaults(ServiceConfigEntry),
    /// Mesh-wide proxy defaults.
    ProxyDefaults(ProxyConfigEntry),
    /// Any kind not modelled above.
    Other(OtherConfigEntry),
}

/// Serialization view of the modelled kinds: the tag goes first.
#[derive(Serialize)]
#[serde(tag = "Kind")]
enum Tagged<'a> {
    #[serde(rename = "service-intentions")]
    ServiceIntentions(&'a ServiceIntentionsConfigEntry),
    #[serde(rename = "service-defaults")]
    ServiceDefaults(&'a ServiceConfigEntry),
    #[serde(rename = "proxy-defaults")]
    ProxyDefaults(&'a ProxyConfigEntry),
}

impl Serialize for ConfigEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ServiceIntentions(e) => Tagged::ServiceIntentions(e).serialize(serializer),
            Self::ServiceDefaults(e) => Tagged::ServiceDefaults(e).serialize(serializer),
            Self::ProxyDefaults(e) => Tagged::ProxyDefaults(e).serialize(serializer),
            Self::Other(e) => e.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("Kind")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| D::Error::missing_field("Kind"))?;
        let entry = match kind.as_str() {
            SERVICE_INTENTIONS => serde_json::from_value(value).map(Self::ServiceIntentions),
            SERVICE_DEFAULTS => serde_json::from_value(value).map(Self::ServiceDefaults),
            PROXY_DEFAULTS => serde_json::from_value(value).map(Self::ProxyDefaults),
            _ => serde_json::from_value(value).map(Self::Other),
        };
        entry.map_err(D::Error::custom)
    }
}

impl ConfigEntry {
    /// The wire `Kind` of this entry.
    pub fn kind(&self) -> &str {
        match self {
            Self::ServiceIntentions(_) => SERVICE_INTENTIONS,
            Self::ServiceDefaults(_) => SERVICE_DEFAULTS,
            Self::ProxyDefaults(_) => PROXY_DEFAULTS,
            Self::Other(e) => &e.kind,
        }
    }

    /// The entry name.
    pub fn name(&self) -> &str {
        match self {
            Self::ServiceIntentions(e) => &e.name,
            Self::ServiceDefaults(e) => &e.name,
            Self::ProxyDefaults(e) => &e.name,
            Self::Other(e) => &e.name,
        }
    }

    /// The entry's provenance tags.
    pub fn meta(&self) -> &Meta {
        match self {
            Self::ServiceIntentions(e) => &e.meta,
            Self::ServiceDefaults(e) => &e.meta,
            Self::ProxyDefaults(e) => &e.meta,
            Self::Other(e) => &e.meta,
        }
    }

    /// The datacenter recorded in the provenance tags, or `""`.
    pub fn datacenter(&self) -> &str {
        datacenter_of(self.meta())
    }

    /// The intentions payload, if this is a `service-intentions` entry.
    pub fn as_service_intentions(&self) -> Option<&ServiceIntentionsConfigEntry> {
        match self {
            Self::ServiceIntentions(e) => Some(e),
            Self::ServiceDefaults(_) | Self::ProxyDefaults(_) | Self::Other(_) => None,
        }
    }

    /// SHA-256 over the canonical (JCS) bytes of the entry, excluding store
    /// bookkeeping indices.
    ///
    /// Two entries describing the same policy fingerprint identically, so a
    /// freshly converted entry can be checked against a stored one by
    /// comparing fingerprints.
    ///
    /// # Errors
    ///
    /// Propagates canonicalization failures; config entries contain no
    /// floats, so this does not fail in practice.
    pub fn fingerprint(&self) -> Result<ContentDigest, CanonicalizationError> {
        let cleared = match self {
            Self::ServiceIntentions(e) => Self::ServiceIntentions(e.without_indices()),
            Self::ServiceDefaults(e) => Self::ServiceDefaults(ServiceConfigEntry {
                create_index: 0,
                modify_index: 0,
                ..e.clone()
            }),
            Self::ProxyDefaults(e) => Self::ProxyDefaults(ProxyConfigEntry {
                create_index: 0,
                modify_index: 0,
                ..e.clone()
            }),
            Self::Other(e) => Self::Other(OtherConfigEntry {
                create_index: 0,
                modify_index: 0,
                ..e.clone()
            }),
        };
        let bytes = CanonicalBytes::new(&cleared)?;
        Ok(sha256_digest(&bytes))
    }

    /// Parse an entry from the store's JSON form.
    ///
    /// # Errors
    ///
    /// Returns `SvcintError::Serialization` for malformed JSON or a missing
    /// `Kind`.
    pub fn from_json(json: &str) -> Result<Self, SvcintError> {
        serde_json::from_str(json).map_err(|e| SvcintError::Serialization(e.to_string()))
    }

    /// Render the entry in the store's JSON form.
    ///
    /// # Errors
    ///
    /// Returns `SvcintError::Serialization` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SvcintError> {
        serde_json::to_string_pretty(self).map_err(|e| SvcintError::Serialization(e.to_string()))
    }
}

impl From<ServiceIntentionsConfigEntry> for ConfigEntry {
    fn from(entry: ServiceIntentionsConfigEntry) -> Self {
        Self::ServiceIntentions(entry)
    }
}

/// A `service-defaults` entry, reduced to the fields svcint reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ServiceConfigEntry {
    /// Service name.
    pub name: String,
    /// Service namespace.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Service protocol (`tcp`, `http`, `http2`, `grpc`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    /// Provenance tags.
    #[serde(skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
    #[serde(skip_serializing_if = "is_zero")]
    pub create_index: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub modify_index: u64,
}

/// A `proxy-defaults` entry, reduced to the fields svcint reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProxyConfigEntry {
    /// Always `global` in practice.
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Proxy mode (`direct`, `transparent`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
    /// Provenance tags.
    #[serde(skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
    #[serde(skip_serializing_if = "is_zero")]
    pub create_index: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub modify_index: u64,
}

/// An entry of a kind svcint does not model. The kind-specific body is
/// kept as raw JSON so the entry re-serializes unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OtherConfigEntry {
    /// Wire kind, e.g. `service-router`.
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
    #[serde(skip_serializing_if = "is_zero")]
    pub create_index: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub modify_index: u64,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intentions::SourceIntention;
    use crate::meta::provenance_meta;

    fn intentions() -> ConfigEntry {
        ConfigEntry::ServiceIntentions(ServiceIntentionsConfigEntry {
            name: "web".into(),
            sources: vec![SourceIntention {
                name: "db".into(),
                action: "deny".into(),
                ..Default::default()
            }],
            meta: provenance_meta("dc1"),
            ..Default::default()
        })
    }

    #[test]
    fn test_kind_tag_serialized_first() {
        let json = serde_json::to_string(&intentions()).unwrap();
        assert!(json.starts_with(r#"{"Kind":"service-intentions","Name":"web""#), "{json}");
    }

    #[test]
    fn test_kind_dispatch_on_deserialize() {
        let entry = ConfigEntry::from_json(r#"{"Kind":"proxy-defaults","Name":"global"}"#).unwrap();
        assert_eq!(entry.kind(), PROXY_DEFAULTS);
        assert_eq!(entry.name(), "global");
        assert!(entry.as_service_intentions().is_none());
    }

    #[test]
    fn test_unmodelled_kind_parses_as_other() {
        let json = r#"{"Kind":"service-router","Name":"web","Routes":[{"Match":{"HTTP":{"PathPrefix":"/admin"}}}],"ModifyIndex":4}"#;
        let entry = ConfigEntry::from_json(json).unwrap();
        assert_eq!(entry.kind(), "service-router");
        assert_eq!(entry.name(), "web");
        assert!(entry.as_service_intentions().is_none());
        match &entry {
            ConfigEntry::Other(e) => {
                assert_eq!(e.modify_index, 4);
                assert!(e.body.contains_key("Routes"));
                assert!(!e.body.contains_key("Kind"));
            }
            other => panic!("expected Other, got {other:?}"),
        }
    }

    #[test]
    fn test_other_round_trips_with_kind_and_body() {
        let json = r#"{"Kind":"mesh","Name":"mesh","TransparentProxy":{"MeshDestinationsOnly":true}}"#;
        let entry = ConfigEntry::from_json(json).unwrap();
        let back = ConfigEntry::from_json(&entry.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.kind(), "mesh");
    }

    #[test]
    fn test_missing_kind_rejected() {
        let err = ConfigEntry::from_json(r#"{"Name":"web"}"#).unwrap_err();
        assert!(matches!(err, SvcintError::Serialization(_)));
        assert!(err.to_string().contains("Kind"), "{err}");
    }

    #[test]
    fn test_datacenter_through_enum() {
        assert_eq!(intentions().datacenter(), "dc1");
    }

    #[test]
    fn test_fingerprint_ignores_indices() {
        let ours = intentions();
        let mut theirs = intentions();
        if let ConfigEntry::ServiceIntentions(e) = &mut theirs {
            e.create_index = 10;
            e.modify_index = 12;
        }
        assert_eq!(ours.fingerprint().unwrap(), theirs.fingerprint().unwrap());
    }

    #[test]
    fn test_fingerprint_distinguishes_kinds() {
        let a = ConfigEntry::ServiceDefaults(ServiceConfigEntry {
            name: "web".into(),
            ..Default::default()
        });
        let b = ConfigEntry::ProxyDefaults(ProxyConfigEntry {
            name: "web".into(),
            ..Default::default()
        });
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn test_json_round_trip() {
        let entry = intentions();
        let json = entry.to_json_pretty().unwrap();
        assert_eq!(ConfigEntry::from_json(&json).unwrap(), entry);
    }
}
