//! # Conversion to the Consul Config Entry
//!
//! Maps a `ServiceIntentions` resource onto the `service-intentions` entry
//! the store holds. Field shapes are copied verbatim. Two things are
//! introduced:
//!
//! - `Precedence`, derived from source position: the first of `n` sources
//!   gets `n-1`, the last gets `0`.
//! - `Meta`, the provenance tags (`external-source` and the source
//!   datacenter).
//!
//! Conversion never re-validates; callers validate first.

use svcint_consul::{self as consul, provenance_meta, ConfigEntry, ServiceIntentionsConfigEntry};

use crate::types::{
    Destination, IntentionHttpHeaderPermission, IntentionHttpPermission, IntentionPermission,
    ServiceIntentions, ServiceIntentionsSpec, SourceIntention,
};

impl ServiceIntentions {
    /// The store entry for this resource, written from `datacenter`.
    pub fn to_config_entry(&self, datacenter: &str) -> ServiceIntentionsConfigEntry {
        self.spec.to_config_entry(datacenter)
    }

    /// [`Self::to_config_entry`] wrapped in the [`ConfigEntry`] sum type.
    pub fn to_consul(&self, datacenter: &str) -> ConfigEntry {
        ConfigEntry::ServiceIntentions(self.to_config_entry(datacenter))
    }
}

impl ServiceIntentionsSpec {
    /// See [`ServiceIntentions::to_config_entry`].
    pub fn to_config_entry(&self, datacenter: &str) -> ServiceIntentionsConfigEntry {
        let n = self.sources.len();
        let sources = self
            .sources
            .iter()
            .enumerate()
            .map(|(i, source)| source.to_consul(precedence(n, i)))
            .collect();
        ServiceIntentionsConfigEntry {
            name: self.destination.name.clone(),
            namespace: self.destination.namespace.clone(),
            sources,
            meta: provenance_meta(datacenter),
            create_index: 0,
            modify_index: 0,
        }
    }

    /// Map a stored entry back onto the resource spec, dropping
    /// `Precedence` and `Meta`.
    pub fn from_config_entry(entry: &ServiceIntentionsConfigEntry) -> Self {
        Self {
            destination: Destination {
                name: entry.name.clone(),
                namespace: entry.namespace.clone(),
            },
            sources: entry.sources.iter().map(SourceIntention::from).collect(),
        }
    }
}

fn precedence(n: usize, i: usize) -> i32 {
    i32::try_from(n - 1 - i).unwrap_or(i32::MAX)
}

impl SourceIntention {
    fn to_consul(&self, precedence: i32) -> consul::SourceIntention {
        consul::SourceIntention {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            action: self.action.clone(),
            permissions: self.permissions.iter().map(Into::into).collect(),
            precedence,
            description: self.description.clone(),
        }
    }
}

impl From<&consul::SourceIntention> for SourceIntention {
    fn from(s: &consul::SourceIntention) -> Self {
        Self {
            name: s.name.clone(),
            namespace: s.namespace.clone(),
            action: s.action.clone(),
            permissions: s.permissions.iter().map(Into::into).collect(),
            description: s.description.clone(),
        }
    }
}

impl From<&IntentionPermission> for consul::IntentionPermission {
    fn from(p: &IntentionPermission) -> Self {
        Self {
            action: p.action.clone(),
            http: p.http.as_ref().map(Into::into),
        }
    }
}

impl From<&consul::IntentionPermission> for IntentionPermission {
    fn from(p: &consul::IntentionPermission) -> Self {
        Self {
            action: p.action.clone(),
            http: p.http.as_ref().map(Into::into),
        }
    }
}

impl From<&IntentionHttpPermission> for consul::IntentionHttpPermission {
    fn from(h: &IntentionHttpPermission) -> Self {
        Self {
            path_exact: h.path_exact.clone(),
            path_prefix: h.path_prefix.clone(),
            path_regex: h.path_regex.clone(),
            header: h.header.iter().map(Into::into).collect(),
            methods: h.methods.clone(),
        }
    }
}

impl From<&consul::IntentionHttpPermission> for IntentionHttpPermission {
    fn from(h: &consul::IntentionHttpPermission) -> Self {
        Self {
            path_exact: h.path_exact.clone(),
            path_prefix: h.path_prefix.clone(),
            path_regex: h.path_regex.clone(),
            header: h.header.iter().map(Into::into).collect(),
            methods: h.methods.clone(),
        }
    }
}

impl From<&IntentionHttpHeaderPermission> for consul::IntentionHttpHeaderPermission {
    fn from(h: &IntentionHttpHeaderPermission) -> Self {
        Self {
            name: h.name.clone(),
            present: h.present,
            exact: h.exact.clone(),
            prefix: h.prefix.clone(),
            suffix: h.suffix.clone(),
            regex: h.regex.clone(),
            invert: h.invert,
        }
    }
}

impl From<&consul::IntentionHttpHeaderPermission> for IntentionHttpHeaderPermission {
    fn from(h: &consul::IntentionHttpHeaderPermission) -> Self {
        Self {
            name: h.name.clone(),
            present: h.present,
            exact: h.exact.clone(),
            prefix: h.prefix.clone(),
            suffix: h.suffix.clone(),
            regex: h.regex.clone(),
            invert: h.invert,
        }
    }
}
