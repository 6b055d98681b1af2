//! # svcint-consul — Stored Config-Entry Representation
//!
//! The canonical shape svcint writes to, and reads back from, the Consul
//! config-entry store. Conversion produces these types; comparison consumes
//! them. Nothing in this crate performs I/O: transmitting an entry and
//! fetching a stored one belong to the caller.
//!
//! ## Modules
//!
//! - [`entry`] — [`ConfigEntry`], a sum type over the supported kinds keyed
//!   by the wire `Kind` tag, plus JSON and fingerprint helpers.
//! - [`intentions`] — [`ServiceIntentionsConfigEntry`] and its nested
//!   source, permission and header matcher types.
//! - [`meta`] — provenance tags (`external-source`, source datacenter).
//!
//! ## Crate Policy
//!
//! - Depends only on `svcint-core` internally.
//! - Field values pass through verbatim; no validation happens here.

pub mod entry;
pub mod intentions;
pub mod meta;

pub use entry::{
    ConfigEntry, OtherConfigEntry, ProxyConfigEntry, ServiceConfigEntry, PROXY_DEFAULTS,
    SERVICE_DEFAULTS, SERVICE_INTENTIONS,
};
pub use intentions::{
    IntentionHttpHeaderPermission, IntentionHttpPermission, IntentionPermission,
    ServiceIntentionsConfigEntry, SourceIntention,
};
pub use meta::{datacenter_of, provenance_meta, Meta, DATACENTER_KEY, SOURCE_KEY, SOURCE_VALUE};
