//! # Provenance Metadata
//!
//! Every entry svcint writes carries two `Meta` tags: one marking the entry
//! as managed from Kubernetes, one recording the datacenter (or admin
//! partition) it was written for. The comparator reads the datacenter back
//! out of a stored entry to reproduce the exact conversion that wrote it.

use std::collections::BTreeMap;

/// Meta key marking the system that wrote an entry.
pub const SOURCE_KEY: &str = "external-source";

/// Value of [`SOURCE_KEY`] for entries written by svcint.
pub const SOURCE_VALUE: &str = "kubernetes";

/// Meta key recording the datacenter or partition an entry was written for.
pub const DATACENTER_KEY: &str = "consul.hashicorp.com/source-datacenter";

/// The `Meta` map of an entry.
pub type Meta = BTreeMap<String, String>;

/// The provenance tags for an entry written for `datacenter`.
pub fn provenance_meta(datacenter: &str) -> Meta {
    let mut meta = Meta::new();
    meta.insert(SOURCE_KEY.to_string(), SOURCE_VALUE.to_string());
    meta.insert(DATACENTER_KEY.to_string(), datacenter.to_string());
    meta
}

/// The datacenter recorded in `meta`, or `""` when absent.
pub fn datacenter_of(meta: &Meta) -> &str {
    meta.get(DATACENTER_KEY).map(String::as_str).unwrap_or("")
}
