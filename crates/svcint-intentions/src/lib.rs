//! # svcint-intentions — The ServiceIntentions Resource
//!
//! A `ServiceIntentions` resource says which services may call a
//! destination service. This crate takes one from manifest to store entry:
//!
//! 1. **Defaulting** ([`ServiceIntentions::default_namespaces`]) fills an
//!    empty destination namespace from the deployment's
//!    [`NamespaceConfig`](svcint_core::NamespaceConfig).
//! 2. **Validation** ([`ServiceIntentions::validate`]) reports every
//!    structural and namespace-gating violation with its field path.
//! 3. **Conversion** ([`ServiceIntentions::to_consul`]) produces the
//!    `service-intentions` config entry, deriving `Precedence` from source
//!    order and tagging provenance in `Meta`.
//! 4. **Comparison** ([`ServiceIntentions::matches_consul`]) decides
//!    whether a stored entry already encodes the resource.
//!
//! All four are pure and synchronous. Only defaulting mutates.
//!
//! ## Crate Policy
//!
//! - Depends on `svcint-core` and `svcint-consul` internally.
//! - Error messages and field paths are a user-facing contract and match
//!   the Kubernetes `field.ErrorList` rendering exactly.

pub mod compare;
pub mod convert;
pub mod defaults;
pub mod manifest;
pub mod resource;
pub mod types;
pub mod validate;

pub use manifest::{load_manifest, parse_manifest, ManifestFormat};
pub use resource::{API_VERSION, GROUP, KIND, KUBE_KIND};
pub use types::{
    Destination, IntentionAction, IntentionHttpHeaderPermission, IntentionHttpPermission,
    IntentionPermission, ServiceIntentions, ServiceIntentionsSpec, SourceIntention, SourceRule,
};
