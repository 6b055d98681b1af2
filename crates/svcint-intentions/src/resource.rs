//! # Resource Identity Hooks
//!
//! The names under which a `ServiceIntentions` resource is known on each
//! side: its Kubernetes kind and name, the Consul kind and entry name it
//! writes, and the group-qualified kind used in validation reports.

use svcint_consul::SERVICE_INTENTIONS;

use crate::types::ServiceIntentions;

/// API group of the resource.
pub const GROUP: &str = "consul.hashicorp.com";
/// `apiVersion` of the resource.
pub const API_VERSION: &str = "consul.hashicorp.com/v1alpha1";
/// `kind` of the resource as written in manifests.
pub const KIND: &str = "ServiceIntentions";
/// Lower-case kind used by the controller.
pub const KUBE_KIND: &str = "serviceintentions";

impl ServiceIntentions {
    /// The Consul config-entry kind this resource writes.
    pub fn consul_kind(&self) -> &'static str {
        SERVICE_INTENTIONS
    }

    /// The lower-case Kubernetes kind.
    pub fn kube_kind(&self) -> &'static str {
        KUBE_KIND
    }

    /// `serviceintentions.consul.hashicorp.com`, the kind named in
    /// validation reports.
    pub fn qualified_kind(&self) -> String {
        format!("{KUBE_KIND}.{GROUP}")
    }

    /// The Consul entry name: the destination service.
    pub fn consul_name(&self) -> &str {
        &self.spec.destination.name
    }

    /// The Kubernetes resource name.
    pub fn kubernetes_name(&self) -> &str {
        &self.metadata.name
    }

    /// The Consul namespace the entry is written to. The wildcard `*` is
    /// returned verbatim.
    pub fn consul_mirroring_ns(&self) -> &str {
        &self.spec.destination.namespace
    }

    /// Intentions are scoped to their destination, never global.
    pub fn consul_global_resource(&self) -> bool {
        false
    }
}
