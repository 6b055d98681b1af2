//! # Validation
//!
//! Checks a `ServiceIntentions` resource against its structural and
//! namespace-gating rules and reports every violation at once.
//!
//! ## Checks, in Report Order
//!
//! 1. `spec.sources` is non-empty.
//! 2. For each source `i`:
//!    - a set `action` is `allow` or `deny` (`spec.sources[i].action`);
//!    - `action` and `permissions` are not both set (`spec.sources[i]`);
//!    - each permission `j` has an `allow`/`deny` action and `/`-rooted
//!      `pathExact`/`pathPrefix` (`spec.sources[i].permissions[j].*`).
//! 3. With namespaces disabled: `spec.destination.namespace` is empty,
//!    then each `spec.sources[i].namespace` is empty.
//!
//! Every check runs regardless of earlier failures. Validation never mutates
//! the resource.

use svcint_core::{FieldError, FieldErrors, FieldPath, InvalidResource};

use crate::types::{IntentionAction, IntentionPermission, ServiceIntentions, SourceIntention};

const SOURCES_REQUIRED: &str = "at least one source must be specified";
const PATH_MUST_BE_ROOTED: &str = "must begin with a '/'";
const DESTINATION_NS_GATED: &str =
    "Consul Enterprise namespaces must be enabled to set destination.namespace";
const SOURCE_NS_GATED: &str = "Consul Enterprise namespaces must be enabled to set source.namespace";

impl ServiceIntentions {
    /// Validate the resource.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidResource`] naming this resource and listing every
    /// violation found.
    pub fn validate(&self, namespaces_enabled: bool) -> Result<(), InvalidResource> {
        self.field_errors(namespaces_enabled)
            .into_result(self.qualified_kind(), self.metadata.name.clone())
    }

    /// Every violation found, in report order. Empty when valid.
    pub fn field_errors(&self, namespaces_enabled: bool) -> FieldErrors {
        let mut errs = FieldErrors::new();
        let spec = FieldPath::new("spec");
        let sources = spec.child("sources");

        if self.spec.sources.is_empty() {
            errs.push(FieldError::required(sources.clone(), SOURCES_REQUIRED));
        }
        for (i, source) in self.spec.sources.iter().enumerate() {
            errs.extend(validate_source(source, &sources.index(i)));
        }

        if !namespaces_enabled {
            errs.push_opt(namespace_gated(
                &self.spec.destination.namespace,
                &spec.child("destination").child("namespace"),
                DESTINATION_NS_GATED,
            ));
            for (i, source) in self.spec.sources.iter().enumerate() {
                errs.push_opt(namespace_gated(
                    &source.namespace,
                    &sources.index(i).child("namespace"),
                    SOURCE_NS_GATED,
                ));
            }
        }

        errs
    }
}

fn validate_source(source: &SourceIntention, path: &FieldPath) -> FieldErrors {
    let mut errs = FieldErrors::new();
    if !source.action.is_empty() {
        errs.push_opt(validate_action(&source.action, &path.child("action")));
    }
    if source.has_conflicting_rules() {
        errs.push(source.conflict_error(path));
    }
    let permissions = path.child("permissions");
    for (j, permission) in source.permissions.iter().enumerate() {
        errs.extend(validate_permission(permission, &permissions.index(j)));
    }
    errs
}

fn validate_permission(permission: &IntentionPermission, path: &FieldPath) -> FieldErrors {
    let mut errs = FieldErrors::new();
    errs.push_opt(validate_action(&permission.action, &path.child("action")));
    if let Some(http) = &permission.http {
        if invalid_path_prefix(&http.path_prefix) {
            errs.push(FieldError::invalid(
                path.child("pathPrefix"),
                http.path_prefix.clone(),
                PATH_MUST_BE_ROOTED,
            ));
        }
        if invalid_path_prefix(&http.path_exact) {
            errs.push(FieldError::invalid(
                path.child("pathExact"),
                http.path_exact.clone(),
                PATH_MUST_BE_ROOTED,
            ));
        }
    }
    errs
}

fn validate_action(action: &str, path: &FieldPath) -> Option<FieldError> {
    action
        .parse::<IntentionAction>()
        .err()
        .map(|detail| FieldError::invalid(path.clone(), action, detail))
}

fn namespace_gated(namespace: &str, path: &FieldPath, detail: &str) -> Option<FieldError> {
    (!namespace.is_empty()).then(|| FieldError::invalid(path.clone(), namespace, detail))
}

fn invalid_path_prefix(path: &str) -> bool {
    !path.is_empty() && !path.starts_with('/')
}
