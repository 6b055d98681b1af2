//! # ServiceIntentions Resource Types
//!
//! The user-authored policy, as it arrives from a manifest: a destination
//! service and an ordered list of sources allowed or denied to call it.
//!
//! ## Raw Form and Typed View
//!
//! A source may use either a coarse `action` or a list of HTTP
//! `permissions`, never both. Manifests can still contain both, and the
//! validation contract must report that case with the offending entry
//! embedded in the message, so the deserialized form keeps both fields.
//! [`SourceIntention::rule`] lifts a source into the two-variant
//! [`SourceRule`] once it is known to be well formed.
//!
//! Serialized field order is declaration order and empty values are
//! omitted. The mutual-exclusivity error embeds this serialization, so the
//! order is part of the error contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use svcint_core::{to_go_json, FieldError, FieldPath, ObjectMeta};

use crate::resource::{API_VERSION, KIND};

fn is_false(b: &bool) -> bool {
    !*b
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

/// A `ServiceIntentions` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIntentions {
    /// Always `consul.hashicorp.com/v1alpha1`.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Always `ServiceIntentions`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Identity of the declaring resource.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// The policy itself.
    #[serde(default)]
    pub spec: ServiceIntentionsSpec,
}

impl ServiceIntentions {
    /// A resource identified by `metadata` carrying `spec`.
    pub fn new(metadata: ObjectMeta, spec: ServiceIntentionsSpec) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata,
            spec,
        }
    }
}

impl Default for ServiceIntentions {
    fn default() -> Self {
        Self::new(ObjectMeta::default(), ServiceIntentionsSpec::default())
    }
}

/// Destination plus ordered sources. Order is significant: earlier sources
/// take precedence over later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIntentionsSpec {
    /// The service being called.
    #[serde(default)]
    pub destination: Destination,
    /// Callers, highest precedence first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceIntention>,
}

/// The service an intentions policy protects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Service name, or `*`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Namespace, or `*` for every namespace. Must be empty when namespaces
    /// are disabled.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

/// One caller of the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceIntention {
    /// Service name, or `*`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Namespace, or `*`. Must be empty when namespaces are disabled.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// `allow` or `deny`. Mutually exclusive with `permissions`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,
    /// HTTP rules. Mutually exclusive with `action`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<IntentionPermission>,
    /// Free text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// An HTTP-layer rule: an action applied to requests matching `http`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentionPermission {
    /// `allow` or `deny`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,
    /// Request matcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<IntentionHttpPermission>,
}

/// Request matcher. Path fields may coexist; `pathExact` and `pathPrefix`
/// must begin with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentionHttpPermission {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path_exact: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path_prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path_regex: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<IntentionHttpHeaderPermission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
}

/// Header matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentionHttpHeaderPermission {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub present: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exact: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regex: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub invert: bool,
}

/// The two actions an intention can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentionAction {
    /// Permit the traffic.
    Allow,
    /// Reject the traffic.
    Deny,
}

impl IntentionAction {
    /// Every accepted action, in the order error messages list them.
    pub const ALL: [IntentionAction; 2] = [Self::Allow, Self::Deny];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }

    /// The `must be one of "allow", "deny"` detail used when an action is
    /// not recognized.
    pub fn not_in_set_message() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(IntentionAction::as_str).collect();
        format!(r#"must be one of "{}""#, names.join(r#"", ""#))
    }
}

impl fmt::Display for IntentionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(Self::not_in_set_message)
    }
}

/// A well-formed source's rule: either a coarse action or HTTP permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRule<'a> {
    /// Applies to all traffic from the source.
    Action(IntentionAction),
    /// Applies per request, first matching permission wins.
    Permissions(&'a [IntentionPermission]),
}

impl fmt::Display for SourceRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(a) => write!(f, "{a}"),
            Self::Permissions(p) if p.len() == 1 => f.write_str("1 HTTP permission"),
            Self::Permissions(p) => write!(f, "{} HTTP permissions", p.len()),
        }
    }
}

impl SourceIntention {
    /// Whether both `action` and `permissions` are set.
    pub fn has_conflicting_rules(&self) -> bool {
        !self.action.is_empty() && !self.permissions.is_empty()
    }

    /// Lift this source into its typed rule.
    ///
    /// Returns `Ok(None)` when neither `action` nor `permissions` is set.
    ///
    /// # Errors
    ///
    /// Returns the field error the validator reports at `path` when both
    /// are set, or at `path.action` when the action is not recognized.
    pub fn rule(&self, path: &FieldPath) -> Result<Option<SourceRule<'_>>, FieldError> {
        if self.has_conflicting_rules() {
            return Err(self.conflict_error(path));
        }
        if !self.permissions.is_empty() {
            return Ok(Some(SourceRule::Permissions(&self.permissions)));
        }
        if self.action.is_empty() {
            return Ok(None);
        }
        self.action
            .parse()
            .map(|a| Some(SourceRule::Action(a)))
            .map_err(|detail| FieldError::invalid(path.child("action"), self.action.clone(), detail))
    }

    /// The mutual-exclusivity error for this source at `path`, embedding
    /// the source's JSON serialization as the rejected value.
    pub(crate) fn conflict_error(&self, path: &FieldPath) -> FieldError {
        // Only strings, lists and bools are serialized, which cannot fail.
        let as_json = to_go_json(self).unwrap_or_else(|_| format!("{self:?}"));
        FieldError::invalid(
            path.clone(),
            as_json,
            "action and permissions are mutually exclusive and only one of them can be specified",
        )
    }
}
