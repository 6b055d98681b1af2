//! # Field Errors — Structured Validation Results
//!
//! Validation never stops at the first problem. Every violation becomes a
//! [`FieldError`] carrying the field path, the rejected value and a detail
//! message; a pass collects them into [`FieldErrors`], and a rejected
//! resource is reported as an [`InvalidResource`].
//!
//! ## Wire Format
//!
//! The rendered messages are a user-facing contract and match the Kubernetes
//! API machinery byte for byte:
//!
//! ```text
//! spec.sources: Required value: at least one source must be specified
//! spec.sources[0].action: Invalid value: "foo": must be one of "allow", "deny"
//! serviceintentions.consul.hashicorp.com "web" is invalid: <error>
//! serviceintentions.consul.hashicorp.com "web" is invalid: [<error>, <error>]
//! ```

use std::fmt::{self, Write as _};

use thiserror::Error;

use crate::path::FieldPath;

/// The category of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A required field was missing or empty. Carries no bad value.
    Required,
    /// A field had a value that is not acceptable.
    Invalid,
}

impl ErrorType {
    /// The label rendered in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "Required value",
            Self::Invalid => "Invalid value",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation violation: (field path, rejected value, detail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// What kind of violation this is.
    pub error_type: ErrorType,
    /// Where in the resource the violation is.
    pub field: FieldPath,
    /// The rejected value, if the error type reports one.
    pub bad_value: Option<String>,
    /// Human-readable explanation.
    pub detail: String,
}

impl FieldError {
    /// A required field is missing.
    pub fn required(field: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::Required,
            field,
            bad_value: None,
            detail: detail.into(),
        }
    }

    /// A field holds a value that is not acceptable.
    pub fn invalid(field: FieldPath, value: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::Invalid,
            field,
            bad_value: Some(value.into()),
            detail: detail.into(),
        }
    }

    /// The message without the field path prefix, e.g.
    /// `Invalid value: "foo": must be one of "allow", "deny"`.
    pub fn body(&self) -> String {
        let mut body = self.error_type.as_str().to_string();
        if let (ErrorType::Invalid, Some(value)) = (self.error_type, &self.bad_value) {
            body.push_str(": ");
            body.push_str(&quote(value));
        }
        if !self.detail.is_empty() {
            body.push_str(": ");
            body.push_str(&self.detail);
        }
        body
    }
}

/// Double-quote `s` the way Go's `%q` verb does: named escapes for the
/// common controls, `\xHH` for other ASCII controls and `\uHHHH` for
/// non-ASCII controls. Printable text is kept as is.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.body())
    }
}

/// Ordered collection of field errors from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one error.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Append one error if present.
    pub fn push_opt(&mut self, error: Option<FieldError>) {
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all errors, in discovery order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Iterate over the errors in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }

    /// Wrap the errors into an [`InvalidResource`] report, or `Ok(())` when
    /// there is nothing to report.
    pub fn into_result(
        self,
        qualified_kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), InvalidResource> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(InvalidResource {
                qualified_kind: qualified_kind.into(),
                name: name.into(),
                errors: self,
            })
        }
    }
}

impl Extend<FieldError> for FieldErrors {
    fn extend<T: IntoIterator<Item = FieldError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = FieldError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// A single error renders bare; several render as `[e1, e2, ...]`.
impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "{only}"),
            many => {
                f.write_str("[")?;
                for (i, e) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{e}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A resource rejected by validation, with every violation found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{qualified_kind} {name:?} is invalid: {errors}")]
pub struct InvalidResource {
    /// Group-qualified kind, e.g. `serviceintentions.consul.hashicorp.com`.
    pub qualified_kind: String,
    /// Name of the rejected resource.
    pub name: String,
    /// Every violation, in discovery order. Never empty.
    pub errors: FieldErrors,
}

impl InvalidResource {
    /// One `<kind> "<name>" is invalid: <error>` line per violation.
    pub fn lines(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("{} {:?} is invalid: {e}", self.qualified_kind, self.name))
            .collect()
    }
}
