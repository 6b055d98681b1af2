//! # svcint-core — Foundational Types for svcint
//!
//! The leaf crate of the workspace. Every other `svcint-*` crate depends on
//! it; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validation reports, not first failures.** [`FieldError`] values are
//!    collected into [`FieldErrors`] and surfaced as one [`InvalidResource`]
//!    listing every violation. Rendering matches the Kubernetes API
//!    machinery format, which is a user-facing contract.
//!
//! 2. **Structured field paths.** [`FieldPath`] is a list of field/index
//!    segments threaded through nested validation, never ad hoc string
//!    concatenation.
//!
//! 3. **`CanonicalBytes` newtype.** All fingerprint computation flows
//!    through `CanonicalBytes::new()` (RFC 8785), and [`sha256_digest()`]
//!    accepts only `&CanonicalBytes`.
//!
//! 4. **Environment is configuration.** [`NamespaceConfig`] carries the
//!    deployment's namespace flags; policies never set them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `svcint-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod config;
pub mod digest;
pub mod error;
pub mod field;
pub mod json;
pub mod meta;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use config::{NamespaceConfig, WILDCARD_NAMESPACE};
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, SvcintError};
pub use field::{ErrorType, FieldError, FieldErrors, InvalidResource};
pub use json::to_go_json;
pub use meta::ObjectMeta;
pub use path::{FieldPath, PathSegment};
