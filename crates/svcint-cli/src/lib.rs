//! # svcint-cli — ServiceIntentions Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate` — default and validate manifests
//! - `convert` — print the Consul config entry for a manifest
//! - `compare` — check a manifest against a stored entry
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates; no business logic here.
//! - Handlers write to a caller-supplied writer so output is testable.

pub mod compare;
pub mod config;
pub mod convert;
pub mod validate;
