//! # Field Paths
//!
//! Structured locators for the part of a resource a validation error
//! concerns, e.g. `spec.sources[2].permissions[0].pathPrefix`.
//!
//! A `FieldPath` is a list of segments. Validation code threads a path
//! through nested calls, extending it with [`FieldPath::child`] for named
//! fields and [`FieldPath::index`] for list positions. Rendering follows the
//! Kubernetes `field.Path` format: fields are joined with `.`, indices are
//! appended as `[i]` with no separator.

use std::fmt;

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field, rendered as `.name` (or `name` at the root).
    Field(String),
    /// A list position, rendered as `[i]`.
    Index(usize),
}

/// A path from the resource root to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Start a new path at a root field (typically `"spec"`).
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(root.into())],
        }
    }

    /// A path one named field deeper than `self`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// A path addressing position `i` of the list at `self`.
    pub fn index(&self, i: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(i));
        Self { segments }
    }

    /// The segments of this path, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}
