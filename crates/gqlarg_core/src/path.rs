//! Field path representation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single step into a nested argument tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PathSegment {
    /// An object field, by name.
    Field(String),
    /// A list element, by position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name}"),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// A path from the binding root down to one field or list element.
///
/// Used as the coordinate system for binding diagnostics, the way source
/// spans locate parser diagnostics. Renders as `book.author.firstName` or
/// `items[1].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path pointing at the binding root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from existing segments.
    #[must_use]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Pushes an object field onto the path.
    pub fn push_field(&mut self, name: impl Into<String>) {
        self.segments.push(PathSegment::Field(name.into()));
    }

    /// Pushes a list index onto the path.
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Pops the innermost segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Returns a copy extended with one object field.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push_field(name);
        path
    }

    /// Returns a copy extended with one list index.
    #[must_use]
    pub fn element(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.push_index(index);
        path
    }

    /// Returns true if this path points at the binding root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let mut path = FieldPath::root();
        path.push_field("book");
        path.push_field("author");
        path.push_field("firstName");
        assert_eq!(path.to_string(), "book.author.firstName");
    }

    #[test]
    fn test_path_display_with_index() {
        let mut path = FieldPath::root();
        path.push_field("items");
        path.push_index(1);
        path.push_field("name");
        assert_eq!(path.to_string(), "items[1].name");
    }

    #[test]
    fn test_root_path_display() {
        assert_eq!(FieldPath::root().to_string(), "$");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn test_child_and_element_do_not_mutate() {
        let path = FieldPath::root().child("items");
        let elem = path.element(0);
        assert_eq!(path.len(), 1);
        assert_eq!(elem.to_string(), "items[0]");
    }
}
