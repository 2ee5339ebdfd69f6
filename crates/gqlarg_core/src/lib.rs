//! Core utilities for gqlarg.
//!
//! This crate provides foundational types used throughout gqlarg:
//! - `path`: Field path tracking through nested argument trees
//! - `error`: Binding error taxonomy

pub mod error;
pub mod path;

pub use error::{BindError, BindResult};
pub use path::{FieldPath, PathSegment};
