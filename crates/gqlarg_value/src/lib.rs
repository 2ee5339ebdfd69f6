//! Argument value model for gqlarg.
//!
//! This crate provides the loosely-typed side of argument binding:
//! - `value`: The `ArgumentValue` tree parsed from a request
//! - `reader`: Conversions between JSON transport payloads and values
//! - `field`: `ArgField<T>`, a typed omitted/null/value wrapper

pub mod field;
pub mod reader;
pub mod value;

pub use field::ArgField;
pub use reader::{from_json, to_json};
pub use value::ArgumentValue;
