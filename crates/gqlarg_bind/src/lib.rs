//! Argument instantiation for gqlarg.
//!
//! This crate materializes parsed GraphQL argument values into typed
//! application objects:
//! - `descriptor`: Ahead-of-time registered type capability tables
//! - `registry`: Descriptor lookup and binding strategy cache
//! - `bound`: Erased bound values and typed extraction
//! - `instantiator`: Recursive structural binding

pub mod bound;
pub mod descriptor;
pub mod instantiator;
pub mod registry;

pub use bound::{BoundArgs, BoundValue};
pub use descriptor::{
    CompositeRef, ConstructorDescriptor, Param, ScalarKind, SetterDescriptor, TypeDescriptor,
    ValueShape,
};
pub use instantiator::Instantiator;
pub use registry::{BindingStrategy, DescriptorRegistry};

pub use gqlarg_core::{BindError, BindResult, FieldPath, PathSegment};
pub use gqlarg_value::{ArgField, ArgumentValue};
