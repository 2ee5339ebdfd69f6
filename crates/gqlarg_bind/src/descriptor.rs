//! Type descriptors.
//!
//! A descriptor is the ahead-of-time registered capability table for one
//! target type: its constructors (with parameter names and shapes) and its
//! settable properties. Descriptors stand in for runtime reflection; the
//! binding strategy resolution over them matches what a reflective
//! implementation would discover.

use crate::bound::{BoundArgs, BoundValue};
use gqlarg_core::{BindError, BindResult, FieldPath};
use std::any::{Any, TypeId};
use std::fmt;

/// The built-in scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Int,
    Float,
    String,
    Id,
}

impl ScalarKind {
    /// Returns the GraphQL-facing name of the scalar.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Id => "ID",
        }
    }
}

/// Reference to a registered composite type.
#[derive(Debug, Clone, Copy)]
pub struct CompositeRef {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
}

impl CompositeRef {
    /// Creates a reference to `T`'s descriptor.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the short type name, without the module path.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

/// The declared shape of one constructor parameter or settable property.
#[derive(Debug, Clone)]
pub enum ValueShape {
    /// A scalar leaf.
    Scalar(ScalarKind),
    /// An ordered sequence of elements with a common shape.
    List(Box<ValueShape>),
    /// A nested object bound through another registered descriptor.
    Composite(CompositeRef),
}

impl ValueShape {
    /// Shorthand for a `Boolean` scalar shape.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Scalar(ScalarKind::Boolean)
    }

    /// Shorthand for an `Int` scalar shape.
    #[must_use]
    pub fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    /// Shorthand for a `Float` scalar shape.
    #[must_use]
    pub fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    /// Shorthand for a `String` scalar shape.
    #[must_use]
    pub fn string() -> Self {
        Self::Scalar(ScalarKind::String)
    }

    /// Shorthand for an `ID` scalar shape.
    #[must_use]
    pub fn id() -> Self {
        Self::Scalar(ScalarKind::Id)
    }

    /// A list of elements with the given shape.
    #[must_use]
    pub fn list(element: ValueShape) -> Self {
        Self::List(Box::new(element))
    }

    /// A nested composite bound through `T`'s registered descriptor.
    #[must_use]
    pub fn composite<T: Any>() -> Self {
        Self::Composite(CompositeRef::of::<T>())
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{}", kind.name()),
            Self::List(element) => write!(f, "[{element}]"),
            Self::Composite(composite) => write!(f, "{}", composite.short_name()),
        }
    }
}

/// A named constructor parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub(crate) name: String,
    pub(crate) shape: ValueShape,
}

type ConstructFn = Box<dyn Fn(BoundArgs) -> BindResult<Box<dyn Any>> + Send + Sync>;

/// One candidate constructor for a target type.
///
/// The construction function receives the bound parameter values by name and
/// produces the instance; a parameter list that is empty makes this a
/// no-argument constructor, eligible for the setter-based strategy.
pub struct ConstructorDescriptor {
    params: Vec<Param>,
    primary: bool,
    construct: ConstructFn,
}

impl ConstructorDescriptor {
    /// Creates a constructor descriptor from a typed construction function.
    pub fn new<T, F>(construct: F) -> Self
    where
        T: Any,
        F: Fn(BoundArgs) -> BindResult<T> + Send + Sync + 'static,
    {
        Self {
            params: Vec::new(),
            primary: false,
            construct: Box::new(move |args| {
                construct(args).map(|instance| Box::new(instance) as Box<dyn Any>)
            }),
        }
    }

    /// Declares a parameter, in positional order.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, shape: ValueShape) -> Self {
        self.params.push(Param {
            name: name.into(),
            shape,
        });
        self
    }

    /// Marks this constructor as the primary one.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn is_primary(&self) -> bool {
        self.primary
    }

    pub(crate) fn construct(&self, args: BoundArgs) -> BindResult<Box<dyn Any>> {
        (self.construct)(args)
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("params", &self.params)
            .field("primary", &self.primary)
            .finish_non_exhaustive()
    }
}

type ApplyFn = Box<dyn Fn(&mut dyn Any, BoundValue, &FieldPath) -> BindResult<()> + Send + Sync>;

/// One settable property on a target type.
pub struct SetterDescriptor {
    name: String,
    shape: ValueShape,
    apply: ApplyFn,
}

impl SetterDescriptor {
    /// Creates a setter descriptor from a typed apply function.
    pub fn new<T, F>(name: impl Into<String>, shape: ValueShape, apply: F) -> Self
    where
        T: Any,
        F: Fn(&mut T, BoundValue, &FieldPath) -> BindResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            shape,
            apply: Box::new(move |target, value, path| {
                let target = target.downcast_mut::<T>().ok_or_else(|| {
                    BindError::internal(
                        path.clone(),
                        format!("setter expects {}", std::any::type_name::<T>()),
                    )
                })?;
                apply(target, value, path)
            }),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shape(&self) -> &ValueShape {
        &self.shape
    }

    pub(crate) fn apply(
        &self,
        target: &mut dyn Any,
        value: BoundValue,
        path: &FieldPath,
    ) -> BindResult<()> {
        (self.apply)(target, value, path)
    }
}

impl fmt::Debug for SetterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetterDescriptor")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// The capability table for one target type.
#[derive(Debug)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: String,
    constructors: Vec<ConstructorDescriptor>,
    setters: Vec<SetterDescriptor>,
}

impl TypeDescriptor {
    /// Creates an empty descriptor for `T` with a readable name.
    pub fn new<T: Any>(type_name: impl Into<String>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name.into(),
            constructors: Vec::new(),
            setters: Vec::new(),
        }
    }

    /// Adds a candidate constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Adds a settable property.
    #[must_use]
    pub fn with_setter(mut self, setter: SetterDescriptor) -> Self {
        self.setters.push(setter);
        self
    }

    /// Returns the readable type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    pub(crate) fn has_setters(&self) -> bool {
        !self.setters.is_empty()
    }

    pub(crate) fn setter(&self, name: &str) -> Option<&SetterDescriptor> {
        self.setters.iter().find(|setter| setter.name() == name)
    }
}
