//! The argument instantiator.
//!
//! Walks a parsed [`ArgumentValue`] tree against registered type
//! descriptors and materializes the strongly-typed object graph. Stateless
//! per call and free of I/O; the only shared state is the registry's
//! strategy cache.

use crate::bound::{BoundArgs, BoundValue};
use crate::descriptor::{CompositeRef, ScalarKind, ValueShape};
use crate::registry::{BindingStrategy, DescriptorRegistry};
use gqlarg_core::{BindError, BindResult, FieldPath};
use gqlarg_value::ArgumentValue;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, trace};

/// Materializes argument values into typed instances.
#[derive(Debug, Clone)]
pub struct Instantiator {
    registry: Arc<DescriptorRegistry>,
}

impl Instantiator {
    /// Creates an instantiator over a shared descriptor registry.
    #[must_use]
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    /// Instantiates `T` from a parsed argument value.
    ///
    /// A `Null` or `Absent` input short-circuits to `Ok(None)`. Any error in
    /// a nested field aborts the whole call; nothing partial is returned.
    pub fn instantiate<T: Any>(&self, value: &ArgumentValue) -> BindResult<Option<T>> {
        if !value.is_present() {
            return Ok(None);
        }
        let path = FieldPath::root();
        let composite = CompositeRef::of::<T>();
        let bound = self.bind_composite(&composite, value, &path)?;
        match bound.take_opt::<T>(&path)? {
            Some(instance) => Ok(Some(instance)),
            None => Err(BindError::internal(path, "composite bound to no value")),
        }
    }

    /// Binds one declared shape against one value, recursing through lists
    /// and nested composites.
    fn bind_shape(
        &self,
        shape: &ValueShape,
        value: &ArgumentValue,
        path: &FieldPath,
    ) -> BindResult<BoundValue> {
        match value {
            ArgumentValue::Absent => Ok(BoundValue::Absent),
            ArgumentValue::Null => Ok(BoundValue::Null),
            present => match shape {
                ValueShape::Scalar(kind) => {
                    coerce_scalar(*kind, present, path).map(BoundValue::Scalar)
                }
                ValueShape::List(element) => {
                    let Some(elements) = present.as_list() else {
                        return Err(BindError::coercion(
                            path.clone(),
                            shape.to_string(),
                            present.kind(),
                        ));
                    };
                    let bound = elements
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            self.bind_shape(element, item, &path.element(index))
                        })
                        .collect::<BindResult<Vec<_>>>()?;
                    Ok(BoundValue::List(bound))
                }
                ValueShape::Composite(composite) => {
                    self.bind_composite(composite, present, path)
                }
            },
        }
    }

    /// Binds a present value against a registered composite type.
    fn bind_composite(
        &self,
        composite: &CompositeRef,
        value: &ArgumentValue,
        path: &FieldPath,
    ) -> BindResult<BoundValue> {
        let Some(descriptor) = self.registry.descriptor(composite.id) else {
            return Err(BindError::unregistered_type(
                composite.short_name(),
                path.clone(),
            ));
        };
        let Some(entries) = value.as_object() else {
            return Err(BindError::coercion(
                path.clone(),
                descriptor.type_name(),
                value.kind(),
            ));
        };

        let strategy = self.registry.strategy(descriptor)?;
        debug!(type_name = descriptor.type_name(), ?strategy, %path, "binding composite");

        match strategy {
            BindingStrategy::Constructor(index) => {
                let constructor = &descriptor.constructors()[index];
                let mut args = BoundArgs::new(path.clone());
                for param in constructor.params() {
                    let field_path = path.child(&param.name);
                    let bound = self.bind_shape(&param.shape, value.get(&param.name), &field_path)?;
                    trace!(%field_path, bound = ?bound, "bound constructor parameter");
                    args.insert(param.name.clone(), bound);
                }
                constructor.construct(args).map(BoundValue::Object)
            }
            BindingStrategy::DefaultAndSet(index) => {
                let constructor = &descriptor.constructors()[index];
                let mut instance = constructor.construct(BoundArgs::new(path.clone()))?;
                for (key, entry) in entries {
                    let Some(setter) = descriptor.setter(key) else {
                        trace!(
                            key = key.as_str(),
                            type_name = descriptor.type_name(),
                            "ignoring unknown key"
                        );
                        continue;
                    };
                    let field_path = path.child(key);
                    let bound = self.bind_shape(setter.shape(), entry, &field_path)?;
                    setter.apply(instance.as_mut(), bound, &field_path)?;
                }
                Ok(BoundValue::Object(instance))
            }
        }
    }
}

/// Coerces a present scalar value to its declared kind.
///
/// Allowed conversions are kind identity, `Int` to `Float` widening, and
/// `ID` accepting both strings and integers. Anything else is a coercion
/// error carrying the field path.
#[allow(clippy::cast_precision_loss)]
fn coerce_scalar(
    kind: ScalarKind,
    value: &ArgumentValue,
    path: &FieldPath,
) -> BindResult<Box<dyn Any>> {
    match (kind, value) {
        (ScalarKind::Boolean, ArgumentValue::Boolean(b)) => Ok(Box::new(*b)),
        (ScalarKind::Int, ArgumentValue::Int(i)) => Ok(Box::new(*i)),
        (ScalarKind::Float, ArgumentValue::Float(f)) => Ok(Box::new(*f)),
        (ScalarKind::Float, ArgumentValue::Int(i)) => Ok(Box::new(*i as f64)),
        (ScalarKind::String | ScalarKind::Id, ArgumentValue::String(s)) => {
            Ok(Box::new(s.clone()))
        }
        (ScalarKind::Id, ArgumentValue::Int(i)) => Ok(Box::new(i.to_string())),
        _ => Err(BindError::coercion(path.clone(), kind.name(), value.kind())),
    }
}
