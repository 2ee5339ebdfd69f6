//! Descriptor registry and strategy cache.

use crate::descriptor::TypeDescriptor;
use gqlarg_core::{BindError, BindResult};
use rustc_hash::FxHashMap;
use std::any::TypeId;
use std::sync::RwLock;
use tracing::debug;

/// How a target type gets materialized.
///
/// Resolved once per type and cached; both outcomes of resolution (a usable
/// strategy or the ambiguity verdict) are cached so repeated binds are
/// consistent and skip re-inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStrategy {
    /// Bind named parameters and invoke the constructor at this index.
    Constructor(usize),
    /// Default-construct through the no-argument constructor at this index,
    /// then apply property setters for the keys present in the input.
    DefaultAndSet(usize),
}

/// Registry of type descriptors, keyed by type identity.
///
/// Registration happens up front; afterwards the registry is shared behind
/// an `Arc` and read concurrently by binding calls.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: FxHashMap<TypeId, TypeDescriptor>,
    strategies: RwLock<FxHashMap<TypeId, BindResult<BindingStrategy>>>,
}

impl DescriptorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor, replacing any previous one for the same type.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        debug!(type_name = descriptor.type_name(), "registering descriptor");
        self.descriptors.insert(descriptor.type_id(), descriptor);
    }

    /// Looks up a descriptor by type identity.
    #[must_use]
    pub fn descriptor(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.descriptors.get(&id)
    }

    /// Returns the number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no descriptors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns the binding strategy for a registered descriptor, computing
    /// and caching it on first use. First computation wins on a race.
    pub fn strategy(&self, descriptor: &TypeDescriptor) -> BindResult<BindingStrategy> {
        let id = descriptor.type_id();
        {
            let cache = self.strategies.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = cache.get(&id) {
                return cached.clone();
            }
        }

        let resolved = resolve_strategy(descriptor);
        debug!(
            type_name = descriptor.type_name(),
            strategy = ?resolved,
            "resolved binding strategy"
        );
        let mut cache = self.strategies.write().unwrap_or_else(|e| e.into_inner());
        cache.entry(id).or_insert(resolved).clone()
    }
}

/// Chooses the constructor a reflective implementation would pick: the one
/// marked primary, or the sole declared one. A no-argument pick with setters
/// available becomes the default-construct-then-set strategy.
fn resolve_strategy(descriptor: &TypeDescriptor) -> BindResult<BindingStrategy> {
    let constructors = descriptor.constructors();
    let mut primaries = constructors
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_primary())
        .map(|(index, _)| index);

    let chosen = match (primaries.next(), primaries.next()) {
        (Some(index), None) => index,
        (None, None) if constructors.len() == 1 => 0,
        _ => {
            return Err(BindError::ambiguous_constructor(descriptor.type_name()));
        }
    };

    if constructors[chosen].params().is_empty() && descriptor.has_setters() {
        Ok(BindingStrategy::DefaultAndSet(chosen))
    } else {
        Ok(BindingStrategy::Constructor(chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ConstructorDescriptor, SetterDescriptor, ValueShape};

    #[derive(Debug, Default)]
    struct Bean {
        name: String,
    }

    fn no_arg_constructor() -> ConstructorDescriptor {
        ConstructorDescriptor::new(|_args| Ok(Bean::default()))
    }

    fn named_constructor() -> ConstructorDescriptor {
        ConstructorDescriptor::new(|mut args| {
            Ok(Bean {
                name: args.take("name")?,
            })
        })
        .param("name", ValueShape::string())
    }

    fn name_setter() -> SetterDescriptor {
        SetterDescriptor::new("name", ValueShape::string(), |bean: &mut Bean, value, path| {
            bean.name = value.take(path)?;
            Ok(())
        })
    }

    #[test]
    fn test_single_constructor_strategy() {
        let descriptor = TypeDescriptor::new::<Bean>("Bean").with_constructor(named_constructor());
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor);

        let descriptor = registry.descriptor(std::any::TypeId::of::<Bean>()).unwrap();
        assert_eq!(
            registry.strategy(descriptor).unwrap(),
            BindingStrategy::Constructor(0)
        );
    }

    #[test]
    fn test_no_arg_constructor_with_setters_uses_setter_strategy() {
        let descriptor = TypeDescriptor::new::<Bean>("Bean")
            .with_constructor(no_arg_constructor())
            .with_setter(name_setter());
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor);

        let descriptor = registry.descriptor(std::any::TypeId::of::<Bean>()).unwrap();
        assert_eq!(
            registry.strategy(descriptor).unwrap(),
            BindingStrategy::DefaultAndSet(0)
        );
    }

    #[test]
    fn test_primary_constructor_wins_over_siblings() {
        let descriptor = TypeDescriptor::new::<Bean>("Bean")
            .with_constructor(no_arg_constructor())
            .with_constructor(named_constructor().primary());
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor);

        let descriptor = registry.descriptor(std::any::TypeId::of::<Bean>()).unwrap();
        assert_eq!(
            registry.strategy(descriptor).unwrap(),
            BindingStrategy::Constructor(1)
        );
    }

    #[test]
    fn test_multiple_constructors_without_primary_is_ambiguous() {
        let descriptor = TypeDescriptor::new::<Bean>("Bean")
            .with_constructor(no_arg_constructor())
            .with_constructor(named_constructor());
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor);

        let descriptor = registry.descriptor(std::any::TypeId::of::<Bean>()).unwrap();
        let err = registry.strategy(descriptor).unwrap_err();
        assert!(matches!(err, BindError::AmbiguousConstructor { .. }));

        // The verdict is cached; a second resolution is identical.
        assert_eq!(registry.strategy(descriptor).unwrap_err(), err);
    }

    #[test]
    fn test_zero_constructors_is_ambiguous() {
        let descriptor = TypeDescriptor::new::<Bean>("Bean").with_setter(name_setter());
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor);

        let descriptor = registry.descriptor(std::any::TypeId::of::<Bean>()).unwrap();
        assert!(registry.strategy(descriptor).is_err());
    }
}
