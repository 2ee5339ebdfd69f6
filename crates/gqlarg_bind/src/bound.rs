//! Bound values and typed extraction.
//!
//! Binding a shape produces an erased [`BoundValue`]; constructor and setter
//! functions pull concrete types back out through the `take*` accessors.
//! Absence rules live here: an `Absent` or `Null` bound value extracted
//! through a non-optional accessor becomes the type's absence value
//! (`Default::default()`, or an empty list), never an error.

use gqlarg_core::{BindError, BindResult, FieldPath};
use gqlarg_value::ArgField;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::fmt;

/// The erased result of binding one declared shape.
pub enum BoundValue {
    /// The key was not present in the input.
    Absent,
    /// The key was sent as an explicit `null`.
    Null,
    /// A coerced scalar, boxed as its concrete Rust type (`bool`, `i64`,
    /// `f64` or `String`).
    Scalar(Box<dyn Any>),
    /// Bound list elements, in input order.
    List(Vec<BoundValue>),
    /// A constructed composite instance.
    Object(Box<dyn Any>),
}

impl BoundValue {
    /// Extracts a required value, substituting `T::default()` for absence.
    pub fn take<T: Any + Default>(self, path: &FieldPath) -> BindResult<T> {
        match self {
            Self::Absent | Self::Null => Ok(T::default()),
            Self::Scalar(boxed) | Self::Object(boxed) => downcast(boxed, path),
            Self::List(_) => Err(list_through_scalar::<T>(path)),
        }
    }

    /// Extracts an optional value; absence and null both become `None`.
    pub fn take_opt<T: Any>(self, path: &FieldPath) -> BindResult<Option<T>> {
        match self {
            Self::Absent | Self::Null => Ok(None),
            Self::Scalar(boxed) | Self::Object(boxed) => downcast(boxed, path).map(Some),
            Self::List(_) => Err(list_through_scalar::<T>(path)),
        }
    }

    /// Extracts a value keeping the full omitted/null/value distinction.
    pub fn take_field<T: Any>(self, path: &FieldPath) -> BindResult<ArgField<T>> {
        match self {
            Self::Absent => Ok(ArgField::Omitted),
            Self::Null => Ok(ArgField::Null),
            Self::Scalar(boxed) | Self::Object(boxed) => {
                downcast(boxed, path).map(ArgField::Value)
            }
            Self::List(_) => Err(list_through_scalar::<T>(path)),
        }
    }

    /// Extracts a list element-wise; absence and null become an empty list.
    ///
    /// List elements have no absence slot, so a `null` element surfaces as a
    /// coercion error rather than a default.
    pub fn take_list<T: Any>(self, path: &FieldPath) -> BindResult<Vec<T>> {
        match self {
            Self::Absent | Self::Null => Ok(Vec::new()),
            Self::List(elements) => elements
                .into_iter()
                .enumerate()
                .map(|(index, element)| {
                    let element_path = path.element(index);
                    match element {
                        Self::Scalar(boxed) | Self::Object(boxed) => {
                            downcast(boxed, &element_path)
                        }
                        Self::Absent | Self::Null => Err(BindError::coercion(
                            element_path,
                            short_type_name::<T>(),
                            "null",
                        )),
                        Self::List(_) => Err(BindError::internal(
                            element_path,
                            "nested list extracted through a flat list accessor",
                        )),
                    }
                })
                .collect(),
            Self::Scalar(_) | Self::Object(_) => Err(BindError::internal(
                path.clone(),
                "non-list value extracted through a list accessor",
            )),
        }
    }

    /// Extracts an optional list; absence and null become `None`.
    pub fn take_opt_list<T: Any>(self, path: &FieldPath) -> BindResult<Option<Vec<T>>> {
        match self {
            Self::Absent | Self::Null => Ok(None),
            other => other.take_list(path).map(Some),
        }
    }
}

impl fmt::Debug for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "Absent"),
            Self::Null => write!(f, "Null"),
            Self::Scalar(_) => write!(f, "Scalar(..)"),
            Self::List(elements) => f.debug_tuple("List").field(elements).finish(),
            Self::Object(_) => write!(f, "Object(..)"),
        }
    }
}

fn downcast<T: Any>(boxed: Box<dyn Any>, path: &FieldPath) -> BindResult<T> {
    boxed.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        BindError::internal(
            path.clone(),
            format!("bound value is not a {}", short_type_name::<T>()),
        )
    })
}

fn list_through_scalar<T>(path: &FieldPath) -> BindError {
    BindError::internal(
        path.clone(),
        format!(
            "list value extracted through a non-list accessor ({})",
            short_type_name::<T>()
        ),
    )
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

/// Bound parameter values for one constructor invocation or setter pass.
pub struct BoundArgs {
    values: FxHashMap<String, BoundValue>,
    path: FieldPath,
}

impl BoundArgs {
    pub(crate) fn new(path: FieldPath) -> Self {
        Self {
            values: FxHashMap::default(),
            path,
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: BoundValue) {
        self.values.insert(name.into(), value);
    }

    /// Takes a required parameter, substituting `T::default()` for absence.
    pub fn take<T: Any + Default>(&mut self, name: &str) -> BindResult<T> {
        let (value, path) = self.remove(name);
        value.take(&path)
    }

    /// Takes an optional parameter.
    pub fn take_opt<T: Any>(&mut self, name: &str) -> BindResult<Option<T>> {
        let (value, path) = self.remove(name);
        value.take_opt(&path)
    }

    /// Takes a parameter keeping the omitted/null/value distinction.
    pub fn take_field<T: Any>(&mut self, name: &str) -> BindResult<ArgField<T>> {
        let (value, path) = self.remove(name);
        value.take_field(&path)
    }

    /// Takes a list parameter, substituting an empty list for absence.
    pub fn take_list<T: Any>(&mut self, name: &str) -> BindResult<Vec<T>> {
        let (value, path) = self.remove(name);
        value.take_list(&path)
    }

    /// Takes an optional list parameter.
    pub fn take_opt_list<T: Any>(&mut self, name: &str) -> BindResult<Option<Vec<T>>> {
        let (value, path) = self.remove(name);
        value.take_opt_list(&path)
    }

    /// Returns the path of the object being constructed.
    #[must_use]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    fn remove(&mut self, name: &str) -> (BoundValue, FieldPath) {
        let value = self.values.remove(name).unwrap_or(BoundValue::Absent);
        (value, self.path.child(name))
    }
}

impl fmt::Debug for BoundArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundArgs")
            .field("path", &self.path)
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> FieldPath {
        FieldPath::root().child("field")
    }

    #[test]
    fn test_take_substitutes_default_for_absence() {
        let name: String = BoundValue::Absent.take(&path()).unwrap();
        assert_eq!(name, "");
        let count: i64 = BoundValue::Null.take(&path()).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_take_opt_maps_absence_to_none() {
        let value: Option<String> = BoundValue::Absent.take_opt(&path()).unwrap();
        assert!(value.is_none());
        let value: Option<String> = BoundValue::Null.take_opt(&path()).unwrap();
        assert!(value.is_none());
        let value: Option<String> = BoundValue::Scalar(Box::new("x".to_string()))
            .take_opt(&path())
            .unwrap();
        assert_eq!(value.as_deref(), Some("x"));
    }

    #[test]
    fn test_take_field_keeps_tri_state() {
        let omitted: ArgField<String> = BoundValue::Absent.take_field(&path()).unwrap();
        assert!(omitted.is_omitted());
        let null: ArgField<String> = BoundValue::Null.take_field(&path()).unwrap();
        assert!(null.is_null());
        let present: ArgField<String> = BoundValue::Scalar(Box::new("x".to_string()))
            .take_field(&path())
            .unwrap();
        assert!(present.is_present());
    }

    #[test]
    fn test_take_list_rejects_null_element() {
        let value = BoundValue::List(vec![
            BoundValue::Scalar(Box::new("a".to_string())),
            BoundValue::Null,
        ]);
        let err = value.take_list::<String>(&path()).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "field[1]");
    }

    #[test]
    fn test_wrong_downcast_is_internal_error() {
        let value = BoundValue::Scalar(Box::new(1_i64));
        let err = value.take::<String>(&path()).unwrap_err();
        assert!(matches!(err, BindError::Internal { .. }));
    }

    #[test]
    fn test_args_missing_key_is_absent() {
        let mut args = BoundArgs::new(FieldPath::root());
        let value: Option<String> = args.take_opt("missing").unwrap();
        assert!(value.is_none());
    }
}
