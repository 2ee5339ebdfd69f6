//! Typed omitted/null/value fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A typed argument field that keeps "not sent" apart from "sent as null".
///
/// Collapsing this into `Option<T>` would lose the distinction the wire
/// format carries, so the three states are explicit. On input, pair with
/// `#[serde(default)]` so a missing key deserializes as `Omitted`; on
/// output, pair with `#[serde(skip_serializing_if = "ArgField::is_omitted")]`
/// so an omitted field never writes its key at all.
///
/// # Example
///
/// ```
/// use gqlarg_value::ArgField;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct ProjectInput {
///     slug: String,
///     #[serde(default, skip_serializing_if = "ArgField::is_omitted")]
///     description: ArgField<String>,
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgField<T> {
    /// The field was not sent.
    Omitted,
    /// The field was sent as an explicit `null`.
    Null,
    /// The field was sent with a value.
    Value(T),
}

impl<T> ArgField<T> {
    /// Returns true if the field was not sent.
    #[must_use]
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    /// Returns true if the field was sent as `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the field carries a value.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns a reference to the value, if present.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the field, returning the value if present.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Maps the contained value, preserving the omitted/null states.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ArgField<U> {
        match self {
            Self::Omitted => ArgField::Omitted,
            Self::Null => ArgField::Null,
            Self::Value(v) => ArgField::Value(f(v)),
        }
    }

    /// Converts from `&ArgField<T>` to `ArgField<&T>`.
    #[must_use]
    pub fn as_ref(&self) -> ArgField<&T> {
        match self {
            Self::Omitted => ArgField::Omitted,
            Self::Null => ArgField::Null,
            Self::Value(v) => ArgField::Value(v),
        }
    }
}

// Manual impl so `T: Default` is not required for a field to default to
// Omitted under `#[serde(default)]`.
impl<T> Default for ArgField<T> {
    fn default() -> Self {
        Self::Omitted
    }
}

impl<T> From<T> for ArgField<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for ArgField<T> {
    /// `None` maps to `Null`; use [`ArgField::Omitted`] for fields that
    /// should not be sent at all.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

impl<T: Serialize> Serialize for ArgField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Omitted fields are dropped by skip_serializing_if before this
            // runs; a bare Omitted falls back to null.
            Self::Omitted | Self::Null => serializer.serialize_none(),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ArgField<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A key that is present deserializes here; a missing key never
        // reaches this impl and falls back to Default (Omitted).
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Value(v),
            None => Self::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct ProjectInput {
        slug: String,
        #[serde(default, skip_serializing_if = "ArgField::is_omitted")]
        description: ArgField<String>,
    }

    #[test]
    fn test_omitted_field_writes_no_key() {
        let input = ProjectInput {
            slug: "spring".to_string(),
            description: ArgField::Omitted,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, json!({ "slug": "spring" }));
    }

    #[test]
    fn test_null_field_writes_null() {
        let input = ProjectInput {
            slug: "spring".to_string(),
            description: ArgField::Null,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, json!({ "slug": "spring", "description": null }));
    }

    #[test]
    fn test_present_field_writes_value() {
        let input = ProjectInput {
            slug: "spring".to_string(),
            description: ArgField::Value("framework".to_string()),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            json!({ "slug": "spring", "description": "framework" })
        );
    }

    #[test]
    fn test_deserialize_distinguishes_all_three_states() {
        let omitted: ProjectInput = serde_json::from_value(json!({ "slug": "a" })).unwrap();
        assert!(omitted.description.is_omitted());

        let null: ProjectInput =
            serde_json::from_value(json!({ "slug": "a", "description": null })).unwrap();
        assert!(null.description.is_null());

        let present: ProjectInput =
            serde_json::from_value(json!({ "slug": "a", "description": "d" })).unwrap();
        assert_eq!(present.description.value().map(String::as_str), Some("d"));
    }

    #[test]
    fn test_map_preserves_state() {
        let null: ArgField<String> = ArgField::Null;
        assert!(null.map(|s| s.len()).is_null());
        assert_eq!(ArgField::Value("ab".to_string()).map(|s| s.len()), ArgField::Value(2));
    }
}
