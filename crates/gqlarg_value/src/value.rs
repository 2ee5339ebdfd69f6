//! The argument value tree.

use indexmap::IndexMap;

/// A parsed request argument, with explicit presence semantics.
///
/// The three-way distinction between [`Absent`](ArgumentValue::Absent)
/// (field not sent), [`Null`](ArgumentValue::Null) (field sent as `null`)
/// and a present value is load-bearing: optional-field binding depends on
/// it and it must survive a round trip through the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// The field was not sent at all. Never stored inside a parsed tree;
    /// arises when looking up a missing object key.
    Absent,
    /// The field was sent as an explicit `null`.
    Null,
    /// A boolean scalar.
    Boolean(bool),
    /// An integer scalar.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar.
    String(String),
    /// An ordered sequence of values.
    List(Vec<ArgumentValue>),
    /// A nested mapping with string keys, unique per level, in the order
    /// they were sent.
    Object(IndexMap<String, ArgumentValue>),
}

/// Lookup result for keys missing from an object.
static ABSENT: ArgumentValue = ArgumentValue::Absent;

impl ArgumentValue {
    /// Builds an object value from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ArgumentValue)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Builds a list value.
    pub fn list<I: IntoIterator<Item = ArgumentValue>>(elements: I) -> Self {
        Self::List(elements.into_iter().collect())
    }

    /// Returns true if the value is `Absent`.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns true if the value is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the value is neither `Absent` nor `Null`.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent | Self::Null)
    }

    /// Looks up a key in an object value.
    ///
    /// Missing keys come back as [`ArgumentValue::Absent`], which is what
    /// keeps "not sent" distinguishable from "sent as null" during binding.
    /// Lookup on a non-object also yields `Absent`.
    #[must_use]
    pub fn get(&self, key: &str) -> &ArgumentValue {
        match self {
            Self::Object(entries) => entries.get(key).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }

    /// Returns the object entries, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, ArgumentValue>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the list elements, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[ArgumentValue]> {
        match self {
            Self::List(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the string contents, if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a short name for the value's kind, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_absent() {
        let value = ArgumentValue::object([("name", ArgumentValue::from("test"))]);
        assert!(value.get("missing").is_absent());
        assert_eq!(value.get("name").as_str(), Some("test"));
    }

    #[test]
    fn test_null_key_stays_null() {
        let value = ArgumentValue::object([("name", ArgumentValue::Null)]);
        assert!(value.get("name").is_null());
        assert!(!value.get("name").is_absent());
    }

    #[test]
    fn test_object_preserves_insertion_order() {
        let value = ArgumentValue::object([
            ("b", ArgumentValue::from(1)),
            ("a", ArgumentValue::from(2)),
        ]);
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ArgumentValue::Null.kind(), "null");
        assert_eq!(ArgumentValue::list([]).kind(), "list");
        assert_eq!(ArgumentValue::from(1.5).kind(), "float");
    }
}
