//! Author types

use crate::{require_non_blank, ValidationError};
use serde::{Deserialize, Serialize};

/// Surname stored when the caller does not provide one
pub const DEFAULT_SURNAME: &str = "Иванов";

/// Author record
///
/// Serializes as `{"id", "name", "surname"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

/// Author creation request
///
/// Only `name` and `surname` are accepted; any other key is rejected during
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewAuthor {
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>, surname: Option<String>) -> Self {
        Self {
            name: name.into(),
            surname,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("name", &self.name)
    }

    /// Surname to persist, falling back to [`DEFAULT_SURNAME`].
    pub fn surname_or_default(&self) -> &str {
        self.surname.as_deref().unwrap_or(DEFAULT_SURNAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_serialization_shape() {
        let author = Author {
            id: 1,
            name: "Tolstoy".to_string(),
            surname: "Leo".to_string(),
        };
        let value = serde_json::to_value(&author).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "name": "Tolstoy", "surname": "Leo"})
        );
    }

    #[test]
    fn test_surname_defaults_when_missing_or_null() {
        let missing: NewAuthor = serde_json::from_str(r#"{"name":"Pushkin"}"#).unwrap();
        assert_eq!(missing.surname_or_default(), DEFAULT_SURNAME);

        let null: NewAuthor =
            serde_json::from_str(r#"{"name":"Pushkin","surname":null}"#).unwrap();
        assert_eq!(null.surname_or_default(), DEFAULT_SURNAME);

        let given: NewAuthor =
            serde_json::from_str(r#"{"name":"Pushkin","surname":"Alexander"}"#).unwrap();
        assert_eq!(given.surname_or_default(), "Alexander");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = serde_json::from_str::<NewAuthor>(r#"{"name":"Gogol","age":42}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `age`"));
    }

    #[test]
    fn test_name_required() {
        assert!(serde_json::from_str::<NewAuthor>(r#"{"surname":"Leo"}"#).is_err());
        assert_eq!(
            NewAuthor::new("  ", None).validate(),
            Err(ValidationError::BlankField("name"))
        );
        assert!(NewAuthor::new("Chekhov", None).validate().is_ok());
    }
}
