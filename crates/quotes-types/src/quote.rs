//! Quote types

use crate::{require_non_blank, Author, ValidationError};
use serde::{Deserialize, Serialize};

/// Quote record as stored
///
/// Holds only the owning author's id; the author itself is looked up when
/// the quote is rendered (see [`QuoteView`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub author_id: i64,
    pub text: String,
}

impl Quote {
    /// Apply the allow-listed fields of an update request.
    pub fn apply(&mut self, update: &QuoteUpdate) {
        if let Some(author_id) = update.author_id {
            self.author_id = author_id;
        }
        if let Some(ref text) = update.text {
            self.text = text.clone();
        }
    }
}

/// Quote as returned to clients, with its author embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteView {
    pub id: i64,
    pub author: Author,
    pub text: String,
}

impl QuoteView {
    pub fn new(quote: Quote, author: Author) -> Self {
        Self {
            id: quote.id,
            author,
            text: quote.text,
        }
    }
}

/// Quote creation request (`POST /authors/{id}/quotes`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewQuote {
    pub text: String,
}

impl NewQuote {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("text", &self.text)
    }
}

/// Partial quote update (`PUT /quotes/{id}`)
///
/// `id` is not assignable. Absent or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteUpdate {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
}

impl QuoteUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.text {
            Some(ref text) => require_non_blank("text", text),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tolstoy() -> Author {
        Author {
            id: 1,
            name: "Tolstoy".to_string(),
            surname: "Leo".to_string(),
        }
    }

    #[test]
    fn test_view_embeds_author() {
        let quote = Quote {
            id: 1,
            author_id: 1,
            text: "War is peace".to_string(),
        };
        let value = serde_json::to_value(QuoteView::new(quote, tolstoy())).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "author": {"id": 1, "name": "Tolstoy", "surname": "Leo"},
                "text": "War is peace"
            })
        );
    }

    #[test]
    fn test_partial_update_keeps_author() {
        let mut quote = Quote {
            id: 3,
            author_id: 7,
            text: "old".to_string(),
        };
        let update: QuoteUpdate = serde_json::from_str(r#"{"text":"new"}"#).unwrap();
        quote.apply(&update);
        assert_eq!(quote.author_id, 7);
        assert_eq!(quote.text, "new");
        assert_eq!(quote.id, 3);
    }

    #[test]
    fn test_update_rejects_id() {
        let err = serde_json::from_str::<QuoteUpdate>(r#"{"id":9,"text":"x"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `id`"));
    }

    #[test]
    fn test_blank_text_rejected() {
        let new_quote = NewQuote {
            text: "   ".to_string(),
        };
        assert_eq!(new_quote.validate(), Err(ValidationError::BlankField("text")));

        let update = QuoteUpdate {
            text: Some(String::new()),
            author_id: None,
        };
        assert!(update.validate().is_err());
        assert!(QuoteUpdate::default().validate().is_ok());
    }
}
