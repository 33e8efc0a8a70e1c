//! Foreign-key ids sent in request bodies.
//!
//! Form-driven clients post `<select>` values, so an id may arrive as a JSON
//! number or as its decimal string.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// An id as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(DbId),
    Text(String),
}

/// Resolve an optional id field.
///
/// Blank strings count as absent. Other strings must hold a decimal integer.
pub fn parse_id(field: &str, value: Option<IdValue>) -> Result<Option<DbId>, CoreError> {
    match value {
        None => Ok(None),
        Some(IdValue::Number(id)) => Ok(Some(id)),
        Some(IdValue::Text(raw)) => match raw.trim() {
            "" => Ok(None),
            digits => digits
                .parse::<DbId>()
                .map(Some)
                .map_err(|_| CoreError::Validation(format!("{field} inválido: '{raw}'"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[derive(Deserialize)]
    struct Body {
        projeto_id: Option<IdValue>,
    }

    fn body(json: &str) -> Option<IdValue> {
        serde_json::from_str::<Body>(json).unwrap().projeto_id
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_id("projeto_id", body(r#"{"projeto_id": 7}"#)).unwrap(), Some(7));
        assert_eq!(parse_id("projeto_id", body(r#"{"projeto_id": "7"}"#)).unwrap(), Some(7));
        assert_eq!(parse_id("projeto_id", body(r#"{"projeto_id": " 12 "}"#)).unwrap(), Some(12));
    }

    #[test]
    fn null_missing_and_blank_are_none() {
        assert_eq!(parse_id("projeto_id", body(r#"{"projeto_id": null}"#)).unwrap(), None);
        assert_eq!(parse_id("projeto_id", body("{}")).unwrap(), None);
        assert_eq!(parse_id("projeto_id", body(r#"{"projeto_id": ""}"#)).unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_matches!(
            parse_id("squad_id", Some(IdValue::Text("abc".into()))),
            Err(CoreError::Validation(msg)) if msg.contains("squad_id")
        );
        assert_matches!(
            parse_id("squad_id", Some(IdValue::Text("1.5".into()))),
            Err(CoreError::Validation(_))
        );
    }
}
