use serde_json::{Map, Value};

use crate::error::ApiError;

/// The sole domain entity: one Key/Value row in the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    /// Validate an upsert body of the form `{ "<key>": "<value>" }`.
    ///
    /// Exactly one field, key and value both non-empty strings. Anything
    /// else is rejected before the spreadsheet is touched.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ApiError> {
        let mut fields = body.iter();
        let (key, value) = match (fields.next(), fields.next()) {
            (Some(field), None) => field,
            _ => return Err(ApiError::InvalidInput),
        };

        let value = value.as_str().ok_or(ApiError::InvalidInput)?;
        if key.is_empty() || value.is_empty() {
            return Err(ApiError::InvalidInput);
        }

        Ok(Self {
            key: key.clone(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("body must be an object")
    }

    #[test]
    fn single_string_field_is_accepted() {
        let pair = Pair::from_body(&body(json!({ "color": "blue" }))).unwrap();
        assert_eq!(pair.key, "color");
        assert_eq!(pair.value, "blue");
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(Pair::from_body(&body(json!({}))).is_err());
    }

    #[test]
    fn two_fields_are_rejected() {
        assert!(Pair::from_body(&body(json!({ "a": "1", "b": "2" }))).is_err());
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(Pair::from_body(&body(json!({ "": "blue" }))).is_err());
    }

    #[test]
    fn empty_value_is_rejected() {
        assert!(Pair::from_body(&body(json!({ "color": "" }))).is_err());
    }

    #[test]
    fn non_string_value_is_rejected() {
        assert!(Pair::from_body(&body(json!({ "color": 7 }))).is_err());
        assert!(Pair::from_body(&body(json!({ "color": null }))).is_err());
        assert!(Pair::from_body(&body(json!({ "color": ["blue"] }))).is_err());
    }
}
