//! Declarative validation of json request bodies.
//!
//! a `Schema` lists the accepted string fields and their rules, validating a body
//! checks every field, keeps the first failing rule of each one and strips
//! whatever field the schema does not know about.

use super::responses::{ApiErrorResult, FieldError};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::validate_length;

/// Rules of a single string field, checked in order: presence, type,
/// emptiness (after trimming), min length, max length then pattern
#[derive(Clone)]
pub struct FieldRule {
    name: &'static str,
    min_length: Option<u64>,
    max_length: Option<u64>,
    pattern: Option<(&'static Regex, &'static str)>,
}

impl FieldRule {
    pub fn string(name: &'static str) -> Self {
        FieldRule {
            name,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub fn min(mut self, length: u64) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max(mut self, length: u64) -> Self {
        self.max_length = Some(length);
        self
    }

    /// requires the trimmed value to match `regex`, failing with `message`
    pub fn pattern(mut self, regex: &'static Regex, message: &'static str) -> Self {
        self.pattern = Some((regex, message));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// returns the trimmed value or the first rule it breaks
    pub fn check(&self, value: Option<&Value>) -> Result<String, FieldError> {
        let name = self.name;

        let raw = match value {
            None => return Err(FieldError::new(name, format!("{} is required", name))),
            Some(Value::String(raw)) => raw,
            Some(_) => return Err(FieldError::new(name, format!("{} must be a string", name))),
        };

        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(FieldError::new(
                name,
                format!("empty string can't be used as a {}", name),
            ));
        }

        if let Some(min) = self.min_length {
            if !validate_length(trimmed, Some(min), None, None) {
                return Err(FieldError::new(
                    name,
                    format!("{} can't be shorter than {} characters", name, min),
                ));
            }
        }

        if let Some(max) = self.max_length {
            if !validate_length(trimmed, None, Some(max), None) {
                return Err(FieldError::new(
                    name,
                    format!("{} can't be longer than {} characters", name, max),
                ));
            }
        }

        if let Some((regex, message)) = self.pattern {
            if !regex.is_match(trimmed) {
                return Err(FieldError::new(name, message));
            }
        }

        Ok(String::from(trimmed))
    }
}

pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Schema { fields }
    }

    /// validates every field of the schema, returning the trimmed accepted
    /// values or all the field errors in schema order
    pub fn validate(&self, body: &Value) -> Result<Map<String, Value>, ApiErrorResult> {
        let object = body.as_object();

        let mut accepted = Map::new();
        let mut errors = Vec::new();

        for rule in &self.fields {
            match rule.check(object.and_then(|o| o.get(rule.name))) {
                Ok(value) => {
                    accepted.insert(String::from(rule.name), Value::String(value));
                }
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(accepted)
        } else {
            Err(ApiErrorResult::new(errors))
        }
    }

    /// validates then deserializes the accepted values into `T`
    pub fn parse<T: DeserializeOwned>(&self, body: &Value) -> Result<T, ApiErrorResult> {
        let accepted = self.validate(body)?;

        serde_json::from_value(Value::Object(accepted))
            .map_err(|e| ApiErrorResult::single("body", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use serde::Deserialize;
    use serde_json::json;

    lazy_static! {
        static ref REGEX_DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
        static ref SCHEMA: Schema = Schema::new(vec![
            FieldRule::string("name").max(5),
            FieldRule::string("code")
                .min(2)
                .max(4)
                .pattern(&REGEX_DIGITS, "code must only contain digits"),
        ]);
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Input {
        name: String,
        code: String,
    }

    #[test]
    fn trims_and_strips_unknown_fields() {
        let accepted = SCHEMA
            .validate(&json!({ "name": "  abc ", "code": "12", "admin": true }))
            .unwrap();

        assert_eq!(accepted.len(), 2);
        assert_eq!(accepted["name"], "abc");
        assert_eq!(accepted["code"], "12");
    }

    #[test]
    fn reports_every_failing_field_in_schema_order() {
        let errors = SCHEMA
            .validate(&json!({ "code": "1234567" }))
            .unwrap_err()
            .errors_messages;

        assert_eq!(
            errors,
            vec![
                FieldError::new("name", "name is required"),
                FieldError::new("code", "code can't be longer than 4 characters"),
            ]
        );
    }

    #[test]
    fn first_failing_rule_wins() {
        let errors = SCHEMA
            .validate(&json!({ "name": "ok", "code": "x" }))
            .unwrap_err()
            .errors_messages;

        assert_eq!(
            errors,
            vec![FieldError::new("code", "code can't be shorter than 2 characters")]
        );
    }

    #[test]
    fn pattern_is_checked_last() {
        let errors = SCHEMA
            .validate(&json!({ "name": "ok", "code": "ab" }))
            .unwrap_err()
            .errors_messages;

        assert_eq!(errors, vec![FieldError::new("code", "code must only contain digits")]);
    }

    #[test]
    fn whitespace_only_is_empty() {
        let errors = SCHEMA
            .validate(&json!({ "name": "   ", "code": "12" }))
            .unwrap_err()
            .errors_messages;

        assert_eq!(
            errors,
            vec![FieldError::new("name", "empty string can't be used as a name")]
        );
    }

    #[test]
    fn non_strings_are_type_errors() {
        let errors = SCHEMA
            .validate(&json!({ "name": 12, "code": null }))
            .unwrap_err()
            .errors_messages;

        assert_eq!(
            errors,
            vec![
                FieldError::new("name", "name must be a string"),
                FieldError::new("code", "code must be a string"),
            ]
        );
    }

    #[test]
    fn non_object_body_misses_every_field() {
        let errors = SCHEMA.validate(&json!([1, 2])).unwrap_err().errors_messages;

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "name is required");
    }

    #[test]
    fn length_counts_characters() {
        assert!(SCHEMA.validate(&json!({ "name": "ééééé", "code": "12" })).is_ok());
    }

    #[test]
    fn parses_accepted_values() {
        let input: Input = SCHEMA
            .parse(&json!({ "name": " abc", "code": "123 " }))
            .unwrap();

        assert_eq!(
            input,
            Input {
                name: String::from("abc"),
                code: String::from("123"),
            }
        );
    }
}
