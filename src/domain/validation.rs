//! Field-level validation shared by every form.
//!
//! Rules are plain data: each entity declares a table of [`Rule`]s that is
//! walked in declaration order, so the resulting [`Errors`] list is
//! deterministic and can be compared verbatim in tests.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("must not be empty")]
    Required,

    #[error("numeric value out of bounds (<{0} digits>.<0 digits> expected)")]
    Digits(usize),

    #[error("invalid value")]
    TypeMismatch,

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    Duplicate,
}

impl Violation {
    pub fn code(&self) -> &'static str {
        match self {
            Violation::Required => "required",
            Violation::Digits(_) => "digits",
            Violation::TypeMismatch => "typeMismatch",
            Violation::NotFound => "notFound",
            Violation::Duplicate => "duplicate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub violation: Violation,
    /// Raw submitted text that could not be converted, echoed back to the form.
    pub rejected_value: Option<String>,
}

impl FieldError {
    pub fn new(field: &'static str, violation: Violation) -> Self {
        FieldError { field, violation, rejected_value: None }
    }

    pub fn rejected(field: &'static str, violation: Violation, value: impl Into<String>) -> Self {
        FieldError { field, violation, rejected_value: Some(value.into()) }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 4)?;
        state.serialize_field("field", self.field)?;
        state.serialize_field("code", self.violation.code())?;
        state.serialize_field("message", &self.violation.to_string())?;
        match &self.rejected_value {
            Some(value) => state.serialize_field("rejectedValue", value)?,
            None => state.skip_field("rejectedValue")?,
        }
        state.end()
    }
}

/// Ordered set of field errors attached to one model attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Errors(Vec<FieldError>);

impl Errors {
    pub fn new() -> Self {
        Errors(Vec::new())
    }

    pub fn push(&mut self, field: &'static str, violation: Violation) {
        self.0.push(FieldError::new(field, violation));
    }

    /// Records a conversion failure together with the text that was submitted.
    pub fn reject(&mut self, field: &'static str, violation: Violation, value: impl Into<String>) {
        self.0.push(FieldError::rejected(field, violation, value));
    }

    pub fn extend(&mut self, other: Errors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// Distinct field names in the order they first failed.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for error in &self.0 {
            if !fields.contains(&error.field) {
                fields.push(error.field);
            }
        }
        fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

pub struct Rule<T> {
    pub field: &'static str,
    pub check: fn(&T) -> Option<Violation>,
}

impl<T> Rule<T> {
    pub const fn new(field: &'static str, check: fn(&T) -> Option<Violation>) -> Self {
        Rule { field, check }
    }
}

pub trait Validate: Sized + 'static {
    fn rules() -> &'static [Rule<Self>];

    fn validate(&self) -> Errors {
        let mut errors = Errors::new();
        for rule in Self::rules() {
            if let Some(violation) = (rule.check)(self) {
                errors.push(rule.field, violation);
            }
        }
        errors
    }
}

pub fn required(value: &str) -> Option<Violation> {
    if value.trim().is_empty() {
        Some(Violation::Required)
    } else {
        None
    }
}

/// Blank values pass; pair with [`required`] when the field is mandatory.
/// Surrounding whitespace counts as a non-digit.
pub fn digits(value: &str, max: usize) -> Option<Violation> {
    if value.trim().is_empty() {
        return None;
    }
    if value.len() <= max && value.chars().all(|c| c.is_ascii_digit()) {
        None
    } else {
        Some(Violation::Digits(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        code: String,
        phone: String,
    }

    fn code_required(sample: &Sample) -> Option<Violation> {
        required(&sample.code)
    }

    fn phone_required(sample: &Sample) -> Option<Violation> {
        required(&sample.phone)
    }

    fn phone_digits(sample: &Sample) -> Option<Violation> {
        digits(&sample.phone, 4)
    }

    const SAMPLE_RULES: &[Rule<Sample>] = &[
        Rule::new("code", code_required),
        Rule::new("phone", phone_required),
        Rule::new("phone", phone_digits),
    ];

    impl Validate for Sample {
        fn rules() -> &'static [Rule<Self>] {
            SAMPLE_RULES
        }
    }

    #[test]
    fn test_rules_run_in_declaration_order() {
        let sample = Sample { code: " ".to_string(), phone: String::new() };
        let errors = sample.validate();

        assert_eq!(errors.fields(), vec!["code", "phone"]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_valid_sample_has_no_errors() {
        let sample = Sample { code: "x".to_string(), phone: "1234".to_string() };
        assert!(sample.validate().is_empty());
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits("", 10), None);
        assert_eq!(digits("8919325812", 10), None);
        assert_eq!(digits("89193258120", 10), Some(Violation::Digits(10)));
        assert_eq!(digits("12a4", 10), Some(Violation::Digits(10)));
        assert_eq!(digits("+4477", 10), Some(Violation::Digits(10)));
        assert_eq!(digits(" 12 ", 10), Some(Violation::Digits(10)));
        assert_eq!(digits("   ", 10), None);
    }

    #[test]
    fn test_field_error_serialization() {
        let error = FieldError::new("address", Violation::Required);
        let json = serde_json::to_value(error).unwrap();

        assert_eq!(json["field"], "address");
        assert_eq!(json["code"], "required");
        assert_eq!(json["message"], "must not be empty");
        assert!(json.get("rejectedValue").is_none());
    }

    #[test]
    fn test_rejected_value_is_serialized() {
        let mut errors = Errors::new();
        errors.reject("date", Violation::TypeMismatch, "2013-02-30");
        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json[0]["code"], "typeMismatch");
        assert_eq!(json[0]["rejectedValue"], "2013-02-30");
    }

    #[test]
    fn test_fields_are_distinct() {
        let mut errors = Errors::new();
        errors.push("telephone", Violation::Required);
        errors.push("telephone", Violation::Digits(10));
        errors.push("address", Violation::Required);

        assert_eq!(errors.fields(), vec!["telephone", "address"]);
        assert!(errors.has_field("address"));
        assert!(!errors.has_field("city"));
    }
}
