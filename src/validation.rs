//! Input validation for registration, vehicle and order payloads.
//!
//! Collects every problem in a request before reporting, so clients get
//! one descriptive 400 instead of a field-by-field back-and-forth.

use std::fmt;

/// Validation error with detailed, user-friendly messages.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
    }

    /// Create error for a malformed identity number
    pub fn invalid_id_number(field: &str) -> Self {
        Self::new(field, "ID number must be 10 digits")
            .with_suggestion("Check the number against the identity document, e.g. 1012345678")
    }

    /// Create error for invalid phone number
    pub fn invalid_phone(field: &str) -> Self {
        Self::new(field, "Phone number is not valid")
            .with_suggestion("Use an international or local format, e.g. +966501234567")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Formatted message listing every collected error.
    pub fn to_message(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Convert to Result - Ok if no errors, Err with formatted message if errors exist
    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate a 10-digit identity number
pub fn validate_id_number(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "ID number"));
        return;
    }

    if trimmed.len() != 10 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        errors.add(ValidationError::invalid_id_number(field));
    }
}

/// Validate phone number format - optional, only validated when provided
pub fn validate_phone_optional(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return;
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 9 || digits.len() > 14 {
        errors.add(ValidationError::invalid_phone(field));
    }
}

/// Validate the passenger count window for an operation order
pub fn validate_passenger_count(count: usize, field: &str, errors: &mut ValidationErrors) {
    if count == 0 {
        errors.add(ValidationError::new(field, "At least one passenger is required"));
    } else if count > 12 {
        errors.add(ValidationError::new(field, "Maximum 12 passengers allowed"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_empty() {
        let mut errors = ValidationErrors::new();
        validate_required("   ", "username", "Username", &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors.to_message().contains("Username"));
    }

    #[test]
    fn test_required_field_present() {
        let mut errors = ValidationErrors::new();
        validate_required("driver1", "username", "Username", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_id_number_length() {
        let mut errors = ValidationErrors::new();
        validate_id_number("12345", "idNumber", &mut errors);
        assert_eq!(errors.len(), 1);

        let mut errors = ValidationErrors::new();
        validate_id_number("1012345678", "idNumber", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_id_number_non_digit() {
        let mut errors = ValidationErrors::new();
        validate_id_number("10123A5678", "idNumber", &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_phone_optional_empty_is_ok() {
        let mut errors = ValidationErrors::new();
        validate_phone_optional("", "phone", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_phone_with_separators() {
        let mut errors = ValidationErrors::new();
        validate_phone_optional("+966 50 123 4567", "phone", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_passenger_count_window() {
        let mut errors = ValidationErrors::new();
        validate_passenger_count(0, "passengers", &mut errors);
        assert_eq!(errors.len(), 1);

        let mut errors = ValidationErrors::new();
        validate_passenger_count(13, "passengers", &mut errors);
        assert_eq!(errors.len(), 1);

        let mut errors = ValidationErrors::new();
        validate_passenger_count(12, "passengers", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_into_result_collects_all_errors() {
        let mut errors = ValidationErrors::new();
        validate_required("", "fromCity", "Departure city", &mut errors);
        validate_required("", "toCity", "Destination city", &mut errors);

        let message = errors.into_result().unwrap_err();
        assert!(message.contains("fromCity"));
        assert!(message.contains("toCity"));
    }
}
