// Validation utilities module
// Provides custom validation functions for domain-specific rules

use validator::ValidationError;

/// Validates that a transaction type is one of the accepted values
/// Valid values: "income", "expense" (case-insensitive)
pub fn validate_transaction_type(kind: &str) -> Result<(), ValidationError> {
    let valid_kinds = ["income", "expense"];
    if valid_kinds.contains(&kind.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_transaction_type"))
    }
}

/// Validates that a monetary amount is positive
pub fn validate_positive_amount(amount: f64) -> Result<(), ValidationError> {
    if amount <= 0.0 {
        Err(ValidationError::new("amount_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that a date string is ISO formatted (YYYY-MM-DD)
pub fn validate_iso_date(date: &str) -> Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_date"))
}
