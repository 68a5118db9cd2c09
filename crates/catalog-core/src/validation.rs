//! # Validation Module
//!
//! Field-level checks and boundary coercion for request data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (catalog-api)                                   │
//! │  └── Body must be JSON                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Record codec (codec.rs)                                      │
//! │  ├── Required / unknown attributes                                     │
//! │  └── THIS MODULE: coerce each JSON value to its canonical type         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store save (catalog-db)                                      │
//! │  ├── validate_product_name: name must not be empty                     │
//! │  └── validate_product_id: id must not exceed MAX_PRODUCT_ID            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Boundary Coercion
//! Clients disagree on whether identifiers and scores are numbers or
//! strings. Both forms are accepted here and converted once, so the rest of
//! the crate only ever sees `u64` identifiers and `f64` numbers.

use serde_json::Value;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest identifier a product may carry (2^53 - 1).
///
/// Identifiers above this are not exact as JSON numbers in most clients or
/// as Lua numbers inside Redis scripts.
pub const MAX_PRODUCT_ID: u64 = (1 << 53) - 1;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_product_name;
///
/// assert!(validate_product_name("iPhone 8").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

/// Validates an explicit product identifier.
pub fn validate_product_id(id: u64) -> ValidationResult<()> {
    if id > MAX_PRODUCT_ID {
        return Err(ValidationError::invalid(
            "id",
            format!("must not exceed {}", MAX_PRODUCT_ID),
        ));
    }

    Ok(())
}

// =============================================================================
// Coercion
// =============================================================================

/// Coerces an identifier.
///
/// Accepts integers and numeric strings. Negative values and `null` mean
/// "unset" and yield `None`. Values above [`MAX_PRODUCT_ID`] are refused.
pub fn coerce_id(field: &str, value: &Value) -> ValidationResult<Option<u64>> {
    let not_integer = || ValidationError::invalid(field, "expected an integer");
    let too_large =
        || ValidationError::invalid(field, format!("must not exceed {}", MAX_PRODUCT_ID));

    let id = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(id), _) => id,
            (None, Some(_negative)) => return Ok(None),
            (None, None) => return Err(not_integer()),
        },
        Value::String(s) => {
            let s = s.trim();
            match (s.parse::<u64>(), s.parse::<i64>()) {
                (Ok(id), _) => id,
                (Err(_), Ok(_negative)) => return Ok(None),
                (Err(_), Err(_)) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                    return Err(too_large())
                }
                (Err(_), Err(_)) => return Err(not_integer()),
            }
        }
        _ => return Err(not_integer()),
    };

    if id > MAX_PRODUCT_ID {
        return Err(too_large());
    }
    Ok(Some(id))
}

/// Coerces a numeric field (price, score).
///
/// Accepts JSON numbers and numeric strings; rejects NaN and infinities.
pub fn coerce_number(field: &str, value: &Value) -> ValidationResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(ValidationError::invalid(field, "expected a number")),
    }
}

/// Coerces a required text field.
pub fn coerce_string(field: &str, value: &Value) -> ValidationResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::invalid(field, "expected a string")),
    }
}

/// Coerces an optional text field.
///
/// `null` clears the field. Numbers are accepted and kept as their decimal
/// text, since some clients send image identifiers as integers.
pub fn coerce_optional_text(field: &str, value: &Value) -> ValidationResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(ValidationError::invalid(field, "expected a string")),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("MacBook Pro").is_ok());
        assert_eq!(
            validate_product_name(""),
            Err(ValidationError::required("name"))
        );
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id("id", &json!(7)), Ok(Some(7)));
        assert_eq!(coerce_id("id", &json!("12")), Ok(Some(12)));
        assert_eq!(coerce_id("id", &json!(-1)), Ok(None));
        assert_eq!(coerce_id("id", &Value::Null), Ok(None));
        assert_eq!(coerce_id("id", &json!(MAX_PRODUCT_ID)), Ok(Some(MAX_PRODUCT_ID)));
        assert!(coerce_id("id", &json!("abc")).is_err());
        assert!(coerce_id("id", &json!(1.5)).is_err());
    }

    #[test]
    fn test_coerce_id_refuses_ids_above_maximum() {
        for value in [
            json!(MAX_PRODUCT_ID + 1),
            json!(u64::MAX),
            json!(u64::MAX.to_string()),
            json!("99999999999999999999999"),
        ] {
            assert!(matches!(
                coerce_id("id", &value),
                Err(ValidationError::InvalidFormat { ref field, .. }) if field == "id"
            ));
        }
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(0).is_ok());
        assert!(validate_product_id(MAX_PRODUCT_ID).is_ok());
        assert!(validate_product_id(MAX_PRODUCT_ID + 1).is_err());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("price", &json!(649)), Ok(649.0));
        assert_eq!(coerce_number("score", &json!("4")), Ok(4.0));
        assert!(coerce_number("price", &json!(true)).is_err());
        assert!(coerce_number("price", &json!("NaN")).is_err());
    }

    #[test]
    fn test_coerce_optional_text() {
        assert_eq!(
            coerce_optional_text("image_id", &json!(42)),
            Ok(Some("42".to_string()))
        );
        assert_eq!(coerce_optional_text("description", &Value::Null), Ok(None));
        assert!(coerce_optional_text("description", &json!([1])).is_err());
    }
}
