//! # Error Types
//!
//! Domain-specific error types for cart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CartError                                                              │
//! │  ├── InvalidArgument(ValidationError)  - rejected cart operation        │
//! │  └── InvalidConfig(String)             - bad limits / unreadable TOML   │
//! │                                                                         │
//! │  ValidationError                                                        │
//! │  ├── Required        - argument absent at the command boundary          │
//! │  ├── MustBePositive  - quantity or unit price <= 0                      │
//! │  ├── OutOfRange      - configured limit exceeded / overflow             │
//! │  ├── InvalidFormat   - unparsable product id                            │
//! │  └── Unrepresentable - line or cart total not exactly representable     │
//! │                                                                         │
//! │  Flow: ValidationError → CartError::InvalidArgument → caller            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in every message
//! 3. Errors are enum variants, never String
//! 4. A rejected operation never leaves the cart half-mutated
//!
//! Removing a product that is not in the cart is NOT an error. Those
//! operations report `false` instead.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors surfaced by the cart and its configuration layer.
#[derive(Debug, Error)]
pub enum CartError {
    /// A cart operation was called with an unusable argument.
    ///
    /// ## When This Occurs
    /// - quantity or unit price is zero or negative
    /// - a field of an `AddItem` command is absent
    /// - merging would overflow the quantity or exceed a configured limit
    /// - the line total or cart total could not be held exactly
    ///
    /// The cart is untouched when this is returned.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CartError {
    /// Returns true if this is a rejected cart operation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CartError::InvalidArgument(_))
    }
}

impl From<toml::de::Error> for CartError {
    fn from(err: toml::de::Error) -> Self {
        CartError::InvalidConfig(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the [`crate::validation`] checks that run before any
/// mutation of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required argument is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A derived amount would overflow or lose digits.
    ///
    /// ## When This Occurs
    /// - unit price × quantity exceeds 28-29 significant digits
    /// - the cart total would no longer be exact after the add
    #[error("{field} cannot be represented exactly")]
    Unrepresentable { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product".to_string(),
        };
        assert_eq!(err.to_string(), "product is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");

        let err = ValidationError::Unrepresentable {
            field: "line total".to_string(),
        };
        assert_eq!(err.to_string(), "line total cannot be represented exactly");
    }

    #[test]
    fn test_validation_converts_to_invalid_argument() {
        let validation_err = ValidationError::MustBePositive {
            field: "unit price".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(cart_err.is_invalid_argument());
        assert_eq!(
            cart_err.to_string(),
            "Invalid argument: unit price must be positive"
        );
    }

    #[test]
    fn test_toml_error_becomes_invalid_config() {
        let parse_err = toml::from_str::<toml::Value>("limits = [").unwrap_err();
        let cart_err: CartError = parse_err.into();
        assert!(matches!(cart_err, CartError::InvalidConfig(_)));
        assert!(!cart_err.is_invalid_argument());
    }
}
