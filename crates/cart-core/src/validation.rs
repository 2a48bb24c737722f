//! # Validation Module
//!
//! Argument checks that run before the cart is touched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command boundary (command.rs)                                 │
//! │  └── Presence checks: product / unit price / quantity supplied?         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── quantity > 0, unit price > 0                                       │
//! │  └── configured limits (distinct lines, quantity per line)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart mutation                                                 │
//! │  └── only reached when every check above passed                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::validation::{validate_quantity, validate_unit_price};
//! use cart_core::Money;
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_unit_price(Money::from_cents(150)).is_ok());
//! assert!(validate_unit_price(Money::zero()).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Presence
// =============================================================================

/// Unwraps an argument that may be absent at the command boundary.
///
/// ```rust
/// use cart_core::validation::require;
///
/// assert_eq!(require(Some(3), "quantity").unwrap(), 3);
/// assert!(require::<i64>(None, "quantity").is_err());
/// ```
pub fn require<T>(value: Option<T>, field: &str) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  Caller passes quantity: 0                                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"                │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive. Free items are not accepted.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Adds a quantity to an existing line, rejecting overflow and limit breaches.
///
/// Returns the merged quantity on success.
pub fn merged_quantity(current: i64, added: i64, max: Option<i64>) -> ValidationResult<i64> {
    let upper = max.unwrap_or(i64::MAX);
    let merged = current
        .checked_add(added)
        .filter(|&q| q <= upper)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: upper,
        })?;

    Ok(merged)
}

// =============================================================================
// Amount Validators
// =============================================================================

/// Computes `unit_price × quantity`, rejecting overflow and lost digits.
pub fn exact_line_total(unit_price: Money, quantity: i64) -> ValidationResult<Money> {
    unit_price
        .checked_mul_quantity(quantity)
        .ok_or_else(|| ValidationError::Unrepresentable {
            field: "line total".to_string(),
        })
}

/// Sums line totals, rejecting overflow and lost digits.
///
/// A cart whose total passes this check can always be totalled with plain
/// addition afterwards: removing lines only shrinks the sum.
pub fn exact_cart_total<I>(line_totals: I) -> ValidationResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    line_totals
        .into_iter()
        .try_fold(Money::zero(), |total, line| total.checked_add(line))
        .ok_or_else(|| ValidationError::Unrepresentable {
            field: "cart total".to_string(),
        })
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct line fits in the cart.
pub fn validate_cart_size(current_items: usize, max: Option<usize>) -> ValidationResult<()> {
    match max {
        Some(max) if current_items >= max => Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: i64::try_from(max).unwrap_or(i64::MAX),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
