//! # Domain Types
//!
//! The two collaborators the cart is built from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐         ┌─────────────────────┐                    │
//! │  │    Product      │◄────────│        Item         │                    │
//! │  │  ─────────────  │         │  ─────────────────  │                    │
//! │  │  id (UUID)      │         │  product            │                    │
//! │  │  sku            │         │  unit_price (Money) │                    │
//! │  │  name           │         │  quantity (i64)     │                    │
//! │  └─────────────────┘         │  line_total()       │                    │
//! │                              └─────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `Product` equality and hashing are value-based over all of its fields,
//! so two separately constructed products with the same id, sku and name are
//! the same cart line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_quantity, validate_unit_price, ValidationResult};

// =============================================================================
// Product Id
// =============================================================================

/// Unique identifier of a product (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(#[ts(type = "string")] Uuid);

impl ProductId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        ProductId(id)
    }

    /// Parses the hyphenated textual form.
    ///
    /// ```rust
    /// use cart_core::ProductId;
    ///
    /// assert!(ProductId::parse("550e8400-e29b-41d4-a716-446655440000").is_ok());
    /// assert!(ProductId::parse("not-a-uuid").is_err());
    /// ```
    pub fn parse(id: &str) -> ValidationResult<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::Required {
                field: "product id".to_string(),
            });
        }

        Uuid::parse_str(id)
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: "must be a valid UUID".to_string(),
            })
    }

    /// Returns the wrapped UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductId::parse(s)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A purchasable good, used by the cart purely as an identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: ProductId,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,
}

impl Product {
    /// Creates a product with a freshly generated id.
    pub fn new(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_id(ProductId::new(), sku, name)
    }

    /// Creates a product with a known id.
    pub fn with_id(id: ProductId, sku: impl Into<String>, name: impl Into<String>) -> Self {
        Product {
            id,
            sku: sku.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sku)
    }
}

// =============================================================================
// Item
// =============================================================================

/// One line of the cart: a product, its unit price and how many of it.
///
/// ## Invariants
/// - `quantity > 0`
/// - `unit_price > 0`
///
/// Both are checked by [`Item::new`] and by every update the cart performs.
/// The product never changes for the lifetime of the item, which is why the
/// fields are private and there is no product setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    product: Product,
    unit_price: Money,
    quantity: i64,
}

impl Item {
    /// Creates a validated item.
    ///
    /// ```rust
    /// use cart_core::{Item, Money, Product};
    ///
    /// let apple = Product::new("APPLE", "Apple");
    /// let item = Item::new(apple, Money::from_cents(150), 3).unwrap();
    /// assert_eq!(item.line_total(), Money::from_cents(450));
    ///
    /// assert!(Item::new(Product::new("X", "X"), Money::from_cents(150), 0).is_err());
    /// ```
    pub fn new(product: Product, unit_price: Money, quantity: i64) -> ValidationResult<Self> {
        validate_unit_price(unit_price)?;
        validate_quantity(quantity)?;

        Ok(Item {
            product,
            unit_price,
            quantity,
        })
    }

    /// The product this line is for.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Price of one unit.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Number of units on this line.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Overwrites price and quantity. Callers must have validated both.
    pub(crate) fn update(&mut self, unit_price: Money, quantity: i64) {
        debug_assert!(unit_price.is_positive() && quantity > 0);
        self.unit_price = unit_price;
        self.quantity = quantity;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
