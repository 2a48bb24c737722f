//! # Cart
//!
//! The shopping cart aggregate: the only component with decision logic.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                  Effect on items (insertion ordered)         │
//! │  ─────────                  ───────────────────────────────────         │
//! │                                                                         │
//! │  add_item(new P) ─────────► items.push(Item { P, price, qty })          │
//! │                                                                         │
//! │  add_item(known P) ───────► items[i].qty += qty; items[i].price = price │
//! │                             (slot i unchanged)                          │
//! │                                                                         │
//! │  remove_item(&P) ─────────► items.remove(i) → true / false              │
//! │                                                                         │
//! │  remove_item_at(n) ───────► items.remove(n) → true / false              │
//! │                                                                         │
//! │  total_value() ───────────► Σ unit_price × quantity (read only)         │
//! │                                                                         │
//! │  NOTE: Every check runs before the first write. A rejected add leaves   │
//! │        the cart exactly as it was.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! None built in. One cart belongs to one session; an embedder sharing a cart
//! across threads wraps it in its own mutex.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::{CartConfig, CartLimits};
use crate::error::CartResult;
use crate::money::Money;
use crate::types::{Item, Product};
use crate::validation::{
    exact_cart_total, exact_line_total, merged_quantity, validate_cart_size, validate_quantity,
    validate_unit_price,
};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product (adding the same product merges)
/// - Every item has `quantity > 0` and `unit_price > 0`
/// - Order of `items` is insertion order; merging keeps the original slot
/// - The total is always derived from the items, never cached
///
/// ## Example
/// ```rust
/// use cart_core::{Cart, Money, Product};
///
/// let apple = Product::new("APPLE", "Apple");
/// let banana = Product::new("BANANA", "Banana");
///
/// let mut cart = Cart::new();
/// cart.add_item(apple.clone(), "1.50".parse().unwrap(), 3).unwrap();
/// cart.add_item(banana, "0.75".parse().unwrap(), 6).unwrap();
/// cart.add_item(apple, "1.60".parse().unwrap(), 2).unwrap();
///
/// assert_eq!(cart.total_value(), "12.50".parse::<Money>().unwrap());
/// assert_eq!(cart.items()[0].quantity(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<Item>,
    limits: CartLimits,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with no limits.
    pub fn new() -> Self {
        Self::with_limits(CartLimits::unlimited())
    }

    /// Creates a new empty cart enforcing the given limits.
    pub fn with_limits(limits: CartLimits) -> Self {
        Cart {
            items: Vec::new(),
            limits,
            created_at: Utc::now(),
        }
    }

    /// Creates a new empty cart from a loaded configuration.
    pub fn with_config(config: &CartConfig) -> Self {
        Self::with_limits(config.limits)
    }

    /// Adds a product to the cart or merges it into its existing line.
    ///
    /// ## Behavior
    /// - Product not in cart: a new line is appended at the end
    /// - Product already in cart: quantities are summed and the unit price is
    ///   replaced by `unit_price`, even when it is the same value. The line
    ///   keeps its position.
    ///
    /// ## Errors
    /// `CartError::InvalidArgument` when the quantity or unit price is not
    /// positive, when merging overflows, when a configured limit would be
    /// exceeded, or when the line total or cart total could not be held
    /// exactly. The cart is unchanged in every error case.
    pub fn add_item(&mut self, product: Product, unit_price: Money, quantity: i64) -> CartResult<()> {
        if let Err(e) = validate_unit_price(unit_price).and_then(|_| validate_quantity(quantity)) {
            warn!(product = %product, unit_price = %unit_price, quantity, "Rejected add_item: {}", e);
            return Err(e.into());
        }

        let position = self.position_of(&product);
        let new_quantity = match position {
            Some(index) => {
                let current = self.items[index].quantity();
                merged_quantity(current, quantity, self.limits.max_item_quantity)
                    .inspect_err(|e| warn!(product = %product, quantity, "Rejected merge: {}", e))?
            }
            None => {
                validate_cart_size(self.items.len(), self.limits.max_items)
                    .inspect_err(|e| warn!(product = %product, "Rejected new line: {}", e))?;
                // Single-line quantity limit applies to fresh lines too.
                merged_quantity(0, quantity, self.limits.max_item_quantity)
                    .inspect_err(|e| warn!(product = %product, quantity, "Rejected new line: {}", e))?
            }
        };

        let line_total = exact_line_total(unit_price, new_quantity).inspect_err(|e| {
            warn!(
                product = %product,
                unit_price = %unit_price,
                quantity = new_quantity,
                "Rejected add_item: {}",
                e
            )
        })?;
        let other_lines = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != position)
            .map(|(_, item)| item.line_total());
        exact_cart_total(other_lines.chain(std::iter::once(line_total))).inspect_err(|e| {
            warn!(product = %product, line_total = %line_total, "Rejected add_item: {}", e)
        })?;

        match position {
            Some(index) => {
                let item = &mut self.items[index];
                debug!(
                    product = %product,
                    previous_price = %item.unit_price(),
                    unit_price = %unit_price,
                    quantity = new_quantity,
                    "Merging into existing cart line"
                );
                item.update(unit_price, new_quantity);
            }
            None => {
                debug!(product = %product, unit_price = %unit_price, quantity, "Adding cart line");
                self.items.push(Item::new(product, unit_price, quantity)?);
            }
        }

        Ok(())
    }

    /// Removes the line holding `product`.
    ///
    /// Returns `true` if a line was removed, `false` if the product was not
    /// in the cart.
    pub fn remove_item(&mut self, product: &Product) -> bool {
        match self.position_of(product) {
            Some(index) => {
                self.items.remove(index);
                debug!(product = %product, "Removed cart line");
                true
            }
            None => {
                debug!(product = %product, "Product not in cart, nothing removed");
                false
            }
        }
    }

    /// Removes the line at `position` in current insertion order (zero based).
    ///
    /// Returns `false` when `position` is past the end. Positions shift after
    /// every removal, so they are not stable identifiers.
    pub fn remove_item_at(&mut self, position: usize) -> bool {
        if position >= self.items.len() {
            debug!(position, len = self.items.len(), "Position out of range, nothing removed");
            return false;
        }

        let removed = self.items.remove(position);
        debug!(position, product = %removed.product(), "Removed cart line by position");
        true
    }

    /// Sum of every line total. Zero for an empty cart. No rounding.
    ///
    /// `add_item` only admits lines whose totals, and the cart total, are
    /// exactly representable, so this sum never overflows.
    pub fn total_value(&self) -> Money {
        self.items.iter().map(Item::line_total).sum()
    }

    /// Read-only view of the items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Independent copy of the items in insertion order.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Iterates the items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Returns the line for `product`, if present.
    pub fn get(&self, product: &Product) -> Option<&Item> {
        self.items.iter().find(|i| i.product() == product)
    }

    /// Returns true if `product` has a line in the cart.
    pub fn contains(&self, product: &Product) -> bool {
        self.position_of(product).is_some()
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        debug!(lines = self.items.len(), "Clearing cart");
        self.items.clear();
    }

    /// Returns the number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(Item::quantity).sum()
    }

    /// Returns the limits this cart enforces.
    pub fn limits(&self) -> CartLimits {
        self.limits
    }

    /// When the cart was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a serializable summary of the cart.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    fn position_of(&self, product: &Product) -> Option<usize> {
        self.items.iter().position(|i| i.product() == product)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cart totals summary for embedding layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_value: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total_value: cart.total_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CartError, ValidationError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn price(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = Product::new("COKE-330", "Coca-Cola 330ml");

        cart.add_item(product.clone(), price(999), 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_value(), price(1998));
        assert_eq!(cart.get(&product).unwrap().line_total(), price(1998));
    }

    #[test]
    fn test_cart_add_same_product_merges() {
        let mut cart = Cart::new();
        let product = Product::new("P", "Product");

        cart.add_item(product.clone(), price(1000), 2).unwrap();
        cart.add_item(product.clone(), price(1200), 3).unwrap();

        assert_eq!(cart.len(), 1);
        let item = cart.get(&product).unwrap();
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.unit_price(), price(1200));
    }

    #[test]
    fn test_merge_keeps_position() {
        let mut cart = Cart::new();
        let first = Product::new("A", "A");
        let second = Product::new("B", "B");

        cart.add_item(first.clone(), price(100), 1).unwrap();
        cart.add_item(second.clone(), price(200), 1).unwrap();
        cart.add_item(first.clone(), price(150), 1).unwrap();

        assert_eq!(cart.items()[0].product(), &first);
        assert_eq!(cart.items()[1].product(), &second);
    }

    #[test]
    fn test_rejected_add_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let product = Product::new("P", "Product");
        cart.add_item(product.clone(), price(1000), 2).unwrap();
        let before = cart.snapshot();

        let err = cart.add_item(product.clone(), price(1000), 0).unwrap_err();
        assert!(matches!(
            err,
            CartError::InvalidArgument(ValidationError::MustBePositive { .. })
        ));
        assert!(cart.add_item(product.clone(), Money::zero(), 1).is_err());
        assert!(cart.add_item(Product::new("Q", "Other"), price(-5), 1).is_err());

        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_merge_overflow_is_rejected() {
        let mut cart = Cart::new();
        let product = Product::new("P", "Product");
        cart.add_item(product.clone(), price(1), i64::MAX).unwrap();

        assert!(cart.add_item(product.clone(), price(2), 1).is_err());
        let item = cart.get(&product).unwrap();
        assert_eq!(item.quantity(), i64::MAX);
        assert_eq!(item.unit_price(), price(1));
    }

    #[test]
    fn test_unrepresentable_totals_are_rejected() {
        let max = Money::from_decimal(Decimal::MAX);
        let mut cart = Cart::new();

        let err = cart.add_item(Product::new("A", "A"), max, 2).unwrap_err();
        assert!(matches!(
            err,
            CartError::InvalidArgument(ValidationError::Unrepresentable { .. })
        ));
        assert!(cart.is_empty());

        cart.add_item(Product::new("B", "B"), max, 1).unwrap();
        let err = cart.add_item(Product::new("C", "C"), max, 1).unwrap_err();
        assert!(matches!(
            err,
            CartError::InvalidArgument(ValidationError::Unrepresentable { .. })
        ));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_value(), max);
    }

    #[test]
    fn test_merge_into_unrepresentable_total_is_rejected() {
        let mut cart = Cart::new();
        let product = Product::new("P", "Product");
        let max = Money::from_decimal(Decimal::MAX);
        cart.add_item(product.clone(), max, 1).unwrap();

        assert!(cart.add_item(product.clone(), max, 1).is_err());
        let item = cart.get(&product).unwrap();
        assert_eq!(item.quantity(), 1);
        assert_eq!(cart.total_value(), max);

        // The price is overwritten on merge, so a smaller price brings the line back in range.
        cart.add_item(product.clone(), price(100), 1).unwrap();
        assert_eq!(cart.total_value(), price(200));
    }

    #[test]
    fn test_limits_are_enforced_atomically() {
        let mut cart = Cart::with_limits(CartLimits {
            max_items: Some(1),
            max_item_quantity: Some(10),
        });
        let a = Product::new("A", "A");

        cart.add_item(a.clone(), price(100), 8).unwrap();
        assert!(cart.add_item(Product::new("B", "B"), price(100), 1).is_err());
        assert!(cart.add_item(a.clone(), price(200), 3).is_err());
        assert_eq!(cart.get(&a).unwrap().quantity(), 8);
        assert_eq!(cart.get(&a).unwrap().unit_price(), price(100));

        cart.add_item(a.clone(), price(200), 2).unwrap();
        assert_eq!(cart.get(&a).unwrap().quantity(), 10);
    }

    #[test]
    fn test_fresh_line_respects_quantity_limit() {
        let mut cart = Cart::with_limits(CartLimits::retail());
        assert!(cart.add_item(Product::new("A", "A"), price(100), 1000).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_by_product() {
        let mut cart = Cart::new();
        let product = Product::new("P", "Product");
        cart.add_item(product.clone(), price(100), 1).unwrap();

        assert!(cart.remove_item(&product));
        assert!(!cart.remove_item(&product));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_at_shifts_positions() {
        let mut cart = Cart::new();
        let p1 = Product::new("P1", "One");
        let p2 = Product::new("P2", "Two");
        let p3 = Product::new("P3", "Three");
        for p in [&p1, &p2, &p3] {
            cart.add_item(p.clone(), price(100), 1).unwrap();
        }

        assert!(cart.remove_item_at(1));
        assert!(!cart.contains(&p2));
        assert!(cart.remove_item_at(1));
        assert!(!cart.contains(&p3));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product(), &p1);
    }

    #[test]
    fn test_remove_item_at_out_of_range() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("A", "A"), price(100), 1).unwrap();
        cart.add_item(Product::new("B", "B"), price(100), 1).unwrap();

        assert!(!cart.remove_item_at(99));
        assert!(!cart.remove_item_at(2));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert!(cart.total_value().is_zero());
        assert!(cart.items().is_empty());
        assert_eq!(cart.totals().item_count, 0);
    }

    #[test]
    fn test_total_is_exact_sum_of_line_totals() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("A", "A"), Money::from_decimal(dec!(0.10)), 3).unwrap();
        cart.add_item(Product::new("B", "B"), Money::from_decimal(dec!(0.2)), 1).unwrap();
        cart.add_item(Product::new("C", "C"), Money::from_decimal(dec!(0.333)), 3).unwrap();

        let expected: Money = cart.iter().map(|i| i.unit_price() * i.quantity()).sum();
        assert_eq!(cart.total_value(), expected);
        assert_eq!(cart.total_value(), Money::from_decimal(dec!(1.499)));
    }

    #[test]
    fn test_line_total_that_would_round_is_rejected() {
        let mut cart = Cart::new();
        let precise = Money::from_decimal(dec!(7.922816251426433759354395033));

        let err = cart.add_item(Product::new("A", "A"), precise, 11).unwrap_err();
        assert!(matches!(
            err,
            CartError::InvalidArgument(ValidationError::Unrepresentable { .. })
        ));
        assert!(cart.is_empty());

        cart.add_item(Product::new("B", "B"), precise, 1).unwrap();
        assert_eq!(cart.total_value(), precise);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("A", "A"), price(100), 1).unwrap();
        let snapshot = cart.snapshot();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_totals_serialize() {
        let mut cart = Cart::new();
        cart.add_item(Product::new("A", "A"), price(150), 2).unwrap();

        let json = serde_json::to_value(cart.totals()).unwrap();
        assert_eq!(json["itemCount"], 1);
        assert_eq!(json["totalQuantity"], 2);
        assert_eq!(json["totalValue"], "3.00");
    }
}
