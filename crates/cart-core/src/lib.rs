//! # cart-core: Shopping Cart Aggregate
//!
//! An in-memory shopping cart that merges duplicate products, removes lines
//! by product or by position, and totals exactly in decimal.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          cart-core                                      │
//! │                                                                         │
//! │   embedder (session, HTTP handler, IPC) ──► CartCommand ──┐             │
//! │                                                           ▼             │
//! │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌─────────────────┐     │
//! │   │   types   │  │   money   │  │ validation │  │      cart       │     │
//! │   │  Product  │  │   Money   │  │   checks   │─►│  Cart           │     │
//! │   │   Item    │  │ (Decimal) │  │            │  │  CartTotals     │     │
//! │   └───────────┘  └───────────┘  └────────────┘  └─────────────────┘     │
//! │                                                          ▲              │
//! │   config: CartConfig / CartLimits (TOML + env) ──────────┘              │
//! │                                                                         │
//! │   NO I/O • NO PERSISTENCE • NO INTERNAL LOCKING                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product identity and cart Item
//! - [`money`] - Exact decimal Money
//! - [`cart`] - The Cart aggregate
//! - [`command`] - Serializable requests against a cart
//! - [`config`] - Optional cart limits
//! - [`error`] - Error types
//! - [`validation`] - Argument checks
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_core::{Cart, Money, Product};
//!
//! let apple = Product::new("APPLE", "Apple");
//! let mut cart = Cart::new();
//!
//! cart.add_item(apple.clone(), "1.50".parse().unwrap(), 3).unwrap();
//! assert_eq!(cart.total_value(), "4.50".parse::<Money>().unwrap());
//!
//! assert!(cart.remove_item(&apple));
//! assert!(!cart.remove_item(&apple));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod command;
pub mod config;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use command::{CartCommand, CommandOutcome};
pub use config::{CartConfig, CartLimits};
pub use error::{CartError, CartResult, ValidationError};
pub use money::Money;
pub use types::{Item, Product, ProductId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Suggested maximum number of distinct lines, used by [`CartLimits::retail`].
///
/// Carts are unlimited unless the embedder opts in.
pub const DEFAULT_MAX_CART_ITEMS: usize = 100;

/// Suggested maximum quantity of a single line, used by [`CartLimits::retail`].
///
/// Catches typing 1000 instead of 10.
pub const DEFAULT_MAX_ITEM_QUANTITY: i64 = 999;
