//! # Cart Commands
//!
//! Serializable requests an embedding layer (HTTP handler, IPC bridge,
//! message consumer) forwards to a cart.
//!
//! The typed `Cart` API cannot express an absent argument or a negative
//! position. Requests arriving from outside can, so they are modelled here
//! with `Option` fields and a signed position, and are checked before the
//! cart is touched.
//!
//! ```json
//! { "type": "add_item", "product": { ... }, "unitPrice": "1.50", "quantity": 3 }
//! { "type": "remove_product", "product": { ... } }
//! { "type": "remove_at", "position": 1 }
//! { "type": "clear" }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::CartResult;
use crate::money::Money;
use crate::types::Product;
use crate::validation::require;

/// A request against a cart, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum CartCommand {
    /// Add or merge a line. Every field is required at execution time.
    #[serde(rename_all = "camelCase")]
    AddItem {
        #[serde(default)]
        product: Option<Product>,
        #[serde(default)]
        unit_price: Option<Money>,
        #[serde(default)]
        quantity: Option<i64>,
    },

    /// Remove the line holding this product.
    RemoveProduct { product: Product },

    /// Remove the line at a zero-based position. Negative removes nothing.
    RemoveAt { position: i64 },

    /// Empty the cart.
    Clear,
}

/// What an executed command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "outcome", content = "removed", rename_all = "snake_case")]
#[ts(export)]
pub enum CommandOutcome {
    Added,
    /// Whether a line was actually removed.
    Removed(bool),
    Cleared,
}

impl Cart {
    /// Executes a command against this cart.
    ///
    /// ## Errors
    /// `CartError::InvalidArgument` for an `AddItem` with a missing field or
    /// a rejected value. Removals never fail.
    ///
    /// ```rust
    /// use cart_core::{Cart, CartCommand, CommandOutcome};
    ///
    /// let mut cart = Cart::new();
    /// let cmd: CartCommand = serde_json::from_str(r#"{ "type": "remove_at", "position": -1 }"#).unwrap();
    /// assert_eq!(cart.execute(cmd).unwrap(), CommandOutcome::Removed(false));
    /// ```
    pub fn execute(&mut self, command: CartCommand) -> CartResult<CommandOutcome> {
        match command {
            CartCommand::AddItem {
                product,
                unit_price,
                quantity,
            } => {
                let product = require(product, "product")?;
                let unit_price = require(unit_price, "unit price")?;
                let quantity = require(quantity, "quantity")?;
                self.add_item(product, unit_price, quantity)?;
                Ok(CommandOutcome::Added)
            }
            CartCommand::RemoveProduct { product } => {
                Ok(CommandOutcome::Removed(self.remove_item(&product)))
            }
            CartCommand::RemoveAt { position } => {
                let removed = match usize::try_from(position) {
                    Ok(position) => self.remove_item_at(position),
                    Err(_) => {
                        debug!(position, "Negative position, nothing removed");
                        false
                    }
                };
                Ok(CommandOutcome::Removed(removed))
            }
            CartCommand::Clear => {
                self.clear();
                Ok(CommandOutcome::Cleared)
            }
        }
    }
}
