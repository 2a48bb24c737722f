//! # Cart Configuration
//!
//! Optional limits the embedding system may impose on a cart.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     CART_MAX_ITEMS=100                                                  │
//! │     CART_MAX_ITEM_QUANTITY=999                                          │
//! │                                                                         │
//! │  2. TOML document supplied by the embedder                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     No limits at all                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate does no file I/O: the embedder reads the file and hands the
//! contents to [`CartConfig::load`].
//!
//! ## Configuration Format
//! ```toml
//! [limits]
//! max_items = 100
//! max_item_quantity = 999
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult};
use crate::{DEFAULT_MAX_CART_ITEMS, DEFAULT_MAX_ITEM_QUANTITY};

/// Environment variable overriding [`CartLimits::max_items`].
pub const ENV_MAX_ITEMS: &str = "CART_MAX_ITEMS";

/// Environment variable overriding [`CartLimits::max_item_quantity`].
pub const ENV_MAX_ITEM_QUANTITY: &str = "CART_MAX_ITEM_QUANTITY";

// =============================================================================
// Limits
// =============================================================================

/// Upper bounds enforced by `Cart::add_item`. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartLimits {
    /// Maximum number of distinct lines.
    #[serde(default)]
    pub max_items: Option<usize>,

    /// Maximum quantity a single line may reach after merging.
    #[serde(default)]
    pub max_item_quantity: Option<i64>,
}

impl CartLimits {
    /// No limits.
    pub const fn unlimited() -> Self {
        CartLimits {
            max_items: None,
            max_item_quantity: None,
        }
    }

    /// Limits suited to a retail till: 100 lines, 999 units per line.
    pub const fn retail() -> Self {
        CartLimits {
            max_items: Some(DEFAULT_MAX_CART_ITEMS),
            max_item_quantity: Some(DEFAULT_MAX_ITEM_QUANTITY),
        }
    }
}

// =============================================================================
// Cart Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub limits: CartLimits,
}

impl CartConfig {
    /// Unlimited configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document and validates it. Environment is not consulted.
    pub fn from_toml_str(contents: &str) -> CartResult<Self> {
        let config: CartConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the effective configuration.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. TOML contents, if given
    /// 3. Environment variables
    pub fn load(contents: Option<&str>) -> CartResult<Self> {
        let mut config = match contents {
            Some(contents) => {
                info!("Loading cart config from TOML");
                toml::from_str(contents)?
            }
            None => {
                debug!("No cart config supplied, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(contents: Option<&str>) -> Self {
        Self::load(contents).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        if self.limits.max_items == Some(0) {
            return Err(CartError::InvalidConfig(
                "max_items must be greater than 0".into(),
            ));
        }

        if let Some(max) = self.limits.max_item_quantity {
            if max <= 0 {
                return Err(CartError::InvalidConfig(format!(
                    "max_item_quantity must be greater than 0, got: {}",
                    max
                )));
            }
        }

        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_ITEMS) {
            match value.trim().parse::<usize>() {
                Ok(max) => {
                    debug!(max_items = max, "Overriding max items from environment");
                    self.limits.max_items = Some(max);
                }
                Err(_) => warn!(value = %value, "Ignoring unparsable {}", ENV_MAX_ITEMS),
            }
        }

        if let Some(value) = lookup(ENV_MAX_ITEM_QUANTITY) {
            match value.trim().parse::<i64>() {
                Ok(max) => {
                    debug!(max_item_quantity = max, "Overriding max item quantity from environment");
                    self.limits.max_item_quantity = Some(max);
                }
                Err(_) => warn!(value = %value, "Ignoring unparsable {}", ENV_MAX_ITEM_QUANTITY),
            }
        }
    }
}
