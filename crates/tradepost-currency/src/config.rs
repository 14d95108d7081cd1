//! Currency configuration.
//!
//! Two denominations: a *low* unit worth exactly 1, and an optional *high*
//! unit worth a fixed multiple of it. Configuration is a plain value that is
//! passed explicitly into every currency function and into the trade
//! pipeline; there is no process-wide currency state, so tests and multiple
//! engine instances can use independent configurations concurrently.

use serde::{Deserialize, Serialize};

use tradepost_types::{ItemStack, Price};

use crate::error::CurrencyError;

/// Serde default for [`CurrencyConfig::low_item`].
fn default_low_item() -> ItemStack {
    ItemStack::new("emerald", 1)
}

/// Serde default for [`CurrencyConfig::high_item`].
fn default_high_item() -> ItemStack {
    ItemStack::new("emerald_block", 1)
}

/// Serde default for [`CurrencyConfig::high_value`].
const fn default_high_value() -> u32 {
    9
}

/// Serde default for [`CurrencyConfig::high_min_cost`].
const fn default_high_min_cost() -> u32 {
    20
}

/// The denominations and thresholds of the currency system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// The low-denomination item, worth exactly 1. The template's
    /// `max_stack` is the low stack ceiling.
    #[serde(default = "default_low_item")]
    pub low_item: ItemStack,
    /// The high-denomination item. The template's `max_stack` is the high
    /// stack ceiling.
    #[serde(default = "default_high_item")]
    pub high_item: ItemStack,
    /// The value of one high-denomination unit in low units. A value of 0
    /// disables the high denomination entirely.
    #[serde(default = "default_high_value")]
    pub high_value: u32,
    /// Prices at or below this threshold are decomposed using the low
    /// denomination only.
    #[serde(default = "default_high_min_cost")]
    pub high_min_cost: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            low_item: default_low_item(),
            high_item: default_high_item(),
            high_value: default_high_value(),
            high_min_cost: default_high_min_cost(),
        }
    }
}

impl CurrencyConfig {
    /// Whether the high denomination participates in decomposition.
    pub const fn high_enabled(&self) -> bool {
        self.high_value > 0
    }

    /// The low-denomination stack ceiling.
    pub const fn low_ceiling(&self) -> u32 {
        self.low_item.max_stack
    }

    /// The high-denomination stack ceiling.
    pub const fn high_ceiling(&self) -> u32 {
        self.high_item.max_stack
    }

    /// Whether a stack is low-denomination currency.
    pub fn is_low_currency(&self, stack: &ItemStack) -> bool {
        stack.is_similar(&self.low_item)
    }

    /// Whether a stack is high-denomination currency.
    pub fn is_high_currency(&self, stack: &ItemStack) -> bool {
        self.high_enabled() && stack.is_similar(&self.high_item)
    }

    /// Whether a stack is currency of either denomination.
    pub fn is_currency(&self, stack: &ItemStack) -> bool {
        self.is_low_currency(stack) || self.is_high_currency(stack)
    }

    /// A low-denomination stack of the given amount.
    pub fn low_stack(&self, amount: u32) -> ItemStack {
        self.low_item.with_amount(amount)
    }

    /// A high-denomination stack of the given amount.
    pub fn high_stack(&self, amount: u32) -> ItemStack {
        self.high_item.with_amount(amount)
    }

    /// The largest price representable as a single stack pair: one full low
    /// stack plus, when the high denomination is enabled, one full high
    /// stack's worth of value.
    pub fn max_representable(&self) -> u32 {
        let high = if self.high_enabled() {
            u64::from(self.high_ceiling()).saturating_mul(u64::from(self.high_value))
        } else {
            0
        };
        u64::from(self.low_ceiling())
            .saturating_add(high)
            .try_into()
            .unwrap_or(u32::MAX)
    }

    /// Check that a price can be decomposed into a currency stack pair.
    pub fn validate_price(&self, price: Price) -> Result<(), CurrencyError> {
        let max = self.max_representable();
        if price.value() > max {
            return Err(CurrencyError::UnrepresentablePrice { price, max });
        }
        Ok(())
    }
}
