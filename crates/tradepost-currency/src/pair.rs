//! Decomposing prices into currency stack pairs and back.

use serde::{Deserialize, Serialize};

use tradepost_types::{ItemStack, Price};

use crate::config::CurrencyConfig;
use crate::error::CurrencyError;

/// The concrete form of a price: an amount of low-denomination currency and
/// an amount of high-denomination currency, each within its stack ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStackPair {
    /// Low-denomination amount.
    pub low: u32,
    /// High-denomination amount.
    pub high: u32,
}

impl CurrencyStackPair {
    /// Decompose a price into a stack pair.
    ///
    /// Prices at or below the high-min-cost threshold, or under a disabled
    /// high denomination, use the low denomination only. Otherwise the high
    /// amount is the price divided by the high unit value, capped at the
    /// high stack ceiling, and the remainder goes into the low denomination.
    /// Fails with [`CurrencyError::UnrepresentablePrice`] when the remainder
    /// exceeds the low stack ceiling; never silently emits a wrong value.
    pub fn decompose(config: &CurrencyConfig, price: Price) -> Result<Self, CurrencyError> {
        let mut remaining = price.value();
        let mut high = 0u32;
        if config.high_enabled() && remaining > config.high_min_cost {
            high = remaining
                .checked_div(config.high_value)
                .unwrap_or(0)
                .min(config.high_ceiling());
            remaining = remaining.saturating_sub(high.saturating_mul(config.high_value));
        }
        if remaining > config.low_ceiling() {
            return Err(CurrencyError::UnrepresentablePrice {
                price,
                max: config.max_representable(),
            });
        }
        Ok(Self {
            low: remaining,
            high,
        })
    }

    /// Compose the pair back into a price: `low + high * high_value`.
    ///
    /// Exact inverse of [`Self::decompose`] for every representable price.
    pub fn compose(self, config: &CurrencyConfig) -> Price {
        let total = u64::from(self.low)
            .saturating_add(u64::from(self.high).saturating_mul(u64::from(config.high_value)));
        Price(u32::try_from(total).unwrap_or(u32::MAX))
    }

    /// Whether the pair carries no value at all.
    pub const fn is_empty(self) -> bool {
        self.low == 0 && self.high == 0
    }

    /// The concrete cost stacks for a trading recipe, high denomination
    /// first, omitting empty denominations.
    pub fn cost_stacks(self, config: &CurrencyConfig) -> (Option<ItemStack>, Option<ItemStack>) {
        let high = (self.high > 0).then(|| config.high_stack(self.high));
        let low = (self.low > 0).then(|| config.low_stack(self.low));
        match (high, low) {
            (Some(high), low) => (Some(high), low),
            (None, low) => (low, None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decompose_splits_above_the_threshold() {
        let config = CurrencyConfig::default();
        let pair = CurrencyStackPair::decompose(&config, Price(25)).unwrap();
        assert_eq!(pair, CurrencyStackPair { low: 7, high: 2 });
        assert_eq!(pair.compose(&config), Price(25));
    }

    #[test]
    fn decompose_stays_low_below_the_threshold() {
        let config = CurrencyConfig::default();
        let pair = CurrencyStackPair::decompose(&config, Price(10)).unwrap();
        assert_eq!(pair, CurrencyStackPair { low: 10, high: 0 });
    }

    #[test]
    fn decompose_rejects_unrepresentable_prices() {
        let config = CurrencyConfig::default();
        let result = CurrencyStackPair::decompose(&config, Price(641));
        assert_eq!(
            result,
            Err(CurrencyError::UnrepresentablePrice {
                price: Price(641),
                max: 640,
            })
        );
    }

    #[test]
    fn round_trip_is_lossless_across_the_full_range() {
        let config = CurrencyConfig::default();
        for value in 0..=config.max_representable() {
            let price = Price(value);
            let pair = CurrencyStackPair::decompose(&config, price).unwrap();
            assert!(pair.low <= config.low_ceiling());
            assert!(pair.high <= config.high_ceiling());
            assert_eq!(pair.compose(&config), price);
        }
    }

    #[test]
    fn disabled_high_denomination_uses_low_only() {
        let config = CurrencyConfig {
            high_value: 0,
            ..CurrencyConfig::default()
        };
        let pair = CurrencyStackPair::decompose(&config, Price(40)).unwrap();
        assert_eq!(pair, CurrencyStackPair { low: 40, high: 0 });
        assert!(CurrencyStackPair::decompose(&config, Price(65)).is_err());
    }

    #[test]
    fn cost_stacks_put_the_high_denomination_first() {
        let config = CurrencyConfig::default();
        let pair = CurrencyStackPair { low: 7, high: 2 };
        let (first, second) = pair.cost_stacks(&config);
        assert_eq!(first.unwrap().kind.as_str(), "emerald_block");
        assert_eq!(second.unwrap().amount, 7);
    }

    #[test]
    fn cost_stacks_collapse_when_only_low_is_present() {
        let config = CurrencyConfig::default();
        let pair = CurrencyStackPair { low: 10, high: 0 };
        let (first, second) = pair.cost_stacks(&config);
        assert_eq!(first.unwrap().kind.as_str(), "emerald");
        assert!(second.is_none());
    }
}
