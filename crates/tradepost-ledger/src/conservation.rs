//! Currency-value conservation checks for committed trades.
//!
//! A committed trade changes a container's currency value by a known
//! amount: a sell trade deposits the taxed price, a buy trade removes the
//! full payout, barter and book trades move no currency at all. The check
//! compares the value held before and after the commit against that
//! expectation. Well-formed pipeline mutations satisfy it by construction;
//! the check exists to catch corruption in the settlement math.

use tradepost_currency::{total_value, CurrencyConfig};
use tradepost_stock::ContainerSnapshot;

/// A detected currency-value imbalance for a single trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("currency value changed by {actual}, expected {expected}")]
pub struct ValueAnomaly {
    /// The delta the trade was supposed to produce.
    pub expected: i64,
    /// The delta actually observed between the snapshots.
    pub actual: i64,
}

/// The outcome of a conservation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConservationResult {
    /// The observed value delta matches the expectation.
    Balanced,
    /// The container's currency value moved by the wrong amount.
    Anomaly(ValueAnomaly),
}

impl ConservationResult {
    /// Whether the check passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Compare the currency value of two snapshots of the same container
/// against the delta a trade was expected to produce.
pub fn verify_value_delta(
    config: &CurrencyConfig,
    before: &ContainerSnapshot,
    after: &ContainerSnapshot,
    expected: i64,
) -> ConservationResult {
    let before_value = i64::try_from(total_value(before, config)).unwrap_or(i64::MAX);
    let after_value = i64::try_from(total_value(after, config)).unwrap_or(i64::MAX);
    let actual = after_value.saturating_sub(before_value);
    if actual == expected {
        ConservationResult::Balanced
    } else {
        tracing::error!(expected, actual, "currency conservation violated");
        ConservationResult::Anomaly(ValueAnomaly { expected, actual })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tradepost_currency::deposit;

    #[test]
    fn matching_delta_is_balanced() {
        let config = CurrencyConfig::default();
        let before = ContainerSnapshot::empty(9);
        let after = deposit(&before, &config, 25).unwrap();
        assert!(verify_value_delta(&config, &before, &after, 25).is_balanced());
    }

    #[test]
    fn unexpected_delta_is_an_anomaly() {
        let config = CurrencyConfig::default();
        let before = ContainerSnapshot::empty(9);
        let after = deposit(&before, &config, 25).unwrap();
        let result = verify_value_delta(&config, &before, &after, 20);
        assert_eq!(
            result,
            ConservationResult::Anomaly(ValueAnomaly {
                expected: 20,
                actual: 25,
            })
        );
    }

    #[test]
    fn untouched_container_balances_at_zero() {
        let config = CurrencyConfig::default();
        let snap = ContainerSnapshot::empty(3);
        assert!(verify_value_delta(&config, &snap, &snap, 0).is_balanced());
    }
}
