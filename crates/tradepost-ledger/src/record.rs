//! Trade records: what gets written to the log for every completed trade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tradepost_types::{ParticipantId, ShopPolicy, TradeId, TraderId, TradingRecipe};

/// A single completed trade, as appended to the [`TradeLog`].
///
/// Records are written only for trades that committed; aborted proposals
/// never reach the log.
///
/// [`TradeLog`]: crate::TradeLog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique id of the trade.
    pub trade: TradeId,
    /// When the trade committed.
    pub recorded_at: DateTime<Utc>,
    /// The trader whose offer was taken.
    pub trader: TraderId,
    /// The counterpart who took the offer.
    pub counterpart: ParticipantId,
    /// The policy the trader was running.
    pub policy: ShopPolicy,
    /// The recipe that was executed, as presented to the counterpart.
    pub recipe: TradingRecipe,
    /// The currency value withheld as tax, 0 when taxation is disabled.
    pub tax_withheld: u32,
}

impl TradeRecord {
    /// Build a record for a trade that just committed, stamped with the
    /// current time and a fresh trade id.
    pub fn new(
        trader: TraderId,
        counterpart: ParticipantId,
        policy: ShopPolicy,
        recipe: TradingRecipe,
        tax_withheld: u32,
    ) -> Self {
        Self {
            trade: TradeId::new(),
            recorded_at: Utc::now(),
            trader,
            counterpart,
            policy,
            recipe,
            tax_withheld,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tradepost_types::ItemStack;

    #[test]
    fn records_survive_a_serde_round_trip() {
        let record = TradeRecord::new(
            TraderId::new(),
            ParticipantId::new(),
            ShopPolicy::Barter,
            TradingRecipe::new(
                ItemStack::new("bread", 1),
                ItemStack::new("wheat", 3),
                None,
            ),
            2,
        );
        let json = serde_json::to_string(&record).unwrap();
        let restored: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
