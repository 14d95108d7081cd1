//! The append-only trade log.

use tradepost_types::TraderId;

use crate::record::TradeRecord;

/// An in-memory, append-only log of committed trades.
///
/// Entries are never modified or deleted. The log is a plain value owned
/// by whoever drives the engine; nothing in it is global.
#[derive(Debug, Default)]
pub struct TradeLog {
    /// All records, in commit order.
    records: Vec<TradeRecord>,
}

impl TradeLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// The number of recorded trades.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no trades have been recorded.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record for a committed trade.
    pub fn record(&mut self, record: TradeRecord) {
        tracing::debug!(
            trade = %record.trade,
            trader = %record.trader,
            counterpart = %record.counterpart,
            policy = ?record.policy,
            "trade recorded"
        );
        self.records.push(record);
    }

    /// All records, in commit order.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// The records for one trader, in commit order.
    pub fn records_for(&self, trader: TraderId) -> impl Iterator<Item = &TradeRecord> {
        self.records.iter().filter(move |r| r.trader == trader)
    }

    /// The total currency value withheld as tax across all records.
    pub fn total_tax_withheld(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |total, r| total.saturating_add(u64::from(r.tax_withheld)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tradepost_types::{ItemStack, ParticipantId, ShopPolicy, TradingRecipe};

    fn record_for(trader: TraderId, tax: u32) -> TradeRecord {
        TradeRecord::new(
            trader,
            ParticipantId::new(),
            ShopPolicy::Sell,
            TradingRecipe::new(
                ItemStack::new("stone", 4),
                ItemStack::new("emerald", 10),
                None,
            ),
            tax,
        )
    }

    #[test]
    fn records_append_in_order() {
        let trader = TraderId::new();
        let mut log = TradeLog::new();
        assert!(log.is_empty());
        log.record(record_for(trader, 1));
        log.record(record_for(trader, 2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.records().first().unwrap().tax_withheld, 1);
    }

    #[test]
    fn records_for_filters_by_trader() {
        let ours = TraderId::new();
        let theirs = TraderId::new();
        let mut log = TradeLog::new();
        log.record(record_for(ours, 0));
        log.record(record_for(theirs, 0));
        log.record(record_for(ours, 0));
        assert_eq!(log.records_for(ours).count(), 2);
        assert_eq!(log.records_for(theirs).count(), 1);
    }

    #[test]
    fn tax_totals_accumulate() {
        let trader = TraderId::new();
        let mut log = TradeLog::new();
        log.record(record_for(trader, 3));
        log.record(record_for(trader, 4));
        assert_eq!(log.total_tax_withheld(), 7);
    }
}
