//! Trade log and conservation checks for the Tradepost trading engine.
//!
//! Every committed trade is appended to a [`TradeLog`] as a [`TradeRecord`];
//! aborted proposals never reach the log. The [`conservation`] module
//! cross-checks the settlement math by comparing container currency value
//! before and after a commit.
//!
//! ## Modules
//! - [`log`]: the append-only [`TradeLog`].
//! - [`record`]: the per-trade [`TradeRecord`].
//! - [`conservation`]: currency-value delta verification.

pub mod conservation;
pub mod log;
pub mod record;

pub use conservation::{verify_value_delta, ConservationResult, ValueAnomaly};
pub use log::TradeLog;
pub use record::TradeRecord;
