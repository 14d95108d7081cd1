//! Offer stores, recipe projection, and the trade pipeline.
//!
//! This crate ties the data model, stock snapshots, and currency math into
//! the trading engine proper: a [`Trader`] holds validated offers, the
//! recipe projection derives the currently-available trades from real
//! container contents, and the [`TradePipeline`] validates one proposal
//! end-to-end and atomically commits or aborts it.
//!
//! ## Modules
//! - [`config`]: YAML-backed [`ShopConfig`] and the tax rule.
//! - [`offers`]: the per-trader [`OfferStore`].
//! - [`trader`]: the [`Trader`] aggregate and offer validation.
//! - [`recipes`]: projection of offers into available recipes.
//! - [`pipeline`]: the [`TradePipeline`] state machine.
//! - [`persist`]: flat offer records for the persistence collaborator.
//! - [`error`]: the offer and trade error taxonomies.

pub mod config;
pub mod error;
pub mod offers;
pub mod persist;
pub mod pipeline;
pub mod recipes;
pub mod trader;

pub use config::{ConfigError, ShopConfig, TradingConfig};
pub use error::{OfferError, TradeError};
pub use offers::OfferStore;
pub use persist::{from_records, to_records, OfferRecord};
pub use pipeline::TradePipeline;
pub use recipes::available_recipes;
pub use trader::Trader;
