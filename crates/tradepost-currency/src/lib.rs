//! Dual-denomination currency model for the Tradepost trading engine.
//!
//! Prices are abstract non-negative integers. This crate converts them to
//! and from concrete stacked currency items (a low denomination worth 1 and
//! an optional high denomination worth a fixed multiple) and settles value
//! against container snapshots.
//!
//! ## Modules
//! - [`config`]: the [`CurrencyConfig`] value threaded through every
//!   currency function.
//! - [`pair`]: [`CurrencyStackPair`] and the lossless decompose/compose
//!   conversion.
//! - [`value`]: settlement against container snapshots (total, remove,
//!   deposit).
//! - [`error`]: typed currency failures.

pub mod config;
pub mod error;
pub mod pair;
pub mod value;

pub use config::CurrencyConfig;
pub use error::CurrencyError;
pub use pair::CurrencyStackPair;
pub use value::{contains_value, deposit, remove_value, total_value};
