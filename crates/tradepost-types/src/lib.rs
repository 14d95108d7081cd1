//! Shared type definitions for the Tradepost trading engine.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace: item identity and stacks, prices, offer shapes, trading
//! recipes, trade proposals, and type-safe entity IDs.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`item`] -- Item kinds, metadata, stacks, and similarity predicates
//! - [`price`] -- The canonical integer unit of value
//! - [`offer`] -- The three offer shapes and the shop policy enum
//! - [`recipe`] -- Trading recipes and trade proposals

pub mod ids;
pub mod item;
pub mod offer;
pub mod price;
pub mod recipe;

// Re-export all public types at crate root for convenience.
pub use ids::{ParticipantId, TradeId, TraderId};
pub use item::{DEFAULT_MAX_STACK, ItemKey, ItemKind, ItemMatching, ItemMeta, ItemStack};
pub use offer::{BarterOffer, Offer, OfferKey, PriceOffer, ShopPolicy, TitledOffer};
pub use price::Price;
pub use recipe::{TradeProposal, TradingRecipe};
