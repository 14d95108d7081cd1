//! Error taxonomy for offer editing and trade execution.
//!
//! Every abort reason carries its own distinct message; a counterpart
//! always learns why a trade did not happen. All of these are expected
//! outcomes of normal operation and are returned as typed results, never
//! raised as faults.

use tradepost_currency::CurrencyError;
use tradepost_stock::{ContainerUnavailable, StockError};
use tradepost_types::{Price, ShopPolicy};

/// Reasons an offer is rejected at creation or edit time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferError {
    /// The offer shape does not fit the trader's policy (e.g. a barter
    /// offer handed to a sell shop).
    #[error("offer shape does not fit the {policy:?} policy")]
    ShapeMismatch {
        /// The trader's policy.
        policy: ShopPolicy,
    },

    /// Priced offers must carry a price of at least 1.
    #[error("offer price must be at least 1")]
    ZeroPrice,

    /// The price cannot be represented under the current currency
    /// configuration. Rejected here rather than silently reset to zero.
    #[error("price {price} exceeds the representable maximum of {max}")]
    UnrepresentablePrice {
        /// The offending price.
        price: Price,
        /// The largest price this offer shape can carry.
        max: u32,
    },

    /// Currency items themselves cannot be the traded item of a buy offer.
    #[error("currency items cannot be bought")]
    CurrencyNotTradable,
}

/// Reasons a trade proposal aborts.
///
/// The stock, currency, and container error kinds pass through
/// transparently so their specific messages (insufficient stock, container
/// full, insufficient funds, no room for change) reach the counterpart
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    /// The counterpart is the shop's own owner and self-trading is
    /// disabled.
    #[error("trading with your own shop is not allowed")]
    SelfTradeDenied,

    /// The shop owner is currently present and the owner lock is enabled.
    #[error("trading is blocked while the shop owner is present")]
    OwnerPresencePolicyViolation,

    /// The backing container disappeared between session start and the
    /// trade attempt.
    #[error(transparent)]
    ContainerUnavailable(#[from] ContainerUnavailable),

    /// No offer of the trader matches the proposed recipe.
    #[error("no offer matches the proposed trade")]
    UnknownOffer,

    /// The items the counterpart presented do not satisfy the recipe's
    /// cost slots.
    #[error("the presented items do not match the required cost items")]
    PresentedItemMismatch,

    /// A stock mutation failed (insufficient stock or no free slots).
    #[error(transparent)]
    Stock(#[from] StockError),

    /// A currency settlement step failed (insufficient funds, no room for
    /// change or deposit).
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}
