//! Error types for currency decomposition and settlement.

use tradepost_types::Price;

/// Errors that can occur while converting prices to concrete currency
/// stacks or while moving currency value in and out of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CurrencyError {
    /// The price cannot be represented within the configured denomination
    /// stack ceilings.
    #[error("price {price} exceeds the representable maximum of {max}")]
    UnrepresentablePrice {
        /// The offending price.
        price: Price,
        /// The largest representable price under the current configuration.
        max: u32,
    },

    /// The container does not hold enough currency value.
    #[error("needed {needed} currency value but only {available} is available")]
    InsufficientFunds {
        /// The value that was to be removed.
        needed: u32,
        /// The total currency value actually present.
        available: u64,
    },

    /// Breaking a high-denomination unit produced change that does not fit
    /// into the container's empty slots.
    #[error("no room to place {change} low-denomination change")]
    NoRoomForChange {
        /// The change value that could not be placed.
        change: u32,
    },

    /// A currency deposit did not fit into the container.
    #[error("no room to deposit {leftover} currency value")]
    NoRoomForCurrency {
        /// The value that could not be placed.
        leftover: u32,
    },
}
