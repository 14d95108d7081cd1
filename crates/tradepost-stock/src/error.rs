//! Error types for the tradepost-stock crate.
//!
//! All slot operations that can fail return typed errors rather than
//! panicking. Failures are expected outcomes of normal operation (a shop
//! running out of stock or space) and are handled by the trade pipeline.

use tradepost_types::ItemKind;

/// Errors that can occur during snapshot slot operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockError {
    /// The container does not hold enough of the required item.
    #[error("insufficient stock of {kind}: {missing} more needed")]
    InsufficientStock {
        /// The item kind that ran short.
        kind: ItemKind,
        /// How many items could not be removed.
        missing: u32,
    },

    /// The container has no room left for an incoming item.
    #[error("container full: {leftover} of {kind} could not be placed")]
    NoFreeSlots {
        /// The item kind that could not be placed.
        kind: ItemKind,
        /// How many items could not be placed.
        leftover: u32,
    },
}

/// The backing container was removed or destroyed between session start
/// and the trade attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the backing stock container is missing or unreachable")]
pub struct ContainerUnavailable;
