//! Stock containers and owned snapshots for the Tradepost trading engine.
//!
//! A trader's stock lives in a finite, slot-ordered container. This crate
//! provides the [`StockContainer`] access trait, the owned
//! [`ContainerSnapshot`] value that all trade-time mutation happens on, and
//! the slot operations (add, remove, count) those mutations are built from.
//!
//! ## Modules
//! - [`container`]: the [`StockContainer`] trait and an in-memory backing.
//! - [`snapshot`]: owned snapshots and functional slot operations.
//! - [`error`]: typed failures for slot operations and container access.

pub mod container;
pub mod error;
pub mod snapshot;

pub use container::{InMemoryContainer, StockContainer};
pub use error::{ContainerUnavailable, StockError};
pub use snapshot::{ContainerSnapshot, ItemCount};
