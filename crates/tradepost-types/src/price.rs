//! The canonical unit of value.

use serde::{Deserialize, Serialize};

/// A non-negative integer price in canonical currency units.
///
/// Whether a given price is *representable* as concrete currency stacks
/// depends on the currency configuration; that check lives in the currency
/// crate. The price itself is just the abstract value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(pub u32);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// The raw value in canonical units.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether the price is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Price {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Price> for u32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        Self::from(price.0)
    }
}
