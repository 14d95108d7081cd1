//! Offer shapes: what a trader has committed to exchange.
//!
//! The source system modelled the four shop policies as a deep class
//! hierarchy with template-method hooks. Here an offer is a closed sum
//! type over the three data shapes, and the shop policy decides how each
//! shape is projected into recipes and settled.
//!
//! Offers are keyed by the traded item's similarity identity (or by title
//! for book offers); a trader keeps at most one offer per key.

use serde::{Deserialize, Serialize};

use crate::item::{ItemKey, ItemStack};
use crate::price::Price;

/// The four shop policies sharing the trade pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopPolicy {
    /// The trader sells items from stock at a fixed price.
    Sell,
    /// The trader buys items into stock at a fixed price.
    Buy,
    /// The trader exchanges concrete item stacks, no price math.
    Barter,
    /// The trader sells written books, keyed by title, consuming a blank
    /// book from stock per trade.
    Book,
}

/// An offer to exchange a concrete item stack for an abstract price.
///
/// Used by both the sell and buy policies; the *meaning* of the price
/// differs (cost to acquire the item vs. payout for handing it in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOffer {
    /// The traded item and its per-trade quantity.
    pub item: ItemStack,
    /// The price in canonical currency units.
    pub price: Price,
}

/// An offer to exchange one result stack for one or two cost stacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarterOffer {
    /// The item handed out per trade.
    pub result: ItemStack,
    /// The first required cost item.
    pub cost1: ItemStack,
    /// The optional second required cost item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost2: Option<ItemStack>,
}

/// An offer keyed by a book title rather than an item identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledOffer {
    /// The book title this offer applies to.
    pub title: String,
    /// The price in canonical currency units.
    pub price: Price,
}

/// A trader's offer, one of the three shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Offer {
    /// Fixed-price offer (sell or buy policy).
    Price(PriceOffer),
    /// Item-for-item offer (barter policy).
    Barter(BarterOffer),
    /// Title-keyed priced offer (book policy).
    Titled(TitledOffer),
}

/// The key under which an offer is stored: at most one offer per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferKey {
    /// Keyed by the traded item's similarity identity.
    Item(ItemKey),
    /// Keyed by a book title.
    Title(String),
}

impl Offer {
    /// The key this offer is stored under.
    ///
    /// Price offers key on the traded item, barter offers on the result
    /// item, titled offers on the title.
    pub fn key(&self) -> OfferKey {
        match self {
            Self::Price(offer) => OfferKey::Item(offer.item.key()),
            Self::Barter(offer) => OfferKey::Item(offer.result.key()),
            Self::Titled(offer) => OfferKey::Title(offer.title.clone()),
        }
    }

    /// The price attached to this offer, if it has one.
    pub const fn price(&self) -> Option<Price> {
        match self {
            Self::Price(offer) => Some(offer.price),
            Self::Titled(offer) => Some(offer.price),
            Self::Barter(_) => None,
        }
    }
}
