//! Offer persistence records.
//!
//! The on-disk schema belongs to the persistence collaborator; this module
//! only fixes the field-level contract: one flat record per offer, with a
//! traded-item reference and either one integer price field or up to two
//! cost-item fields. Loading is lenient: records that decode to no valid
//! offer shape are skipped with a warning rather than failing the whole
//! load.

use serde::{Deserialize, Serialize};

use tradepost_types::{BarterOffer, ItemStack, Offer, Price, PriceOffer, TitledOffer};

use crate::offers::OfferStore;

/// A flat, shape-agnostic persistence record for one offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    /// The traded or result item, for price and barter offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemStack>,
    /// The first cost item, for barter offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost1: Option<ItemStack>,
    /// The second cost item, for barter offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost2: Option<ItemStack>,
    /// The book title, for titled offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The price, for price and titled offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

impl From<&Offer> for OfferRecord {
    fn from(offer: &Offer) -> Self {
        match offer {
            Offer::Price(offer) => Self {
                item: Some(offer.item.clone()),
                price: Some(offer.price.value()),
                ..Self::default()
            },
            Offer::Barter(offer) => Self {
                item: Some(offer.result.clone()),
                cost1: Some(offer.cost1.clone()),
                cost2: offer.cost2.clone(),
                ..Self::default()
            },
            Offer::Titled(offer) => Self {
                title: Some(offer.title.clone()),
                price: Some(offer.price.value()),
                ..Self::default()
            },
        }
    }
}

impl OfferRecord {
    /// Decode the record back into an offer, if it holds a valid shape.
    fn into_offer(self) -> Option<Offer> {
        match self {
            Self {
                title: Some(title),
                price: Some(price),
                item: None,
                cost1: None,
                cost2: None,
            } => Some(Offer::Titled(TitledOffer {
                title,
                price: Price(price),
            })),
            Self {
                item: Some(result),
                cost1: Some(cost1),
                cost2,
                title: None,
                price: None,
            } => Some(Offer::Barter(BarterOffer {
                result,
                cost1,
                cost2,
            })),
            Self {
                item: Some(item),
                price: Some(price),
                cost1: None,
                cost2: None,
                title: None,
            } => Some(Offer::Price(PriceOffer {
                item,
                price: Price(price),
            })),
            _ => None,
        }
    }
}

/// Serialize an offer store into persistence records, in offer order.
pub fn to_records(offers: &OfferStore) -> Vec<OfferRecord> {
    offers.all().iter().map(OfferRecord::from).collect()
}

/// Rebuild an offer store from persistence records.
///
/// Malformed records are skipped with a warning; surviving offers keep
/// their record order, deduplicated by key as usual.
pub fn from_records(records: Vec<OfferRecord>) -> OfferStore {
    records
        .into_iter()
        .filter_map(|record| {
            let offer = record.clone().into_offer();
            if offer.is_none() {
                tracing::warn!(?record, "skipping malformed offer record");
            }
            offer
        })
        .collect()
}
