//! The per-trader offer store.

use serde::{Deserialize, Serialize};

use tradepost_types::{Offer, OfferKey};

/// An insertion-ordered collection of offers, at most one per key.
///
/// Keys are the traded item's similarity identity, or the title for book
/// offers. Upserting an offer for an already-offered key removes the old
/// offer and appends the new one at the end; the surviving offers keep
/// their relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferStore {
    /// The offers, in insertion order.
    offers: Vec<Offer>,
}

impl OfferStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self { offers: Vec::new() }
    }

    /// The number of offers.
    pub const fn len(&self) -> usize {
        self.offers.len()
    }

    /// Whether the store holds no offers.
    pub const fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// All offers, in insertion order.
    pub fn all(&self) -> &[Offer] {
        &self.offers
    }

    /// The offer stored under the given key, if any.
    pub fn find(&self, key: &OfferKey) -> Option<&Offer> {
        self.offers.iter().find(|offer| &offer.key() == key)
    }

    /// Insert an offer, replacing any existing offer with the same key.
    ///
    /// The new offer is appended at the end; returns the replaced offer,
    /// if there was one.
    pub fn upsert(&mut self, offer: Offer) -> Option<Offer> {
        let replaced = self.remove(&offer.key());
        self.offers.push(offer);
        replaced
    }

    /// Remove and return the offer stored under the given key.
    pub fn remove(&mut self, key: &OfferKey) -> Option<Offer> {
        let position = self.offers.iter().position(|offer| &offer.key() == key)?;
        Some(self.offers.remove(position))
    }

    /// Remove all offers.
    pub fn clear(&mut self) {
        self.offers.clear();
    }
}

impl FromIterator<Offer> for OfferStore {
    fn from_iter<I: IntoIterator<Item = Offer>>(iter: I) -> Self {
        let mut store = Self::new();
        for offer in iter {
            store.upsert(offer);
        }
        store
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tradepost_types::{ItemStack, Price, PriceOffer};

    fn priced(kind: &str, price: u32) -> Offer {
        Offer::Price(PriceOffer {
            item: ItemStack::new(kind, 1),
            price: Price(price),
        })
    }

    #[test]
    fn upsert_replaces_by_key() {
        let mut store = OfferStore::new();
        store.upsert(priced("apple", 5));
        store.upsert(priced("bread", 8));
        // Re-offering apples replaces the old offer and moves it to the end.
        let replaced = store.upsert(priced("apple", 7));
        assert_eq!(replaced, Some(priced("apple", 5)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.all(), &[priced("bread", 8), priced("apple", 7)]);
    }

    #[test]
    fn find_and_remove_use_the_same_key() {
        let mut store = OfferStore::new();
        let offer = priced("apple", 5);
        let key = offer.key();
        store.upsert(offer.clone());
        assert_eq!(store.find(&key), Some(&offer));
        assert_eq!(store.remove(&key), Some(offer));
        assert!(store.find(&key).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn from_iterator_deduplicates_by_key() {
        let store: OfferStore = vec![priced("apple", 5), priced("apple", 9)]
            .into_iter()
            .collect();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all(), &[priced("apple", 9)]);
    }
}
