//! The trader: an owned shop with a policy and an offer store.

use serde::{Deserialize, Serialize};

use tradepost_stock::ContainerSnapshot;
use tradepost_types::{Offer, OfferKey, ParticipantId, ShopPolicy, TraderId, TradingRecipe};

use crate::config::ShopConfig;
use crate::error::OfferError;
use crate::offers::OfferStore;
use crate::persist::OfferRecord;
use crate::recipes::available_recipes;

/// A shop: one owner, one policy, one offer store.
///
/// The stock container is deliberately not part of this value; it is an
/// external collaborator handed to the pipeline per trade attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trader {
    /// Unique id of the trader.
    pub id: TraderId,
    /// The participant who owns the shop.
    pub owner: ParticipantId,
    /// The policy all offers are traded under.
    pub policy: ShopPolicy,
    /// The offers, validated on the way in.
    offers: OfferStore,
}

impl Trader {
    /// Create a trader with no offers.
    pub fn new(owner: ParticipantId, policy: ShopPolicy) -> Self {
        Self {
            id: TraderId::new(),
            owner,
            policy,
            offers: OfferStore::new(),
        }
    }

    /// Whether the given participant owns this shop.
    pub fn is_owned_by(&self, participant: ParticipantId) -> bool {
        self.owner == participant
    }

    /// The trader's offers.
    pub const fn offers(&self) -> &OfferStore {
        &self.offers
    }

    /// Insert an offer after validating it against the policy and the
    /// currency configuration. Returns the replaced offer, if any.
    ///
    /// Unrepresentable prices are rejected here, at the edge, so nothing
    /// downstream ever has to guess at a price it cannot express.
    pub fn put_offer(
        &mut self,
        offer: Offer,
        config: &ShopConfig,
    ) -> Result<Option<Offer>, OfferError> {
        self.validate_offer(&offer, config)?;
        Ok(self.offers.upsert(offer))
    }

    /// Remove and return the offer stored under the given key.
    pub fn remove_offer(&mut self, key: &OfferKey) -> Option<Offer> {
        self.offers.remove(key)
    }

    /// Load persisted offer records, validating each offer on the way in.
    ///
    /// Offers that fail validation (unrepresentable price, wrong shape for
    /// the policy) are skipped with a warning rather than failing the whole
    /// load. Returns the number of offers actually loaded.
    pub fn load_offers(&mut self, records: Vec<OfferRecord>, config: &ShopConfig) -> usize {
        let mut loaded = 0usize;
        let decoded = crate::persist::from_records(records);
        for offer in decoded.all().iter().cloned() {
            match self.put_offer(offer, config) {
                Ok(_) => loaded = loaded.saturating_add(1),
                Err(error) => {
                    tracing::warn!(trader = %self.id, %error, "skipping invalid persisted offer");
                }
            }
        }
        loaded
    }

    /// The recipes currently backed by the given container snapshot.
    pub fn recipes(&self, snapshot: &ContainerSnapshot, config: &ShopConfig) -> Vec<TradingRecipe> {
        available_recipes(&self.offers, snapshot, self.policy, config)
    }

    fn validate_offer(&self, offer: &Offer, config: &ShopConfig) -> Result<(), OfferError> {
        let shape_fits = matches!(
            (self.policy, offer),
            (ShopPolicy::Sell | ShopPolicy::Buy, Offer::Price(_))
                | (ShopPolicy::Barter, Offer::Barter(_))
                | (ShopPolicy::Book, Offer::Titled(_))
        );
        if !shape_fits {
            return Err(OfferError::ShapeMismatch {
                policy: self.policy,
            });
        }

        if let Some(price) = offer.price() {
            if price.is_zero() {
                return Err(OfferError::ZeroPrice);
            }
            // Buy payouts are a single low-denomination stack, so buy
            // prices are bounded by the low ceiling alone.
            let max = if self.policy == ShopPolicy::Buy {
                config.currency.low_ceiling()
            } else {
                config.currency.max_representable()
            };
            if price.value() > max {
                return Err(OfferError::UnrepresentablePrice { price, max });
            }
        }

        if self.policy == ShopPolicy::Buy {
            if let Offer::Price(priced) = offer {
                if config.currency.is_currency(&priced.item) {
                    return Err(OfferError::CurrencyNotTradable);
                }
            }
        }

        Ok(())
    }
}
