//! Recipe projection: deriving the currently-available trades.
//!
//! Projection reads an offer store and a container snapshot and emits the
//! recipes whose required stock is actually present, in offer order. It is
//! recomputed on demand and never cached; the result is what a UI shows to
//! a counterpart.

use tradepost_currency::{contains_value, CurrencyStackPair};
use tradepost_stock::ContainerSnapshot;
use tradepost_types::{ItemStack, Offer, Price, ShopPolicy, TradingRecipe};

use crate::config::ShopConfig;
use crate::offers::OfferStore;

/// The recipes currently backed by stock, in offer order.
///
/// Offers whose stock is missing are silently omitted; offers whose price
/// turns out to be unrepresentable (which offer validation should have
/// prevented) are skipped with a warning rather than emitted with a wrong
/// price.
pub fn available_recipes(
    offers: &OfferStore,
    snapshot: &ContainerSnapshot,
    policy: ShopPolicy,
    config: &ShopConfig,
) -> Vec<TradingRecipe> {
    offers
        .all()
        .iter()
        .filter_map(|offer| project(offer, snapshot, policy, config))
        .collect()
}

/// Project a single offer into a recipe, if its stock backs it.
fn project(
    offer: &Offer,
    snapshot: &ContainerSnapshot,
    policy: ShopPolicy,
    config: &ShopConfig,
) -> Option<TradingRecipe> {
    match (policy, offer) {
        (ShopPolicy::Sell, Offer::Price(offer)) => {
            if !snapshot.contains_at_least(&offer.item, offer.item.amount) {
                return None;
            }
            let costs = price_costs(config, offer.price)?;
            let (cost1, cost2) = costs;
            Some(TradingRecipe::new(offer.item.clone(), cost1, cost2))
        }
        (ShopPolicy::Buy, Offer::Price(offer)) => {
            // The payout is a single low-denomination stack; offer
            // validation keeps buy prices within the low ceiling.
            if offer.price.value() > config.currency.low_ceiling() {
                tracing::warn!(price = %offer.price, "skipping buy offer over the low-denomination ceiling");
                return None;
            }
            if !contains_value(snapshot, &config.currency, offer.price.value()) {
                return None;
            }
            let payout = config.currency.low_stack(offer.price.value());
            Some(TradingRecipe::new(payout, offer.item.clone(), None))
        }
        (ShopPolicy::Barter, Offer::Barter(offer)) => {
            if !snapshot.contains_at_least(&offer.result, offer.result.amount) {
                return None;
            }
            Some(TradingRecipe::new(
                offer.result.clone(),
                offer.cost1.clone(),
                offer.cost2.clone(),
            ))
        }
        (ShopPolicy::Book, Offer::Titled(offer)) => {
            // One blank consumable is used up per trade, independent of
            // the priced book itself.
            let blank = &config.trading.blank_book_item;
            if !snapshot
                .stacks()
                .any(|stack| &stack.kind == blank && stack.amount > 0)
            {
                return None;
            }
            let book = snapshot.stacks().find(|stack| {
                stack.kind == config.trading.book_item
                    && stack.title() == Some(offer.title.as_str())
            })?;
            let costs = price_costs(config, offer.price)?;
            let (cost1, cost2) = costs;
            Some(TradingRecipe::new(book.with_amount(1), cost1, cost2))
        }
        _ => {
            tracing::warn!(policy = ?policy, "offer shape does not fit the shop policy; skipping");
            None
        }
    }
}

/// Decompose a price into concrete cost stacks, skipping (with a warning)
/// prices that cannot be represented or that carry no value.
fn price_costs(
    config: &ShopConfig,
    price: Price,
) -> Option<(ItemStack, Option<ItemStack>)> {
    let pair = match CurrencyStackPair::decompose(&config.currency, price) {
        Ok(pair) => pair,
        Err(error) => {
            tracing::warn!(%price, %error, "skipping offer with unrepresentable price");
            return None;
        }
    };
    // A zero-value pair can only come from a zero price, which offer
    // validation rejects; skip it rather than emit a free recipe.
    let (first, second) = pair.cost_stacks(&config.currency);
    Some((first?, second))
}
