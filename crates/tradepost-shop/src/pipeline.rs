//! The trade pipeline: validates one proposal end-to-end and commits or
//! aborts it.
//!
//! A trade attempt moves through `Opened -> Prepared -> {Applied |
//! Aborted}`. Preconditions (self-trade, owner lock, container existence)
//! are checked before any snapshot is taken. The candidate mutation is then
//! computed entirely against an owned [`ContainerSnapshot`]; only when
//! every step has succeeded is the snapshot committed back to the live
//! container in one operation. An abort at any point leaves the container
//! untouched -- there is no partial mutation to observe.
//!
//! Execution is single-threaded and cooperative: the surrounding system
//! serializes trade attempts against the same container.

use tradepost_currency::{deposit, remove_value};
use tradepost_ledger::{verify_value_delta, TradeRecord};
use tradepost_stock::{ContainerSnapshot, StockContainer};
use tradepost_types::{
    ItemStack, Offer, OfferKey, Price, ShopPolicy, TradeProposal, TradingRecipe,
};

use crate::config::ShopConfig;
use crate::error::TradeError;
use crate::trader::Trader;

/// The result of computing a candidate mutation for one trade.
struct Settlement {
    /// The fully-mutated snapshot, ready to commit.
    updated: ContainerSnapshot,
    /// The amount withheld as tax: currency value for priced payouts,
    /// item quantity for item intake.
    tax_withheld: u32,
    /// The currency-value delta the mutation is supposed to produce.
    expected_value_delta: i64,
}

/// Validates and settles trade proposals against a trader's container.
#[derive(Debug, Clone, Copy)]
pub struct TradePipeline<'a> {
    config: &'a ShopConfig,
}

impl<'a> TradePipeline<'a> {
    /// Create a pipeline over the given configuration.
    pub const fn new(config: &'a ShopConfig) -> Self {
        Self { config }
    }

    /// Execute one trade proposal against the trader's container.
    ///
    /// `owner_present` is the surrounding system's knowledge of whether
    /// the shop owner is currently present; it only matters when the
    /// owner lock is enabled.
    ///
    /// On success the container has been committed and a [`TradeRecord`]
    /// describing the applied trade is returned. On failure the container
    /// is untouched and the error names the single abort reason.
    pub fn execute<C: StockContainer>(
        &self,
        trader: &Trader,
        container: &mut C,
        proposal: &TradeProposal,
        owner_present: bool,
    ) -> Result<TradeRecord, TradeError> {
        let result = self.execute_inner(trader, container, proposal, owner_present);
        if let Err(error) = &result {
            tracing::debug!(
                trader = %trader.id,
                counterpart = %proposal.counterpart,
                %error,
                "trade aborted"
            );
        }
        result
    }

    fn execute_inner<C: StockContainer>(
        &self,
        trader: &Trader,
        container: &mut C,
        proposal: &TradeProposal,
        owner_present: bool,
    ) -> Result<TradeRecord, TradeError> {
        let trading = &self.config.trading;
        if trading.prevent_trading_with_own_shop && trader.is_owned_by(proposal.counterpart) {
            return Err(TradeError::SelfTradeDenied);
        }
        if trading.prevent_trading_while_owner_present && owner_present {
            return Err(TradeError::OwnerPresencePolicyViolation);
        }

        let snapshot = container.snapshot()?;

        self.verify_offer(trader, &proposal.recipe)?;
        self.check_presented(proposal)?;

        let settlement = self.settle(trader.policy, &snapshot, proposal)?;
        debug_assert!(
            verify_value_delta(
                &self.config.currency,
                &snapshot,
                &settlement.updated,
                settlement.expected_value_delta,
            )
            .is_balanced(),
            "currency settlement out of balance"
        );

        container.commit(settlement.updated)?;

        let record = TradeRecord::new(
            trader.id,
            proposal.counterpart,
            trader.policy,
            proposal.recipe.clone(),
            settlement.tax_withheld,
        );
        tracing::info!(
            trade = %record.trade,
            trader = %trader.id,
            counterpart = %proposal.counterpart,
            policy = ?trader.policy,
            "trade applied"
        );
        Ok(record)
    }

    /// Check that the proposed recipe corresponds to one of the trader's
    /// current offers. A recipe that matches no offer, or that disagrees
    /// with the offer it names, is stale or fabricated.
    fn verify_offer(&self, trader: &Trader, recipe: &TradingRecipe) -> Result<(), TradeError> {
        let key = match trader.policy {
            ShopPolicy::Sell | ShopPolicy::Barter => OfferKey::Item(recipe.result.key()),
            ShopPolicy::Buy => OfferKey::Item(recipe.cost1.key()),
            ShopPolicy::Book => OfferKey::Title(
                recipe
                    .result
                    .title()
                    .ok_or(TradeError::UnknownOffer)?
                    .to_owned(),
            ),
        };
        let offer = trader
            .offers()
            .find(&key)
            .ok_or(TradeError::UnknownOffer)?;
        let agrees = match (trader.policy, offer) {
            (ShopPolicy::Sell, Offer::Price(offer)) => {
                offer.item == recipe.result && self.priced_costs_agree(offer.price, recipe)
            }
            (ShopPolicy::Buy, Offer::Price(offer)) => {
                offer.item == recipe.cost1
                    && recipe.cost2.is_none()
                    && recipe.result == self.config.currency.low_stack(offer.price.value())
            }
            (ShopPolicy::Barter, Offer::Barter(offer)) => {
                offer.result == recipe.result
                    && offer.cost1 == recipe.cost1
                    && offer.cost2 == recipe.cost2
            }
            (ShopPolicy::Book, Offer::Titled(offer)) => {
                recipe.result.title() == Some(offer.title.as_str())
                    && self.priced_costs_agree(offer.price, recipe)
            }
            _ => false,
        };
        if agrees {
            Ok(())
        } else {
            Err(TradeError::UnknownOffer)
        }
    }

    /// Whether a priced recipe's cost slots are currency stacks composing
    /// to exactly the offer's price.
    fn priced_costs_agree(&self, price: Price, recipe: &TradingRecipe) -> bool {
        let currency = &self.config.currency;
        if !currency.is_currency(&recipe.cost1) {
            return false;
        }
        if let Some(cost2) = &recipe.cost2 {
            if !currency.is_currency(cost2) {
                return false;
            }
        }
        self.recipe_currency_value(recipe) == price.value()
    }

    /// Compare the counterpart's presented items against the recipe's
    /// cost slots.
    fn check_presented(&self, proposal: &TradeProposal) -> Result<(), TradeError> {
        let matching = self.config.trading.item_matching;
        let recipe = &proposal.recipe;
        if !proposal.presented1.matches(&recipe.cost1, matching)
            || proposal.presented1.amount < recipe.cost1.amount
        {
            return Err(TradeError::PresentedItemMismatch);
        }
        match (&recipe.cost2, &proposal.presented2) {
            (None, None) => Ok(()),
            (Some(required), Some(presented))
                if presented.matches(required, matching)
                    && presented.amount >= required.amount =>
            {
                Ok(())
            }
            _ => Err(TradeError::PresentedItemMismatch),
        }
    }

    /// Compute the candidate mutation for the proposal's policy.
    fn settle(
        &self,
        policy: ShopPolicy,
        snapshot: &ContainerSnapshot,
        proposal: &TradeProposal,
    ) -> Result<Settlement, TradeError> {
        match policy {
            ShopPolicy::Sell => self.settle_sell(snapshot, &proposal.recipe),
            ShopPolicy::Buy => self.settle_buy(snapshot, proposal),
            ShopPolicy::Barter => self.settle_barter(snapshot, proposal),
            ShopPolicy::Book => self.settle_book(snapshot, &proposal.recipe),
        }
    }

    /// Sell: remove the sold item from stock, deposit the taxed price.
    fn settle_sell(
        &self,
        snapshot: &ContainerSnapshot,
        recipe: &TradingRecipe,
    ) -> Result<Settlement, TradeError> {
        let updated = snapshot.removing(&recipe.result)?;
        let price = self.recipe_currency_value(recipe);
        let net = self.config.trading.amount_after_tax(price);
        let updated = if net > 0 {
            deposit(&updated, &self.config.currency, net)?
        } else {
            updated
        };
        Ok(Settlement {
            updated,
            tax_withheld: price.saturating_sub(net),
            expected_value_delta: i64::from(net)
                .saturating_sub(self.currency_value_of(&recipe.result)),
        })
    }

    /// Buy: pay out the full price from stock, take in the taxed quantity
    /// of the presented item.
    fn settle_buy(
        &self,
        snapshot: &ContainerSnapshot,
        proposal: &TradeProposal,
    ) -> Result<Settlement, TradeError> {
        let recipe = &proposal.recipe;
        let price = self.recipe_payout_value(recipe);
        let updated = remove_value(snapshot, &self.config.currency, price)?;

        // The presented item may differ slightly from the nominal cost item
        // under loose matching; stock what was actually handed in.
        let quantity = recipe.cost1.amount;
        let net_quantity = self.config.trading.amount_after_tax(quantity);
        let received = proposal.presented1.with_amount(net_quantity);
        let updated = if net_quantity > 0 {
            updated.adding(&received)?
        } else {
            updated
        };
        Ok(Settlement {
            updated,
            tax_withheld: quantity.saturating_sub(net_quantity),
            expected_value_delta: self
                .currency_value_of(&received)
                .saturating_sub(i64::from(price)),
        })
    }

    /// Barter: remove the result item from stock, take in the taxed
    /// quantities of both presented cost items.
    fn settle_barter(
        &self,
        snapshot: &ContainerSnapshot,
        proposal: &TradeProposal,
    ) -> Result<Settlement, TradeError> {
        let recipe = &proposal.recipe;
        let mut updated = snapshot.removing(&recipe.result)?;
        let mut tax_withheld = 0u32;
        let mut value_in = 0i64;

        let intake = [
            Some((&recipe.cost1, &proposal.presented1)),
            recipe.cost2.as_ref().zip(proposal.presented2.as_ref()),
        ];
        for (required, presented) in intake.into_iter().flatten() {
            let net_quantity = self.config.trading.amount_after_tax(required.amount);
            tax_withheld =
                tax_withheld.saturating_add(required.amount.saturating_sub(net_quantity));
            if net_quantity == 0 {
                continue;
            }
            let received = presented.with_amount(net_quantity);
            value_in = value_in.saturating_add(self.currency_value_of(&received));
            updated = updated.adding(&received)?;
        }

        Ok(Settlement {
            updated,
            tax_withheld,
            expected_value_delta: value_in
                .saturating_sub(self.currency_value_of(&recipe.result)),
        })
    }

    /// Book: consume one blank book from stock, deposit the taxed price.
    /// The priced book itself stays in stock; the counterpart receives a
    /// copy.
    fn settle_book(
        &self,
        snapshot: &ContainerSnapshot,
        recipe: &TradingRecipe,
    ) -> Result<Settlement, TradeError> {
        let updated = snapshot.removing_one_of_kind(&self.config.trading.blank_book_item)?;
        let price = self.recipe_currency_value(recipe);
        let net = self.config.trading.amount_after_tax(price);
        let updated = if net > 0 {
            deposit(&updated, &self.config.currency, net)?
        } else {
            updated
        };
        Ok(Settlement {
            updated,
            tax_withheld: price.saturating_sub(net),
            expected_value_delta: i64::from(net),
        })
    }

    /// The currency value of a recipe's cost stacks.
    fn recipe_currency_value(&self, recipe: &TradingRecipe) -> u32 {
        let second = recipe
            .cost2
            .as_ref()
            .map_or(0, |stack| self.currency_value_of(stack));
        let total = self
            .currency_value_of(&recipe.cost1)
            .saturating_add(second);
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// The currency value of a buy recipe's payout stack.
    fn recipe_payout_value(&self, recipe: &TradingRecipe) -> u32 {
        u32::try_from(self.currency_value_of(&recipe.result)).unwrap_or(u32::MAX)
    }

    /// The currency value carried by one stack, 0 for non-currency items.
    fn currency_value_of(&self, stack: &ItemStack) -> i64 {
        let currency = &self.config.currency;
        if currency.is_low_currency(stack) {
            i64::from(stack.amount)
        } else if currency.is_high_currency(stack) {
            i64::from(stack.amount).saturating_mul(i64::from(currency.high_value))
        } else {
            0
        }
    }
}
