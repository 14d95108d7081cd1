//! Trading recipes and trade proposals.
//!
//! A [`TradingRecipe`] is a currently-*available* instantiation of an offer,
//! computed against real container contents: one result stack and up to two
//! cost stacks. A [`TradeProposal`] is one attempted execution of a recipe
//! by a counterpart, carrying the cost items they actually presented.

use serde::{Deserialize, Serialize};

use crate::ids::ParticipantId;
use crate::item::ItemStack;

/// A concrete, currently-available trade: result item for cost item(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingRecipe {
    /// The item the counterpart receives.
    pub result: ItemStack,
    /// The first required cost item.
    pub cost1: ItemStack,
    /// The optional second required cost item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost2: Option<ItemStack>,
}

impl TradingRecipe {
    /// Create a recipe from its three slots.
    pub const fn new(result: ItemStack, cost1: ItemStack, cost2: Option<ItemStack>) -> Self {
        Self {
            result,
            cost1,
            cost2,
        }
    }
}

/// One attempted execution of a recipe by a counterpart.
///
/// The presented items are the stacks the counterpart actually placed in
/// the two cost slots. They are compared to the recipe's nominal cost items
/// with a similarity predicate -- they are not assumed byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeProposal {
    /// The counterpart attempting the trade.
    pub counterpart: ParticipantId,
    /// The recipe selected by the counterpart.
    pub recipe: TradingRecipe,
    /// The item presented for the first cost slot.
    pub presented1: ItemStack,
    /// The item presented for the second cost slot, if the recipe has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presented2: Option<ItemStack>,
}
