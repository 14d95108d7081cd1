//! Container snapshots: owned, slot-ordered views of a stock container.
//!
//! A [`ContainerSnapshot`] is value-copied from the backing container at
//! the start of a trade attempt and mutated only in memory. Every mutation
//! step takes `&self` and returns a *new* snapshot, so aborting a trade is
//! simply discarding the value -- there is no half-mutated array to roll
//! back. The live container is only ever touched by a single commit.

use serde::{Deserialize, Serialize};

use tradepost_types::{ItemKind, ItemStack};

use crate::error::StockError;

/// An aggregated count of similar items across a snapshot's slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCount {
    /// A single-item sample carrying the kind and metadata.
    pub sample: ItemStack,
    /// The total amount across all similar stacks.
    pub total: u64,
}

/// An ordered sequence of optional item stacks, value-copied from a
/// backing container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    /// The slots, in container order. `None` is an empty slot.
    slots: Vec<Option<ItemStack>>,
}

impl ContainerSnapshot {
    /// Create an empty snapshot with the given number of slots.
    pub fn empty(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    /// Create a snapshot from explicit slot contents.
    pub const fn from_slots(slots: Vec<Option<ItemStack>>) -> Self {
        Self { slots }
    }

    /// Consume the snapshot, returning its slot contents.
    pub fn into_slots(self) -> Vec<Option<ItemStack>> {
        self.slots
    }

    /// The slot contents, in container order.
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// The number of slots (occupied or not).
    pub const fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterate over the occupied slots.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().flatten()
    }

    /// The total amount of items similar to `item` across all slots.
    pub fn count_of(&self, item: &ItemStack) -> u64 {
        self.stacks()
            .filter(|stack| stack.is_similar(item))
            .fold(0u64, |total, stack| {
                total.saturating_add(u64::from(stack.amount))
            })
    }

    /// Whether the snapshot holds at least `amount` items similar to `item`.
    pub fn contains_at_least(&self, item: &ItemStack, amount: u32) -> bool {
        self.count_of(item) >= u64::from(amount)
    }

    /// Aggregate the occupied slots into per-identity counts, in first-seen
    /// order, keeping only stacks accepted by the filter.
    pub fn counts(&self, filter: impl Fn(&ItemStack) -> bool) -> Vec<ItemCount> {
        let mut counts: Vec<ItemCount> = Vec::new();
        for stack in self.stacks() {
            if !filter(stack) {
                continue;
            }
            if let Some(existing) = counts.iter_mut().find(|c| c.sample.is_similar(stack)) {
                existing.total = existing.total.saturating_add(u64::from(stack.amount));
            } else {
                counts.push(ItemCount {
                    sample: stack.with_amount(1),
                    total: u64::from(stack.amount),
                });
            }
        }
        counts
    }

    /// Return a new snapshot with `item.amount` items added.
    ///
    /// Similar partial stacks are filled first, up to the item's stack-size
    /// ceiling; the remainder is placed into empty slots, splitting at the
    /// ceiling. Fails with [`StockError::NoFreeSlots`] if the full amount
    /// does not fit.
    pub fn adding(&self, item: &ItemStack) -> Result<Self, StockError> {
        let mut remaining = item.amount;
        if remaining == 0 {
            return Ok(self.clone());
        }
        let max_stack = item.max_stack.max(1);
        let mut slots = self.slots.clone();

        // First pass: top up similar partial stacks.
        for slot in &mut slots {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot else { continue };
            if !stack.is_similar(item) || stack.amount >= max_stack {
                continue;
            }
            let room = max_stack.saturating_sub(stack.amount);
            let moved = room.min(remaining);
            stack.amount = stack.amount.saturating_add(moved);
            remaining = remaining.saturating_sub(moved);
        }

        // Second pass: place the remainder into empty slots.
        for slot in &mut slots {
            if remaining == 0 {
                break;
            }
            if slot.is_some() {
                continue;
            }
            let placed = remaining.min(max_stack);
            *slot = Some(item.with_amount(placed));
            remaining = remaining.saturating_sub(placed);
        }

        if remaining > 0 {
            return Err(StockError::NoFreeSlots {
                kind: item.kind.clone(),
                leftover: remaining,
            });
        }
        Ok(Self { slots })
    }

    /// Return a new snapshot with `item.amount` similar items removed.
    ///
    /// Removal walks the slots in container order. Fails with
    /// [`StockError::InsufficientStock`] if fewer than `item.amount`
    /// similar items are present.
    pub fn removing(&self, item: &ItemStack) -> Result<Self, StockError> {
        let mut remaining = item.amount;
        if remaining == 0 {
            return Ok(self.clone());
        }
        let mut slots = self.slots.clone();

        for slot in &mut slots {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot else { continue };
            if !stack.is_similar(item) {
                continue;
            }
            if stack.amount > remaining {
                stack.amount = stack.amount.saturating_sub(remaining);
                remaining = 0;
            } else {
                remaining = remaining.saturating_sub(stack.amount);
                *slot = None;
            }
        }

        if remaining > 0 {
            return Err(StockError::InsufficientStock {
                kind: item.kind.clone(),
                missing: remaining,
            });
        }
        Ok(Self { slots })
    }

    /// Return a new snapshot with one item of the given kind removed,
    /// ignoring metadata.
    ///
    /// Used for distinguished consumables (e.g. the blank book a book shop
    /// consumes per trade).
    pub fn removing_one_of_kind(&self, kind: &ItemKind) -> Result<Self, StockError> {
        let mut slots = self.slots.clone();

        for slot in &mut slots {
            let Some(stack) = slot else { continue };
            if &stack.kind != kind {
                continue;
            }
            if stack.amount > 1 {
                stack.amount = stack.amount.saturating_sub(1);
            } else {
                *slot = None;
            }
            return Ok(Self { slots });
        }

        Err(StockError::InsufficientStock {
            kind: kind.clone(),
            missing: 1,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(slots: Vec<Option<ItemStack>>) -> ContainerSnapshot {
        ContainerSnapshot::from_slots(slots)
    }

    #[test]
    fn empty_snapshot_has_no_stock() {
        let snap = ContainerSnapshot::empty(9);
        assert_eq!(snap.slot_count(), 9);
        assert_eq!(snap.count_of(&ItemStack::new("stone", 1)), 0);
    }

    #[test]
    fn count_of_spans_slots() {
        let snap = snapshot(vec![
            Some(ItemStack::new("stone", 10)),
            None,
            Some(ItemStack::new("wood", 4)),
            Some(ItemStack::new("stone", 7)),
        ]);
        assert_eq!(snap.count_of(&ItemStack::new("stone", 1)), 17);
        assert!(snap.contains_at_least(&ItemStack::new("stone", 1), 17));
        assert!(!snap.contains_at_least(&ItemStack::new("stone", 1), 18));
    }

    #[test]
    fn counts_aggregate_in_first_seen_order() {
        let snap = snapshot(vec![
            Some(ItemStack::new("wood", 4)),
            Some(ItemStack::new("stone", 10)),
            Some(ItemStack::new("wood", 2)),
        ]);
        let counts = snap.counts(|_| true);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.first().unwrap().sample.kind.as_str(), "wood");
        assert_eq!(counts.first().unwrap().total, 6);
        assert_eq!(counts.get(1).unwrap().total, 10);
    }

    #[test]
    fn counts_respect_filter() {
        let snap = snapshot(vec![
            Some(ItemStack::new("emerald", 4)),
            Some(ItemStack::new("stone", 10)),
        ]);
        let counts = snap.counts(|stack| stack.kind.as_str() != "emerald");
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.first().unwrap().sample.kind.as_str(), "stone");
    }

    #[test]
    fn adding_fills_partial_stacks_first() {
        let snap = snapshot(vec![None, Some(ItemStack::new("stone", 60)), None]);
        let result = snap.adding(&ItemStack::new("stone", 10)).unwrap();
        // 4 go into the partial stack (ceiling 64), 6 into the first empty slot.
        assert_eq!(
            result.slots(),
            &[
                Some(ItemStack::new("stone", 6)),
                Some(ItemStack::new("stone", 64)),
                None,
            ]
        );
    }

    #[test]
    fn adding_splits_across_empty_slots() {
        let snap = ContainerSnapshot::empty(3);
        let result = snap.adding(&ItemStack::new("stone", 130)).unwrap();
        assert_eq!(
            result.slots(),
            &[
                Some(ItemStack::new("stone", 64)),
                Some(ItemStack::new("stone", 64)),
                Some(ItemStack::new("stone", 2)),
            ]
        );
    }

    #[test]
    fn adding_fails_when_out_of_room() {
        let snap = snapshot(vec![Some(ItemStack::new("stone", 64)), None]);
        let result = snap.adding(&ItemStack::new("stone", 100));
        assert_eq!(
            result,
            Err(StockError::NoFreeSlots {
                kind: ItemKind::from("stone"),
                leftover: 36,
            })
        );
        // The original snapshot is untouched by construction.
        assert_eq!(snap.count_of(&ItemStack::new("stone", 1)), 64);
    }

    #[test]
    fn adding_does_not_merge_dissimilar_stacks() {
        let named = ItemStack::new("stone", 10).with_title("odd");
        let snap = snapshot(vec![Some(named.clone()), None]);
        let result = snap.adding(&ItemStack::new("stone", 5)).unwrap();
        assert_eq!(
            result.slots(),
            &[Some(named), Some(ItemStack::new("stone", 5))]
        );
    }

    #[test]
    fn removing_spans_slots() {
        let snap = snapshot(vec![
            Some(ItemStack::new("stone", 10)),
            Some(ItemStack::new("wood", 4)),
            Some(ItemStack::new("stone", 7)),
        ]);
        let result = snap.removing(&ItemStack::new("stone", 12)).unwrap();
        assert_eq!(
            result.slots(),
            &[None, Some(ItemStack::new("wood", 4)), Some(ItemStack::new("stone", 5))]
        );
    }

    #[test]
    fn removing_fails_on_shortfall() {
        let snap = snapshot(vec![Some(ItemStack::new("stone", 3))]);
        let result = snap.removing(&ItemStack::new("stone", 10));
        assert_eq!(
            result,
            Err(StockError::InsufficientStock {
                kind: ItemKind::from("stone"),
                missing: 7,
            })
        );
    }

    #[test]
    fn removing_one_of_kind_ignores_metadata() {
        let titled = ItemStack::new("writable_book", 2).with_title("draft");
        let snap = snapshot(vec![Some(titled)]);
        let result = snap.removing_one_of_kind(&ItemKind::from("writable_book")).unwrap();
        assert_eq!(result.stacks().next().unwrap().amount, 1);
    }

    #[test]
    fn removing_one_of_kind_clears_singleton_slot() {
        let snap = snapshot(vec![Some(ItemStack::new("writable_book", 1))]);
        let result = snap.removing_one_of_kind(&ItemKind::from("writable_book")).unwrap();
        assert_eq!(result.slots(), &[None]);
    }

    #[test]
    fn removing_one_of_kind_fails_when_absent() {
        let snap = ContainerSnapshot::empty(3);
        let result = snap.removing_one_of_kind(&ItemKind::from("writable_book"));
        assert!(result.is_err());
    }
}
