//! Moving currency value in and out of container snapshots.
//!
//! These functions operate on owned [`ContainerSnapshot`] values and return
//! new snapshots on success. A failed operation returns an error and leaves
//! the caller's snapshot untouched, so settlement is all-or-nothing by
//! construction.

use tradepost_stock::ContainerSnapshot;
use tradepost_types::ItemStack;

use crate::config::CurrencyConfig;
use crate::error::CurrencyError;

/// The total currency value held in the snapshot, across both
/// denominations.
pub fn total_value(snapshot: &ContainerSnapshot, config: &CurrencyConfig) -> u64 {
    snapshot.stacks().fold(0u64, |total, stack| {
        if config.is_low_currency(stack) {
            total.saturating_add(u64::from(stack.amount))
        } else if config.is_high_currency(stack) {
            total.saturating_add(
                u64::from(stack.amount).saturating_mul(u64::from(config.high_value)),
            )
        } else {
            total
        }
    })
}

/// Whether the snapshot holds at least `amount` of currency value.
pub fn contains_value(snapshot: &ContainerSnapshot, config: &CurrencyConfig, amount: u32) -> bool {
    total_value(snapshot, config) >= u64::from(amount)
}

/// Consume `remaining` items similar to `denomination`, partial stacks
/// first, then full stacks. Returns the amount that could not be removed.
fn drain_denomination(
    slots: &mut [Option<ItemStack>],
    denomination: &ItemStack,
    mut remaining: u32,
) -> u32 {
    for pass in 0..2u8 {
        for slot in slots.iter_mut() {
            if remaining == 0 {
                return 0;
            }
            let Some(stack) = slot else { continue };
            if !stack.is_similar(denomination) {
                continue;
            }
            // First pass only touches partial stacks.
            if pass == 0 && stack.is_full() {
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
    }
    remaining
}

/// Remove exactly `amount` of currency value from the snapshot.
///
/// Low-denomination stacks are consumed first (partial stacks before full
/// ones, to reduce fragmentation). Any remaining need is ceiling-divided
/// into high-denomination units and consumed the same way; the overshoot
/// from rounding up is re-inserted into empty slots as low-denomination
/// change, splitting at the low stack ceiling.
///
/// Fails with [`CurrencyError::InsufficientFunds`] when the snapshot does
/// not hold `amount` of value, and with [`CurrencyError::NoRoomForChange`]
/// when breaking a high unit leaves change that fits in no empty slot. On
/// failure the input snapshot is unmodified.
pub fn remove_value(
    snapshot: &ContainerSnapshot,
    config: &CurrencyConfig,
    amount: u32,
) -> Result<ContainerSnapshot, CurrencyError> {
    if amount == 0 {
        return Ok(snapshot.clone());
    }
    let available = total_value(snapshot, config);
    let mut slots = snapshot.clone().into_slots();

    let remaining = drain_denomination(&mut slots, &config.low_item, amount);
    if remaining == 0 {
        return Ok(ContainerSnapshot::from_slots(slots));
    }
    if !config.high_enabled() {
        return Err(CurrencyError::InsufficientFunds {
            needed: amount,
            available,
        });
    }

    // Round the remaining need up to whole high units; the rounding
    // overshoot comes back as low-denomination change.
    let needed_high = remaining.div_ceil(config.high_value);
    let overshoot = u64::from(needed_high)
        .saturating_mul(u64::from(config.high_value))
        .saturating_sub(u64::from(remaining));

    if drain_denomination(&mut slots, &config.high_item, needed_high) > 0 {
        return Err(CurrencyError::InsufficientFunds {
            needed: amount,
            available,
        });
    }

    let mut change = u32::try_from(overshoot).unwrap_or(u32::MAX);
    if change > 0 {
        let ceiling = config.low_ceiling().max(1);
        for slot in &mut slots {
            if change == 0 {
                break;
            }
            if slot.is_some() {
                continue;
            }
            let placed = change.min(ceiling);
            *slot = Some(config.low_stack(placed));
            change = change.saturating_sub(placed);
        }
        if change > 0 {
            return Err(CurrencyError::NoRoomForChange { change });
        }
    }

    Ok(ContainerSnapshot::from_slots(slots))
}

/// Deposit `amount` of currency value into the snapshot in compressed
/// form.
///
/// When the high denomination is enabled and the amount exceeds the
/// high-min-cost threshold, as much value as possible is placed as high
/// units first; whatever does not fit (or falls below one high unit) is
/// placed as low-denomination items. Fails with
/// [`CurrencyError::NoRoomForCurrency`] when value is left over, leaving
/// the input snapshot unmodified.
pub fn deposit(
    snapshot: &ContainerSnapshot,
    config: &CurrencyConfig,
    amount: u32,
) -> Result<ContainerSnapshot, CurrencyError> {
    let mut remaining = amount;
    let mut updated = snapshot.clone();

    if config.high_enabled() && remaining > config.high_min_cost {
        let high_amount = remaining.checked_div(config.high_value).unwrap_or(0);
        if high_amount > 0 {
            let (next, placed_high) = add_up_to(&updated, &config.high_stack(high_amount));
            updated = next;
            remaining =
                remaining.saturating_sub(placed_high.saturating_mul(config.high_value));
        }
    }

    if remaining > 0 {
        let (next, placed_low) = add_up_to(&updated, &config.low_stack(remaining));
        updated = next;
        remaining = remaining.saturating_sub(placed_low);
        if remaining > 0 {
            return Err(CurrencyError::NoRoomForCurrency { leftover: remaining });
        }
    }

    Ok(updated)
}

/// Add as much of `item` as fits, returning the updated snapshot and the
/// amount actually placed.
fn add_up_to(snapshot: &ContainerSnapshot, item: &ItemStack) -> (ContainerSnapshot, u32) {
    match snapshot.adding(item) {
        Ok(updated) => (updated, item.amount),
        Err(tradepost_stock::StockError::NoFreeSlots { leftover, .. }) => {
            let placed = item.amount.saturating_sub(leftover);
            if placed == 0 {
                return (snapshot.clone(), 0);
            }
            // Placing the reduced amount cannot fail: it fits by definition.
            let updated = snapshot
                .adding(&item.with_amount(placed))
                .unwrap_or_else(|_| snapshot.clone());
            (updated, placed)
        }
        Err(tradepost_stock::StockError::InsufficientStock { .. }) => (snapshot.clone(), 0),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot_with(slots: Vec<Option<ItemStack>>) -> ContainerSnapshot {
        ContainerSnapshot::from_slots(slots)
    }

    #[test]
    fn total_value_counts_both_denominations() {
        let config = CurrencyConfig::default();
        let snap = snapshot_with(vec![
            Some(config.low_stack(5)),
            Some(config.high_stack(1)),
            Some(ItemStack::new("stone", 10)),
        ]);
        assert_eq!(total_value(&snap, &config), 14);
        assert!(contains_value(&snap, &config, 14));
        assert!(!contains_value(&snap, &config, 15));
    }

    #[test]
    fn remove_value_prefers_partial_low_stacks() {
        let config = CurrencyConfig::default();
        let snap = snapshot_with(vec![
            Some(config.low_stack(64)),
            Some(config.low_stack(10)),
        ]);
        let result = remove_value(&snap, &config, 8).unwrap();
        // The partial stack shrinks; the full stack is untouched.
        assert_eq!(
            result.slots(),
            &[Some(config.low_stack(64)), Some(config.low_stack(2))]
        );
    }

    #[test]
    fn remove_value_breaks_a_high_unit_and_returns_change() {
        let config = CurrencyConfig::default();
        let snap = snapshot_with(vec![
            Some(config.low_stack(5)),
            Some(config.high_stack(1)),
            None,
        ]);
        let result = remove_value(&snap, &config, 12).unwrap();
        // 5 low consumed, 1 high (value 9) consumed, change 9 - 7 = 2.
        assert_eq!(total_value(&result, &config), 2);
        assert_eq!(result.count_of(&config.low_item), 2);
        assert_eq!(result.count_of(&config.high_item), 0);
    }

    #[test]
    fn remove_value_fails_on_insufficient_funds() {
        let config = CurrencyConfig::default();
        let snap = snapshot_with(vec![Some(config.low_stack(3))]);
        let result = remove_value(&snap, &config, 10);
        assert_eq!(
            result,
            Err(CurrencyError::InsufficientFunds {
                needed: 10,
                available: 3,
            })
        );
        assert_eq!(total_value(&snap, &config), 3);
    }

    #[test]
    fn remove_value_fails_when_change_has_no_empty_slot() {
        let config = CurrencyConfig::default();
        // The high stack is only partially consumed, so its slot stays
        // occupied and the change has nowhere to go.
        let snap = snapshot_with(vec![
            Some(config.high_stack(2)),
            Some(ItemStack::new("stone", 1)),
        ]);
        let result = remove_value(&snap, &config, 7);
        assert_eq!(result, Err(CurrencyError::NoRoomForChange { change: 2 }));
    }

    #[test]
    fn remove_value_of_zero_is_a_no_op() {
        let config = CurrencyConfig::default();
        let snap = snapshot_with(vec![Some(config.low_stack(3))]);
        assert_eq!(remove_value(&snap, &config, 0).unwrap(), snap);
    }

    #[test]
    fn deposit_compresses_into_high_units() {
        let config = CurrencyConfig::default();
        let snap = ContainerSnapshot::empty(3);
        let result = deposit(&snap, &config, 25).unwrap();
        // 25 = 2 high (18) + 7 low.
        assert_eq!(result.count_of(&config.high_item), 2);
        assert_eq!(result.count_of(&config.low_item), 7);
    }

    #[test]
    fn small_deposits_stay_in_the_low_denomination() {
        let config = CurrencyConfig::default();
        let snap = ContainerSnapshot::empty(3);
        let result = deposit(&snap, &config, 10).unwrap();
        assert_eq!(result.count_of(&config.high_item), 0);
        assert_eq!(result.count_of(&config.low_item), 10);
    }

    #[test]
    fn deposit_fails_when_the_container_is_full() {
        let config = CurrencyConfig::default();
        let snap = snapshot_with(vec![Some(ItemStack::new("stone", 64))]);
        let result = deposit(&snap, &config, 5);
        assert_eq!(result, Err(CurrencyError::NoRoomForCurrency { leftover: 5 }));
    }
}
