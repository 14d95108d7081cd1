//! Access to the backing stock container.
//!
//! The trade pipeline never mutates live container state directly. It takes
//! a [`ContainerSnapshot`] via [`StockContainer::snapshot`], mutates the
//! snapshot in memory, and writes the whole thing back with a single
//! [`StockContainer::commit`]. A container may become unavailable between
//! those two calls (e.g. destroyed mid-trade); both return
//! [`ContainerUnavailable`] in that case and the trade aborts.

use tradepost_types::ItemStack;

use crate::error::ContainerUnavailable;
use crate::snapshot::ContainerSnapshot;

/// A finite, slot-ordered stock container backing a trader.
pub trait StockContainer {
    /// Take a value copy of the current contents.
    fn snapshot(&self) -> Result<ContainerSnapshot, ContainerUnavailable>;

    /// Replace the entire contents with the given snapshot.
    fn commit(&mut self, snapshot: ContainerSnapshot) -> Result<(), ContainerUnavailable>;
}

/// An in-process stock container holding its slots directly.
#[derive(Debug, Clone)]
pub struct InMemoryContainer {
    slots: Vec<Option<ItemStack>>,
    destroyed: bool,
}

impl InMemoryContainer {
    /// Create an empty container with the given number of slots.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
            destroyed: false,
        }
    }

    /// Create a container with explicit slot contents.
    pub const fn with_slots(slots: Vec<Option<ItemStack>>) -> Self {
        Self {
            slots,
            destroyed: false,
        }
    }

    /// Mark the container as destroyed. Subsequent snapshots and commits
    /// fail with [`ContainerUnavailable`].
    pub const fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Whether the container has been destroyed.
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The current slot contents, in container order.
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }
}

impl StockContainer for InMemoryContainer {
    fn snapshot(&self) -> Result<ContainerSnapshot, ContainerUnavailable> {
        if self.destroyed {
            return Err(ContainerUnavailable);
        }
        Ok(ContainerSnapshot::from_slots(self.slots.clone()))
    }

    fn commit(&mut self, snapshot: ContainerSnapshot) -> Result<(), ContainerUnavailable> {
        if self.destroyed {
            return Err(ContainerUnavailable);
        }
        self.slots = snapshot.into_slots();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_a_value_copy() {
        let mut container = InMemoryContainer::new(3);
        let snap = container.snapshot().unwrap();
        let updated = snap.adding(&ItemStack::new("stone", 5)).unwrap();
        // Mutating the snapshot does not touch the container.
        assert!(container.slots().iter().all(Option::is_none));
        container.commit(updated).unwrap();
        assert_eq!(
            container.slots().iter().flatten().next().unwrap().amount,
            5
        );
    }

    #[test]
    fn destroyed_container_rejects_snapshot_and_commit() {
        let mut container = InMemoryContainer::new(1);
        let snap = container.snapshot().unwrap();
        container.destroy();
        assert_eq!(container.snapshot(), Err(ContainerUnavailable));
        assert_eq!(container.commit(snap), Err(ContainerUnavailable));
    }
}
