//! Item slots: single storage cells used by inventories

use crate::identity::ItemId;
use crate::instance::ItemInstance;
use serde::{Deserialize, Serialize};

/// Amount sentinel that always empties a slot on removal
pub const REMOVE_ALL: i32 = i32::MAX;

/// A single storage cell holding at most one item instance.
///
/// A slot may carry a whitelist of permitted item ids; an empty whitelist
/// allows everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemSlot {
    instance: Option<ItemInstance>,
    #[serde(default)]
    permitted_item_ids: Vec<ItemId>,
}

impl ItemSlot {
    /// Create an empty, unrestricted slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the slot to a set of item ids
    pub fn with_permitted_ids(mut self, ids: Vec<ItemId>) -> Self {
        self.permitted_item_ids = ids;
        self
    }

    /// Replace the slot whitelist. An empty list allows everything.
    pub fn set_permitted_ids(&mut self, ids: Vec<ItemId>) {
        self.permitted_item_ids = ids;
    }

    /// The resident instance, if any
    pub fn instance(&self) -> Option<&ItemInstance> {
        self.instance.as_ref()
    }

    /// The resident instance, mutably
    pub fn instance_mut(&mut self) -> Option<&mut ItemInstance> {
        self.instance.as_mut()
    }

    /// Id of the resident item, if any
    pub fn item_id(&self) -> Option<&ItemId> {
        self.instance.as_ref().map(|instance| instance.id())
    }

    /// Resident amount; zero when empty
    pub fn amount(&self) -> i32 {
        self.instance
            .as_ref()
            .map(|instance| instance.amount())
            .unwrap_or(0)
    }

    /// How many more units this slot can take. Unbounded when empty.
    pub fn capacity(&self) -> i32 {
        self.instance
            .as_ref()
            .map(|instance| instance.stack_capacity())
            .unwrap_or(i32::MAX)
    }

    /// Whether the slot holds an instance
    pub fn is_occupied(&self) -> bool {
        self.instance.is_some()
    }

    /// Try to move units from `item` into this slot.
    ///
    /// Fails without mutation when the slot is full, occupied by a different
    /// item, or rejects the item by whitelist. On success the transfer
    /// happens in place: the resident amount grows, the candidate amount
    /// shrinks. A candidate amount above zero afterwards is the remainder
    /// the caller has to re-route.
    pub fn try_add_item(&mut self, item: &mut ItemInstance) -> bool {
        if self.capacity() == 0 {
            return false;
        }

        if let Some(resident_id) = self.item_id() {
            if resident_id != item.id() {
                return false;
            }
        }

        if !self.is_permitted_item(item) {
            return false;
        }

        // An empty slot adopts a zero-amount instance of the same definition
        // before the transfer.
        let resident = self
            .instance
            .get_or_insert_with(|| item.clone_with_amount(0));

        let transfer = resident.stack_capacity().min(item.amount());
        resident.set_amount(resident.amount() + transfer);
        item.set_amount(item.amount() - transfer);

        true
    }

    /// Try to remove `amount` units from this slot.
    ///
    /// A partial removal hands back a fresh instance holding exactly
    /// `amount` and keeps the slot occupied. Removing the full amount (or
    /// more, e.g. [`REMOVE_ALL`]) hands over the resident instance itself
    /// and clears the slot. Fails only when the slot is empty.
    pub fn try_remove_item(&mut self, amount: i32) -> Option<ItemInstance> {
        let resident = self.instance.as_mut()?;

        if resident.amount() - amount > 0 {
            let extracted = resident.clone_with_amount(amount);
            let remaining = resident.amount() - amount;
            resident.set_amount(remaining);
            return Some(extracted);
        }

        self.instance.take()
    }

    /// Whether the slot whitelist admits the item
    pub fn is_permitted_item(&self, item: &ItemInstance) -> bool {
        self.permitted_item_ids.is_empty() || self.permitted_item_ids.contains(item.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ItemDefinition;
    use std::sync::Arc;

    fn instance(id: &str, max_stack: i32, amount: i32) -> ItemInstance {
        let mut def = ItemDefinition::new(id).with_max_stack(max_stack);
        def.id = ItemId::new(id);
        let mut instance = ItemInstance::new(Arc::new(def));
        instance.set_amount(amount);
        instance
    }

    #[test]
    fn test_add_to_empty_slot() {
        let mut slot = ItemSlot::new();
        let mut item = instance("gold", 0, 40);

        assert!(slot.try_add_item(&mut item));
        assert_eq!(slot.amount(), 40);
        assert_eq!(item.amount(), 0);
        assert!(slot.is_occupied());
    }

    #[test]
    fn test_partial_transfer_leaves_remainder() {
        let mut slot = ItemSlot::new();
        let mut item = instance("potion", 10, 15);

        assert!(slot.try_add_item(&mut item));
        assert_eq!(slot.amount(), 10);
        assert_eq!(item.amount(), 5);
    }

    #[test]
    fn test_rejects_different_item() {
        let mut slot = ItemSlot::new();
        let mut potion = instance("potion", 10, 1);
        let mut coin = instance("coin", 0, 1);

        assert!(slot.try_add_item(&mut potion));
        assert!(!slot.try_add_item(&mut coin));
        assert_eq!(coin.amount(), 1);
    }

    #[test]
    fn test_rejects_full_slot() {
        let mut slot = ItemSlot::new();
        let mut first = instance("potion", 10, 10);
        let mut second = instance("potion", 10, 1);

        assert!(slot.try_add_item(&mut first));
        assert!(!slot.try_add_item(&mut second));
        assert_eq!(second.amount(), 1);
    }

    #[test]
    fn test_whitelist() {
        let mut slot = ItemSlot::new().with_permitted_ids(vec![ItemId::new("arrow")]);
        let mut arrow = instance("arrow", 0, 3);
        let mut potion = instance("potion", 10, 1);

        assert!(!slot.try_add_item(&mut potion));
        assert!(slot.try_add_item(&mut arrow));
        assert_eq!(slot.amount(), 3);
    }

    #[test]
    fn test_partial_remove_keeps_slot_occupied() {
        let mut slot = ItemSlot::new();
        let mut item = instance("gold", 0, 40);
        slot.try_add_item(&mut item);

        let extracted = slot.try_remove_item(15).expect("removal should succeed");
        assert_eq!(extracted.amount(), 15);
        assert_eq!(slot.amount(), 25);
        assert!(slot.is_occupied());
    }

    #[test]
    fn test_full_remove_clears_slot() {
        let mut slot = ItemSlot::new();
        let mut item = instance("gold", 0, 40);
        slot.try_add_item(&mut item);

        let extracted = slot.try_remove_item(REMOVE_ALL).expect("removal should succeed");
        assert_eq!(extracted.amount(), 40);
        assert!(!slot.is_occupied());
        assert_eq!(slot.capacity(), i32::MAX);
    }

    #[test]
    fn test_remove_from_empty_slot_fails() {
        let mut slot = ItemSlot::new();
        assert!(slot.try_remove_item(1).is_none());
    }
}
