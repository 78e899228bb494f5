//! Inventories: ordered slot collections with stacking and permissions

use crate::definition::ItemDefinition;
use crate::identity::{AssetRef, ItemId};
use crate::instance::ItemInstance;
use crate::slot::{ItemSlot, REMOVE_ALL};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Default bound on the slot-search loop in [`Inventory::set_item`].
///
/// A defensive valve against pathological loops, not a semantic limit.
pub const DEFAULT_STACK_LOOP_LIMIT: usize = 100;

bitflags! {
    /// Behavior switches of an inventory
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InventoryPrefs: u32 {
        /// Append new slots instead of failing when all slots are taken
        const AUTO_EXTEND = 1;
        /// Only accept items on the permitted-id list
        const PERMITTED_ITEMS_ONLY = 1 << 1;
        /// Only accept items on the exclusion list
        const EXCLUDED_ITEMS_ONLY = 1 << 2;
        /// Never merge an incoming item into an existing stack
        const DONT_STACK_ITEMS = 1 << 3;
    }
}

impl Default for InventoryPrefs {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for InventoryPrefs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for InventoryPrefs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_truncate(u32::deserialize(deserializer)?))
    }
}

/// Change notification emitted by an inventory.
///
/// Added and removed events always come paired with a changed event for the
/// same slot; bulk operations emit a single changed event with `slot: None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEvent {
    /// An item landed in a slot
    ItemAdded { slot: usize },
    /// An item left a slot
    ItemRemoved { slot: usize },
    /// Slot contents changed; `None` means a bulk change
    ItemChanged { slot: Option<usize> },
}

/// An ordered collection of item slots.
///
/// Mutations are best-effort: a failed add may already have moved part of
/// the amount into other slots, and that part stays put. Treat a `false`
/// return as "not fully satisfied", never as "no effect".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Display title for presentation layers
    pub title: String,
    /// Icon asset for presentation layers
    #[serde(default)]
    pub icon: Option<AssetRef>,
    preferences: InventoryPrefs,
    slots: Vec<ItemSlot>,
    /// Materialized id list backing the permission check
    #[serde(default)]
    permitted_item_ids: Vec<ItemId>,
    #[serde(default = "default_stack_loop_limit")]
    stack_loop_limit: usize,
    #[serde(skip)]
    events: Vec<InventoryEvent>,
}

fn default_stack_loop_limit() -> usize {
    DEFAULT_STACK_LOOP_LIMIT
}

impl Inventory {
    /// Create an inventory with a number of empty, unrestricted slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            title: String::new(),
            icon: None,
            preferences: InventoryPrefs::empty(),
            slots: vec![ItemSlot::new(); slot_count],
            permitted_item_ids: Vec::new(),
            stack_loop_limit: DEFAULT_STACK_LOOP_LIMIT,
            events: Vec::new(),
        }
    }

    /// Set the display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the icon asset
    pub fn with_icon(mut self, icon: impl Into<AssetRef>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the behavior switches
    pub fn with_preferences(mut self, preferences: InventoryPrefs) -> Self {
        self.preferences = preferences;
        self
    }

    /// Override the slot-search loop bound
    pub fn with_stack_loop_limit(mut self, limit: usize) -> Self {
        self.stack_loop_limit = limit;
        self
    }

    /// The active behavior switches
    pub fn preferences(&self) -> InventoryPrefs {
        self.preferences
    }

    /// Replace the behavior switches
    pub fn set_preferences(&mut self, preferences: InventoryPrefs) {
        self.preferences = preferences;
    }

    /// All slots, in storage order
    pub fn slots(&self) -> &[ItemSlot] {
        &self.slots
    }

    /// A slot by index
    pub fn slot(&self, index: usize) -> Option<&ItemSlot> {
        self.slots.get(index)
    }

    /// A slot by index, mutably
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ItemSlot> {
        self.slots.get_mut(index)
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_occupied()).count()
    }

    /// Whether no slot holds an item
    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// Index of the first slot holding the given item, if any
    pub fn find_item(&self, id: &ItemId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.item_id() == Some(id))
    }

    /// Total amount of the given item across all slots
    pub fn count_item(&self, id: &ItemId) -> i32 {
        self.slots
            .iter()
            .filter(|slot| slot.item_id() == Some(id))
            .map(|slot| slot.amount())
            .sum()
    }

    /// Add an item, if it is permitted in this inventory.
    ///
    /// See [`set_item`](Self::set_item) for placement rules; this is the
    /// same operation behind the permission check.
    pub fn add_item(&mut self, item: &mut ItemInstance, slot_index: Option<usize>) -> bool {
        if !self.is_permitted_item(item) {
            return false;
        }

        self.set_item(item, slot_index)
    }

    /// Place an item, skipping the permission check.
    ///
    /// Drains `item` into slots until its amount reaches zero: first into
    /// the requested slot if one was given, then into the first existing
    /// stack of the same item with spare capacity (unless stacking is
    /// disabled), then into the first empty slot, finally into a freshly
    /// appended slot when auto-extend is on. Without auto-extend the call
    /// fails once no slot qualifies — transfers already made stay in place.
    /// A requested index outside the current slot range fails outright.
    pub fn set_item(&mut self, item: &mut ItemInstance, slot_index: Option<usize>) -> bool {
        if slot_index.is_some_and(|index| index >= self.slots.len()) {
            return false;
        }

        let stackable = !self.preferences.contains(InventoryPrefs::DONT_STACK_ITEMS);
        let mut preferred = slot_index;

        let mut safety = 0;
        while item.amount() > 0 && safety < self.stack_loop_limit {
            safety += 1;

            let mut target = preferred;

            // Merge into an existing stack of the same item first
            if target.is_none() && stackable {
                target = self
                    .slots
                    .iter()
                    .position(|slot| slot.item_id() == Some(item.id()) && slot.capacity() > 0);
            }

            // Otherwise take the first empty slot
            if target.is_none() {
                target = self.slots.iter().position(|slot| !slot.is_occupied());
            }

            // Otherwise extend, or give up keeping any partial transfers
            let target = match target {
                Some(index) => index,
                None => {
                    if !self.preferences.contains(InventoryPrefs::AUTO_EXTEND) {
                        return false;
                    }
                    self.slots.push(ItemSlot::new());
                    self.slots.len() - 1
                }
            };

            if self.slots[target].try_add_item(item) {
                self.events.push(InventoryEvent::ItemAdded { slot: target });
                self.events.push(InventoryEvent::ItemChanged { slot: Some(target) });
            }

            if item.amount() == 0 {
                return true;
            }

            // The requested slot could not take everything; fall back to the
            // regular search for the remainder.
            preferred = None;
        }

        // Hitting the safety valve still reports success even though part of
        // the amount may be unplaced; callers can inspect the residual
        // amount on `item`.
        true
    }

    /// Remove up to `amount` units from a slot.
    ///
    /// Returns the extracted instance, or `None` when the index is out of
    /// range or the slot is empty. Pass [`REMOVE_ALL`] to always empty the
    /// slot.
    pub fn remove_item(&mut self, slot_index: usize, amount: i32) -> Option<ItemInstance> {
        let slot = self.slots.get_mut(slot_index)?;
        let extracted = slot.try_remove_item(amount)?;

        self.events.push(InventoryEvent::ItemRemoved { slot: slot_index });
        self.events.push(InventoryEvent::ItemChanged {
            slot: Some(slot_index),
        });

        Some(extracted)
    }

    /// Remove up to `amount` units of the first slot holding `id`.
    /// Does nothing when the item is absent.
    pub fn remove_item_by_id(&mut self, id: &ItemId, amount: i32) -> Option<ItemInstance> {
        let index = self.find_item(id)?;
        self.remove_item(index, amount)
    }

    /// Replace the whole slot list.
    ///
    /// Existing contents are dropped without permission checks; useful for
    /// restoring saved state. Emits a single bulk change event.
    pub fn set_item_slots(&mut self, new_slots: Vec<ItemSlot>) {
        self.slots = new_slots;
        self.events.push(InventoryEvent::ItemChanged { slot: None });
    }

    /// Empty every slot. Emits a single bulk change event.
    pub fn clear_all_items(&mut self) {
        for slot in &mut self.slots {
            slot.try_remove_item(REMOVE_ALL);
        }

        self.events.push(InventoryEvent::ItemChanged { slot: None });
    }

    /// Whether the permission policy admits the item.
    ///
    /// With neither permission flag set everything is admitted. Both flags
    /// check membership in the same permitted-id list; the exclusion flag
    /// does not invert the test.
    pub fn is_permitted_item(&self, item: &ItemInstance) -> bool {
        if !self
            .preferences
            .intersects(InventoryPrefs::PERMITTED_ITEMS_ONLY | InventoryPrefs::EXCLUDED_ITEMS_ONLY)
        {
            return true;
        }

        self.permitted_item_ids.contains(item.id())
    }

    /// Materialize the permitted-id list from a set of definitions,
    /// skipping uncompiled ids and duplicates
    pub fn set_permitted_items(&mut self, definitions: &[Arc<ItemDefinition>]) {
        self.permitted_item_ids.clear();

        for definition in definitions {
            if definition.id.is_unset() || self.permitted_item_ids.contains(&definition.id) {
                continue;
            }

            self.permitted_item_ids.push(definition.id.clone());
        }
    }

    /// Replace the permitted-id list directly
    pub fn set_permitted_item_ids(&mut self, ids: Vec<ItemId>) {
        self.permitted_item_ids = ids;
    }

    /// The materialized permitted-id list
    pub fn permitted_item_ids(&self) -> &[ItemId] {
        &self.permitted_item_ids
    }

    /// Events emitted since the last drain, in order
    pub fn events(&self) -> &[InventoryEvent] {
        &self.events
    }

    /// Hand over and clear the pending events
    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &str, max_stack: i32) -> Arc<ItemDefinition> {
        let mut def = ItemDefinition::new(id).with_max_stack(max_stack);
        def.id = ItemId::new(id);
        Arc::new(def)
    }

    fn instance(def: &Arc<ItemDefinition>, amount: i32) -> ItemInstance {
        let mut instance = ItemInstance::new(Arc::clone(def));
        instance.set_amount(amount);
        instance
    }

    #[test]
    fn test_overflow_across_slots() {
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(2);

        let mut item = instance(&potion, 15);
        assert!(inventory.add_item(&mut item, None));
        assert_eq!(inventory.slot(0).unwrap().amount(), 10);
        assert_eq!(inventory.slot(1).unwrap().amount(), 5);
        assert_eq!(item.amount(), 0);

        // Top up the partial stack to full
        let mut item = instance(&potion, 5);
        assert!(inventory.add_item(&mut item, None));
        assert_eq!(inventory.slot(1).unwrap().amount(), 10);

        // Both slots full, no auto-extend: fail without mutation
        let mut item = instance(&potion, 1);
        assert!(!inventory.add_item(&mut item, None));
        assert_eq!(item.amount(), 1);
        assert_eq!(inventory.count_item(&ItemId::new("potion")), 20);
    }

    #[test]
    fn test_stacking_idempotence() {
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(3);

        let mut a = instance(&potion, 3);
        let mut b = instance(&potion, 4);
        assert!(inventory.add_item(&mut a, None));
        assert!(inventory.add_item(&mut b, None));

        assert_eq!(inventory.used_slots(), 1);
        assert_eq!(inventory.slot(0).unwrap().amount(), 7);
    }

    #[test]
    fn test_dont_stack_spreads_over_slots() {
        let sword = definition("sword", 1);
        let mut inventory =
            Inventory::new(4).with_preferences(InventoryPrefs::DONT_STACK_ITEMS);

        let mut item = instance(&sword, 3);
        assert!(inventory.add_item(&mut item, None));
        assert_eq!(inventory.used_slots(), 3);
        for index in 0..3 {
            assert_eq!(inventory.slot(index).unwrap().amount(), 1);
        }
    }

    #[test]
    fn test_auto_extend_from_zero_slots() {
        let coin = definition("coin", 0);
        let mut inventory = Inventory::new(0).with_preferences(InventoryPrefs::AUTO_EXTEND);

        let mut item = instance(&coin, 1);
        assert!(inventory.add_item(&mut item, None));
        assert_eq!(inventory.slot_count(), 1);
        assert!(inventory.slot(0).unwrap().is_occupied());
    }

    #[test]
    fn test_explicit_slot_then_fallback() {
        let potion = definition("potion", 10);
        let coin = definition("coin", 0);
        let mut inventory = Inventory::new(2);

        let mut blocker = instance(&coin, 1);
        assert!(inventory.add_item(&mut blocker, Some(0)));

        // Slot 0 holds a different item; the potion falls through to slot 1
        let mut item = instance(&potion, 2);
        assert!(inventory.add_item(&mut item, Some(0)));
        assert_eq!(inventory.slot(1).unwrap().amount(), 2);
    }

    #[test]
    fn test_out_of_range_slot_request_fails() {
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(2);

        let mut item = instance(&potion, 1);
        assert!(!inventory.add_item(&mut item, Some(5)));
        assert_eq!(item.amount(), 1);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_permission_check() {
        let potion = definition("potion", 10);
        let coin = definition("coin", 0);
        let mut inventory =
            Inventory::new(2).with_preferences(InventoryPrefs::PERMITTED_ITEMS_ONLY);
        inventory.set_permitted_items(&[Arc::clone(&potion)]);

        let mut ok = instance(&potion, 1);
        let mut rejected = instance(&coin, 1);
        assert!(inventory.add_item(&mut ok, None));
        assert!(!inventory.add_item(&mut rejected, None));
        assert_eq!(rejected.amount(), 1);
        assert!(!inventory.is_empty());
    }

    #[test]
    fn test_exclusion_flag_does_not_invert() {
        // Both permission flags route through the same id list; the
        // exclusion flag behaves exactly like the permitted flag.
        let potion = definition("potion", 10);
        let coin = definition("coin", 0);
        let mut inventory =
            Inventory::new(2).with_preferences(InventoryPrefs::EXCLUDED_ITEMS_ONLY);
        inventory.set_permitted_items(&[Arc::clone(&potion)]);

        let mut listed = instance(&potion, 1);
        let mut unlisted = instance(&coin, 1);
        assert!(inventory.add_item(&mut listed, None));
        assert!(!inventory.add_item(&mut unlisted, None));
    }

    #[test]
    fn test_remove_then_add_round_trip() {
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(2);

        let mut item = instance(&potion, 8);
        inventory.add_item(&mut item, None);

        let mut extracted = inventory.remove_item(0, 3).expect("removal should succeed");
        assert_eq!(inventory.slot(0).unwrap().amount(), 5);

        assert!(inventory.add_item(&mut extracted, None));
        assert_eq!(inventory.slot(0).unwrap().amount(), 8);
        assert_eq!(inventory.used_slots(), 1);
    }

    #[test]
    fn test_remove_by_id_and_out_of_range() {
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(2);

        let mut item = instance(&potion, 4);
        inventory.add_item(&mut item, None);

        assert!(inventory.remove_item(5, 1).is_none());
        assert!(inventory
            .remove_item_by_id(&ItemId::new("missing"), 1)
            .is_none());

        let extracted = inventory
            .remove_item_by_id(&ItemId::new("potion"), 1)
            .expect("removal should succeed");
        assert_eq!(extracted.amount(), 1);
        assert_eq!(inventory.count_item(&ItemId::new("potion")), 3);
    }

    #[test]
    fn test_events() {
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(2);

        let mut item = instance(&potion, 3);
        inventory.add_item(&mut item, None);
        inventory.remove_item(0, 1);

        let events = inventory.drain_events();
        assert_eq!(
            events,
            vec![
                InventoryEvent::ItemAdded { slot: 0 },
                InventoryEvent::ItemChanged { slot: Some(0) },
                InventoryEvent::ItemRemoved { slot: 0 },
                InventoryEvent::ItemChanged { slot: Some(0) },
            ]
        );
        assert!(inventory.events().is_empty());

        inventory.clear_all_items();
        assert_eq!(
            inventory.drain_events(),
            vec![InventoryEvent::ItemChanged { slot: None }]
        );
    }

    #[test]
    fn test_set_item_slots_replaces_contents() {
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(1);
        let mut item = instance(&potion, 2);
        inventory.add_item(&mut item, None);
        inventory.drain_events();

        inventory.set_item_slots(vec![ItemSlot::new(), ItemSlot::new(), ItemSlot::new()]);
        assert_eq!(inventory.slot_count(), 3);
        assert!(inventory.is_empty());
        assert_eq!(
            inventory.drain_events(),
            vec![InventoryEvent::ItemChanged { slot: None }]
        );
    }

    #[test]
    fn test_safety_valve_reports_success() {
        // A slot whose whitelist rejects the item makes every iteration a
        // no-op; the loop bound stops the search and the call still reports
        // success, leaving the residual amount on the candidate.
        let potion = definition("potion", 10);
        let mut inventory = Inventory::new(0).with_stack_loop_limit(5);
        inventory.set_item_slots(vec![
            ItemSlot::new().with_permitted_ids(vec![ItemId::new("coin")])
        ]);
        inventory.drain_events();

        let mut item = instance(&potion, 3);
        assert!(inventory.set_item(&mut item, None));
        assert_eq!(item.amount(), 3);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_conservation_of_amounts() {
        let potion = definition("potion", 7);
        let mut inventory = Inventory::new(2).with_preferences(InventoryPrefs::AUTO_EXTEND);

        let mut total_added = 0;
        for amount in [3, 9, 1, 14] {
            let mut item = instance(&potion, amount);
            assert!(inventory.add_item(&mut item, None));
            total_added += amount;
        }

        assert_eq!(inventory.count_item(&ItemId::new("potion")), total_added);
    }
}
