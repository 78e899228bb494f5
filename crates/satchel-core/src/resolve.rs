//! Resolvers walking embedded items and inventories
//!
//! These sit on top of the query protocol and add one level of nesting
//! support to inventories and a cycle-safe id walk to permission checks.

use crate::definition::ItemDefinition;
use crate::identity::ItemId;
use crate::instance::ItemInstance;
use crate::interaction::ItemInteraction;
use crate::inventory::Inventory;
use crate::query::{EmbeddedItemQuery, ItemQuery, QueryKind};
use std::sync::Arc;

/// Add an item to an inventory or to an inventory embedded in one of its
/// items.
///
/// The top-level inventory is tried first. On failure, every occupied slot's
/// instance is walked in slot order and its embedded inventories are tried
/// in declaration order; the first one that accepts the item wins.
///
/// The walk is deliberately one level deep. Recursing further escalates cost
/// quickly and makes items vanish into containers of containers, which reads
/// as item loss to players.
pub fn add_item_recursive(
    inventory: &mut Inventory,
    item: &mut ItemInstance,
    slot_index: Option<usize>,
) -> bool {
    // Cheap path: the item fits right here
    if inventory.add_item(item, slot_index) {
        return true;
    }

    for index in 0..inventory.slot_count() {
        let Some(slot) = inventory.slot_mut(index) else {
            continue;
        };
        let Some(instance) = slot.instance_mut() else {
            continue;
        };

        for embedded in instance.embedded_inventories_mut() {
            if embedded.add_item(item, slot_index) {
                return true;
            }
        }
    }

    false
}

/// Check whether an item, or any item embedded in it, appears on an id list.
///
/// Embedded ids are discovered through an [`EmbeddedItemQuery`] seeded with
/// the root item's id; `resolve` maps discovered ids to their definitions so
/// the walk can continue transitively. The seeded visited set caps the walk
/// at the number of distinct ids involved, so self-references and cycles
/// terminate. Pass a resolver that always returns `None` to check only
/// directly embedded items.
pub fn is_item_permitted_recursive<F>(
    item: &ItemInstance,
    permitted_ids: &[ItemId],
    mut resolve: F,
) -> bool
where
    F: FnMut(&ItemId) -> Option<Arc<ItemDefinition>>,
{
    let mut interaction = ItemInteraction::new().with_query(ItemQuery::EmbeddedItem(
        EmbeddedItemQuery::seeded(item.id().clone()),
    ));
    item.query_properties(&mut interaction);

    // The root item was already examined; keep querying definitions of newly
    // discovered ids until a pass discovers nothing further.
    let mut cursor = 1;
    loop {
        let pending: Vec<ItemId> = match interaction.find(QueryKind::EmbeddedItem) {
            Some(ItemQuery::EmbeddedItem(query)) => {
                query.visited().iter().skip(cursor).cloned().collect()
            }
            _ => Vec::new(),
        };

        if pending.is_empty() {
            break;
        }
        cursor += pending.len();

        for id in &pending {
            let Some(definition) = resolve(id) else {
                continue;
            };

            for property in &definition.properties {
                property.try_perform(&mut interaction);
            }
        }
    }

    match interaction.find(QueryKind::EmbeddedItem) {
        Some(ItemQuery::EmbeddedItem(query)) => {
            permitted_ids.iter().any(|id| query.contains_id(id))
        }
        _ => false,
    }
}
