//! Item properties: modular behavior attached to item definitions
//!
//! Properties never talk to each other. They only react to queries found in
//! an [`ItemInteraction`], which keeps every variant independent of the rest.

use crate::identity::{AssetRef, ItemId};
use crate::interaction::ItemInteraction;
use crate::inventory::{Inventory, InventoryPrefs};
use crate::query::{EmbeddedInventoryInfo, ItemQuery, QueryKind};
use serde::{Deserialize, Serialize};

/// Common rarity grades, ordered from none to unique
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Rarity {
    #[default]
    None,
    Common,
    Unusual,
    Remarkable,
    Rare,
    Unique,
}

/// A modular unit of item behavior.
///
/// Shared variants live on the [`ItemDefinition`](crate::ItemDefinition) and
/// serve every instance; instance-local variants are cloned into each
/// [`ItemInstance`](crate::ItemInstance) at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemProperty {
    /// Overrides the display name of one specific item
    NameOverride(NameOverrideProperty),
    /// Adds a flat amount to the item value
    FixedValue(FixedValueProperty),
    /// Scales the accumulated base value by a percentage
    ScalingValue(ScalingValueProperty),
    /// Raises the item rarity
    Rarity(RarityProperty),
    /// Names the equipment asset spawned when the item is equipped
    Equipable(EquipableProperty),
    /// References another item contained within this one
    EmbeddedItem(EmbeddedItemProperty),
    /// Carries a whole nested inventory inside the item
    EmbeddedInventory(EmbeddedInventoryProperty),
}

impl ItemProperty {
    /// Whether one logical copy of this property serves all instances of the
    /// item. Instance-local variants are cloned per instance instead.
    pub fn is_shared(&self) -> bool {
        !matches!(
            self,
            ItemProperty::NameOverride(_) | ItemProperty::EmbeddedInventory(_)
        )
    }

    /// Stable name of the variant, used by authoring registries
    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemProperty::NameOverride(_) => "name_override",
            ItemProperty::FixedValue(_) => "fixed_value",
            ItemProperty::ScalingValue(_) => "scaling_value",
            ItemProperty::Rarity(_) => "rarity",
            ItemProperty::Equipable(_) => "equipable",
            ItemProperty::EmbeddedItem(_) => "embedded_item",
            ItemProperty::EmbeddedInventory(_) => "embedded_inventory",
        }
    }

    /// React to an interaction.
    ///
    /// A property that finds no query it understands is a no-op; queries
    /// mutate only themselves.
    pub fn try_perform(&self, interaction: &mut ItemInteraction) {
        match self {
            ItemProperty::NameOverride(p) => p.perform(interaction),
            ItemProperty::FixedValue(p) => p.perform(interaction),
            ItemProperty::ScalingValue(p) => p.perform(interaction),
            ItemProperty::Rarity(p) => p.perform(interaction),
            ItemProperty::Equipable(p) => p.perform(interaction),
            ItemProperty::EmbeddedItem(p) => p.perform(interaction),
            ItemProperty::EmbeddedInventory(p) => p.perform(interaction),
        }
    }

    /// Try to view this property as an embedded inventory
    pub fn as_embedded_inventory(&self) -> Option<&EmbeddedInventoryProperty> {
        match self {
            ItemProperty::EmbeddedInventory(p) => Some(p),
            _ => None,
        }
    }

    /// Try to view this property as an embedded inventory, mutably
    pub fn as_embedded_inventory_mut(&mut self) -> Option<&mut EmbeddedInventoryProperty> {
        match self {
            ItemProperty::EmbeddedInventory(p) => Some(p),
            _ => None,
        }
    }

    /// Try to view this property as an embedded item reference
    pub fn as_embedded_item(&self) -> Option<&EmbeddedItemProperty> {
        match self {
            ItemProperty::EmbeddedItem(p) => Some(p),
            _ => None,
        }
    }
}

/// Overrides the display name of one specific item instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameOverrideProperty {
    pub display_name: String,
}

impl NameOverrideProperty {
    fn perform(&self, interaction: &mut ItemInteraction) {
        if let Some(ItemQuery::Name(query)) = interaction.find_mut(QueryKind::Name) {
            query.name = self.display_name.clone();
        }
    }
}

impl Default for NameOverrideProperty {
    fn default() -> Self {
        Self {
            display_name: "New Name".into(),
        }
    }
}

/// Adds a flat amount to the accumulated item value. Can be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedValueProperty {
    pub amount: i32,
}

impl FixedValueProperty {
    fn perform(&self, interaction: &mut ItemInteraction) {
        if let Some(ItemQuery::Value(query)) = interaction.find_mut(QueryKind::Value) {
            query.add_base_value(self.amount);
        }
    }
}

impl Default for FixedValueProperty {
    fn default() -> Self {
        Self { amount: 10 }
    }
}

/// Scales the accumulated base value by a percentage. Can be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingValueProperty {
    pub percent: i32,
}

impl ScalingValueProperty {
    fn perform(&self, interaction: &mut ItemInteraction) {
        if let Some(ItemQuery::Value(query)) = interaction.find_mut(QueryKind::Value) {
            query.add_value_scale(self.percent);
        }
    }
}

impl Default for ScalingValueProperty {
    fn default() -> Self {
        Self { percent: 10 }
    }
}

/// Raises the item rarity. Lower rarities never overwrite higher ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RarityProperty {
    pub rarity: Rarity,
}

impl RarityProperty {
    fn perform(&self, interaction: &mut ItemInteraction) {
        let Some(ItemQuery::Rarity(query)) = interaction.find_mut(QueryKind::Rarity) else {
            return;
        };

        if self.rarity > query.rarity {
            query.rarity = self.rarity;
        }
    }
}

/// Names the equipment asset spawned when the item is equipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EquipableProperty {
    pub equipment: Option<AssetRef>,
}

impl EquipableProperty {
    fn perform(&self, interaction: &mut ItemInteraction) {
        let Some(equipment) = &self.equipment else {
            return;
        };

        if let Some(ItemQuery::Equipable(query)) = interaction.find_mut(QueryKind::Equipable) {
            query.equipment = Some(equipment.clone());
        }
    }
}

/// References another item contained within this one, e.g. the arrows
/// inside a quiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedItemProperty {
    /// Compiled id of the referenced item
    pub item: ItemId,
    /// How many of the referenced item this one carries; read by spawn layers
    pub amount: i32,
}

impl EmbeddedItemProperty {
    fn perform(&self, interaction: &mut ItemInteraction) {
        if self.item.is_unset() {
            return;
        }

        let Some(ItemQuery::EmbeddedItem(query)) = interaction.find_mut(QueryKind::EmbeddedItem)
        else {
            return;
        };

        // The visited set is seeded with the root item id; skipping known ids
        // breaks self-references and cycles.
        if query.contains_id(&self.item) {
            return;
        }

        query.add_item_id(self.item.clone());
    }
}

impl Default for EmbeddedItemProperty {
    fn default() -> Self {
        Self {
            item: ItemId::default(),
            amount: 1,
        }
    }
}

/// Carries a whole nested inventory inside the item, e.g. a backpack.
///
/// The inventory is built on first access, not when the property is authored,
/// so definitions stay cheap to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedInventoryProperty {
    pub title: String,
    pub preferences: InventoryPrefs,
    pub slot_count: usize,
    /// The owned nested inventory, present once built
    #[serde(default)]
    pub inventory: Option<Box<Inventory>>,
}

impl EmbeddedInventoryProperty {
    fn perform(&self, interaction: &mut ItemInteraction) {
        if let Some(ItemQuery::Inventory(query)) = interaction.find_mut(QueryKind::Inventory) {
            query.record(EmbeddedInventoryInfo {
                title: self.title.clone(),
                slot_count: self.slot_count,
                built: self.inventory.is_some(),
            });
        }
    }

    /// The nested inventory, built on first access.
    ///
    /// Permission flags are force-cleared: embedded inventories accept every
    /// item regardless of what the authored preferences say.
    pub fn ensure_inventory(&mut self) -> &mut Inventory {
        self.inventory.get_or_insert_with(|| {
            let preferences = self.preferences
                & !(InventoryPrefs::PERMITTED_ITEMS_ONLY | InventoryPrefs::EXCLUDED_ITEMS_ONLY);

            Box::new(
                Inventory::new(self.slot_count)
                    .with_title(self.title.clone())
                    .with_preferences(preferences),
            )
        })
    }
}

impl Default for EmbeddedInventoryProperty {
    fn default() -> Self {
        Self {
            title: String::new(),
            preferences: InventoryPrefs::empty(),
            slot_count: 3,
            inventory: None,
        }
    }
}
