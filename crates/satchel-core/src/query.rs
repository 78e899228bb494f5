//! Item queries: typed accumulators extracting information from properties
//!
//! A query is mutated by the properties that understand it and by nothing
//! else. One query of each kind can take part in an interaction.

use crate::identity::{AssetRef, ItemId};
use crate::property::Rarity;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Discriminant of a query variant, used to key interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    Name,
    Value,
    Rarity,
    Equipable,
    EmbeddedItem,
    Inventory,
    Multi,
}

/// A typed accumulator that properties write their answers into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemQuery {
    /// Resolves the display name of an item
    Name(NameQuery),
    /// Accumulates the value of an item
    Value(ValueQuery),
    /// Resolves the highest rarity attached to an item
    Rarity(RarityQuery),
    /// Resolves the equipment asset of an item
    Equipable(EquipableQuery),
    /// Collects the ids of items embedded in an item
    EmbeddedItem(EmbeddedItemQuery),
    /// Collects descriptors of inventories embedded in an item
    Inventory(InventoryQuery),
    /// Composite forwarding lookups to a contained set of queries
    Multi(MultiQuery),
}

impl ItemQuery {
    /// The kind this query is keyed under
    pub fn kind(&self) -> QueryKind {
        match self {
            ItemQuery::Name(_) => QueryKind::Name,
            ItemQuery::Value(_) => QueryKind::Value,
            ItemQuery::Rarity(_) => QueryKind::Rarity,
            ItemQuery::Equipable(_) => QueryKind::Equipable,
            ItemQuery::EmbeddedItem(_) => QueryKind::EmbeddedItem,
            ItemQuery::Inventory(_) => QueryKind::Inventory,
            ItemQuery::Multi(_) => QueryKind::Multi,
        }
    }

    /// Resolve a kind against this query: itself on a direct match, else a
    /// contained component for composites
    pub fn find(&self, kind: QueryKind) -> Option<&ItemQuery> {
        if self.kind() == kind {
            return Some(self);
        }

        match self {
            ItemQuery::Multi(multi) => multi.components.iter().find(|q| q.kind() == kind),
            _ => None,
        }
    }

    /// Mutable variant of [`find`](Self::find)
    pub fn find_mut(&mut self, kind: QueryKind) -> Option<&mut ItemQuery> {
        if self.kind() == kind {
            return Some(self);
        }

        match self {
            ItemQuery::Multi(multi) => multi.components.iter_mut().find(|q| q.kind() == kind),
            _ => None,
        }
    }
}

/// Resolves the display name of an item. Last writer wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NameQuery {
    pub name: String,
}

impl NameQuery {
    /// Create a name query primed with the definition name
    pub fn new(current_name: impl Into<String>) -> Self {
        Self {
            name: current_name.into(),
        }
    }
}

/// Accumulates the value of an item from flat amounts and percentage bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValueQuery {
    base: i32,
    scale: i32,
}

impl ValueQuery {
    /// Add a fixed amount to the value. Can be negative.
    pub fn add_base_value(&mut self, value: i32) {
        self.base += value;
    }

    /// Add a relative bonus in percent. Can be negative.
    pub fn add_value_scale(&mut self, percent: i32) {
        self.scale += percent;
    }

    /// The resolved value: base plus the scaled bonus, truncated
    pub fn value(&self) -> i32 {
        self.base + self.base * self.scale / 100
    }
}

/// Resolves the highest rarity attached to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RarityQuery {
    pub rarity: Rarity,
}

/// Resolves the equipment asset of an item. Last writer wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EquipableQuery {
    pub equipment: Option<AssetRef>,
}

/// Collects the ids of items embedded in an item.
///
/// Seeded with the root item's id so self-references and cycles terminate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmbeddedItemQuery {
    visited: IndexSet<ItemId>,
}

impl EmbeddedItemQuery {
    /// Create a query seeded with the id of the item being examined
    pub fn seeded(root: ItemId) -> Self {
        let mut visited = IndexSet::new();
        visited.insert(root);
        Self { visited }
    }

    /// Record a discovered item id
    pub fn add_item_id(&mut self, id: ItemId) {
        self.visited.insert(id);
    }

    /// Whether an id was seeded or already discovered
    pub fn contains_id(&self, id: &ItemId) -> bool {
        self.visited.contains(id)
    }

    /// All ids seen so far, in discovery order (the root id first)
    pub fn visited(&self) -> &IndexSet<ItemId> {
        &self.visited
    }
}

/// Descriptor of an embedded inventory discovered during a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedInventoryInfo {
    pub title: String,
    pub slot_count: usize,
    /// Whether the inventory was already built at query time
    pub built: bool,
}

/// Collects descriptors of inventories embedded in an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InventoryQuery {
    inventories: Vec<EmbeddedInventoryInfo>,
}

impl InventoryQuery {
    /// Record a discovered embedded inventory
    pub fn record(&mut self, info: EmbeddedInventoryInfo) {
        self.inventories.push(info);
    }

    /// Discovered inventories, in discovery order
    pub fn inventories(&self) -> &[EmbeddedInventoryInfo] {
        &self.inventories
    }
}

/// Composite query forwarding lookups to a contained set of queries.
///
/// Lets a caller bundle several queries under one slot of an interaction;
/// lookups that miss the composite itself search its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MultiQuery {
    components: Vec<ItemQuery>,
}

impl MultiQuery {
    /// Add a component query
    pub fn push(&mut self, query: ItemQuery) {
        self.components.push(query);
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, query: ItemQuery) -> Self {
        self.push(query);
        self
    }

    /// The contained queries
    pub fn components(&self) -> &[ItemQuery] {
        &self.components
    }
}
