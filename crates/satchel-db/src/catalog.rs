//! Catalog: item lookup across all registered databases

use crate::database::ItemDatabase;
use crate::error::{Error, Result};
use satchel_core::{ItemDefinition, ItemId, ItemInstance};
use std::sync::Arc;

/// All item databases available to a running game (base game, mods, DLC).
///
/// Lookup walks the databases in registration order and returns the first
/// hit, so earlier registrations shadow later ones.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    databases: Vec<ItemDatabase>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a database. Databases marked ignored are skipped.
    pub fn register(&mut self, database: ItemDatabase) {
        if database.is_ignored() {
            log::debug!(
                "skipping ignored item database with prefix {}",
                database.id_prefix()
            );
            return;
        }

        self.databases.push(database);
        log::info!(
            "item catalog now serves {} database(s)",
            self.databases.len()
        );
    }

    /// Look up a definition by stable id across all databases
    pub fn item_by_id(&self, id: &ItemId) -> Option<&Arc<ItemDefinition>> {
        self.databases.iter().find_map(|database| database.get(id))
    }

    /// Create an instance holding `amount` from a saved id
    pub fn instantiate(&self, id: &ItemId, amount: i32) -> Result<ItemInstance> {
        let definition = self
            .item_by_id(id)
            .ok_or_else(|| Error::ItemNotFound(id.to_string()))?;

        let mut instance = ItemInstance::new(Arc::clone(definition));
        instance.set_amount(amount);
        Ok(instance)
    }

    /// The registered databases, in registration order
    pub fn databases(&self) -> &[ItemDatabase] {
        &self.databases
    }

    /// Total number of definitions across all databases
    pub fn item_count(&self) -> usize {
        self.databases.iter().map(ItemDatabase::len).sum()
    }
}
