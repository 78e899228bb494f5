//! Property registry for authoring tools
//!
//! Editors and importers enumerate the available property kinds through this
//! registry instead of discovering variants by reflection; deployments
//! register extra factories for custom defaults.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use satchel_core::{
    EmbeddedInventoryProperty, EmbeddedItemProperty, EquipableProperty, FixedValueProperty,
    ItemProperty, NameOverrideProperty, RarityProperty, ScalingValueProperty,
};

/// Creates a freshly configured property of one kind
pub type PropertyFactory = fn() -> ItemProperty;

/// Registry mapping property kind names to factories
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    factories: IndexMap<String, PropertyFactory>,
}

impl PropertyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in property kind registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("name_override", || {
            ItemProperty::NameOverride(NameOverrideProperty::default())
        });
        registry.register("fixed_value", || {
            ItemProperty::FixedValue(FixedValueProperty::default())
        });
        registry.register("scaling_value", || {
            ItemProperty::ScalingValue(ScalingValueProperty::default())
        });
        registry.register("rarity", || {
            ItemProperty::Rarity(RarityProperty::default())
        });
        registry.register("equipable", || {
            ItemProperty::Equipable(EquipableProperty::default())
        });
        registry.register("embedded_item", || {
            ItemProperty::EmbeddedItem(EmbeddedItemProperty::default())
        });
        registry.register("embedded_inventory", || {
            ItemProperty::EmbeddedInventory(EmbeddedInventoryProperty::default())
        });
        registry
    }

    /// Register a factory under a kind name, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, factory: PropertyFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Create a property by kind name
    pub fn create(&self, name: &str) -> Result<ItemProperty> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownProperty(name.to_string()))
    }

    /// Whether a kind name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered kind names, in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no kind is registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_builtin_kinds() {
        let registry = PropertyRegistry::with_defaults();
        assert_eq!(registry.len(), 7);

        // Every registered factory builds a property whose kind name matches
        // its registration key.
        for kind in registry.kinds() {
            let property = registry.create(kind).unwrap();
            assert_eq!(property.kind_name(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let registry = PropertyRegistry::with_defaults();
        assert!(matches!(
            registry.create("durability"),
            Err(Error::UnknownProperty(_))
        ));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = PropertyRegistry::new();
        registry.register("treasure_value", || {
            ItemProperty::FixedValue(FixedValueProperty { amount: 500 })
        });

        let property = registry.create("treasure_value").unwrap();
        let ItemProperty::FixedValue(fixed) = property else {
            panic!("expected a fixed value property");
        };
        assert_eq!(fixed.amount, 500);
    }
}
