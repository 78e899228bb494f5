//! Item instances: concrete, mutable quantities of an item definition

use crate::definition::ItemDefinition;
use crate::identity::ItemId;
use crate::interaction::ItemInteraction;
use crate::inventory::Inventory;
use crate::property::ItemProperty;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A concrete quantity of an item in the game world.
///
/// Instances share their [`ItemDefinition`] read-only; everything mutable
/// (the amount, instance-local property copies) lives on the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    definition: Arc<ItemDefinition>,
    amount: i32,
    instance_properties: Vec<ItemProperty>,
}

impl ItemInstance {
    /// Create an instance with amount 1, cloning the definition's
    /// instance-local properties
    pub fn new(definition: Arc<ItemDefinition>) -> Self {
        let instance_properties = definition.instance_properties().cloned().collect();

        Self {
            definition,
            amount: 1,
            instance_properties,
        }
    }

    /// The shared definition this instance was created from
    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    /// Stable id of the definition
    pub fn id(&self) -> &ItemId {
        &self.definition.id
    }

    /// Definition display name. Name overrides are resolved through a
    /// [`NameQuery`](crate::NameQuery), not here.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Definition description
    pub fn description(&self) -> &str {
        &self.definition.description
    }

    /// Max amount a stack of this item can have (zero or below = unbounded)
    pub fn max_stack(&self) -> i32 {
        self.definition.max_stack
    }

    /// How many more units fit on top of the current amount
    pub fn stack_capacity(&self) -> i32 {
        if self.max_stack() <= 0 {
            i32::MAX - self.amount
        } else {
            self.max_stack() - self.amount
        }
    }

    /// Current amount
    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// Set the current amount. Amounts never go below zero.
    pub fn set_amount(&mut self, amount: i32) {
        self.amount = amount.max(0);
    }

    /// Instance-local properties, in declaration order
    pub fn instance_properties(&self) -> &[ItemProperty] {
        &self.instance_properties
    }

    /// Append an instance-local property
    pub fn add_property(&mut self, property: ItemProperty) {
        self.instance_properties.push(property);
    }

    /// Remove an instance-local property by index
    pub fn remove_property(&mut self, index: usize) -> Option<ItemProperty> {
        if index < self.instance_properties.len() {
            Some(self.instance_properties.remove(index))
        } else {
            None
        }
    }

    /// All properties serving this instance: the definition's shared ones
    /// first, then the instance-local copies, each in declaration order
    pub fn all_properties(&self) -> impl Iterator<Item = &ItemProperty> {
        self.definition
            .shared_properties()
            .chain(self.instance_properties.iter())
    }

    /// Run every property of this instance against an interaction.
    ///
    /// Order matters and is fixed: shared definition properties first, then
    /// instance-local ones, each in declaration order.
    pub fn query_properties(&self, interaction: &mut ItemInteraction) {
        for property in self.all_properties() {
            property.try_perform(interaction);
        }
    }

    /// Create a fresh instance of the same definition holding `amount`.
    ///
    /// The clone starts from the definition like any new instance; runtime
    /// edits to this instance's property list do not carry over.
    pub fn clone_with_amount(&self, amount: i32) -> ItemInstance {
        let mut clone = ItemInstance::new(Arc::clone(&self.definition));
        clone.set_amount(amount);
        clone
    }

    /// Embedded inventories owned by this instance, built on first access,
    /// in property declaration order
    pub fn embedded_inventories_mut(&mut self) -> impl Iterator<Item = &mut Inventory> {
        self.instance_properties
            .iter_mut()
            .filter_map(|property| property.as_embedded_inventory_mut())
            .map(|embedded| embedded.ensure_inventory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{
        EmbeddedInventoryProperty, FixedValueProperty, NameOverrideProperty, RarityProperty,
    };
    use crate::query::{ItemQuery, NameQuery, QueryKind, ValueQuery};
    use crate::Rarity;

    fn potion() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("Potion")
                .with_max_stack(10)
                .with_property(ItemProperty::FixedValue(FixedValueProperty { amount: 25 })),
        )
    }

    #[test]
    fn test_new_clones_instance_properties() {
        let def = Arc::new(
            ItemDefinition::new("Charm")
                .with_property(ItemProperty::Rarity(RarityProperty {
                    rarity: Rarity::Rare,
                }))
                .with_property(ItemProperty::NameOverride(NameOverrideProperty {
                    display_name: "Old Charm".into(),
                })),
        );

        let instance = ItemInstance::new(def);
        assert_eq!(instance.amount(), 1);
        // Only the non-shared name override is copied onto the instance
        assert_eq!(instance.instance_properties().len(), 1);
        assert_eq!(instance.all_properties().count(), 2);
    }

    #[test]
    fn test_stack_capacity() {
        let mut instance = ItemInstance::new(potion());
        instance.set_amount(4);
        assert_eq!(instance.stack_capacity(), 6);

        let unbounded = ItemInstance::new(Arc::new(ItemDefinition::new("Coin")));
        assert_eq!(unbounded.stack_capacity(), i32::MAX - 1);
    }

    #[test]
    fn test_amount_never_negative() {
        let mut instance = ItemInstance::new(potion());
        instance.set_amount(-5);
        assert_eq!(instance.amount(), 0);
    }

    #[test]
    fn test_query_order_shared_then_instance() {
        let def = Arc::new(
            ItemDefinition::new("Blade")
                .with_property(ItemProperty::NameOverride(NameOverrideProperty {
                    display_name: "Named Blade".into(),
                })),
        );
        let instance = ItemInstance::new(def);

        let mut interaction = ItemInteraction::new()
            .with_query(ItemQuery::Name(NameQuery::new(instance.name())));
        instance.query_properties(&mut interaction);

        let Some(ItemQuery::Name(query)) = interaction.find(QueryKind::Name) else {
            panic!("name query missing");
        };
        assert_eq!(query.name, "Named Blade");
    }

    #[test]
    fn test_clone_with_amount_starts_from_definition() {
        let mut instance = ItemInstance::new(potion());
        instance.set_amount(7);
        instance.add_property(ItemProperty::NameOverride(NameOverrideProperty {
            display_name: "Edited".into(),
        }));

        let clone = instance.clone_with_amount(3);
        assert_eq!(clone.amount(), 3);
        assert_eq!(clone.id(), instance.id());
        // Runtime-added properties are not carried over
        assert!(clone.instance_properties().is_empty());

        let mut interaction =
            ItemInteraction::new().with_query(ItemQuery::Value(ValueQuery::default()));
        clone.query_properties(&mut interaction);
        let Some(ItemQuery::Value(query)) = interaction.find(QueryKind::Value) else {
            panic!("value query missing");
        };
        assert_eq!(query.value(), 25);
    }

    #[test]
    fn test_embedded_inventories_built_on_access() {
        let def = Arc::new(ItemDefinition::new("Backpack").with_property(
            ItemProperty::EmbeddedInventory(EmbeddedInventoryProperty {
                title: "Backpack".into(),
                slot_count: 4,
                ..Default::default()
            }),
        ));
        let mut instance = ItemInstance::new(def);

        let inventories: Vec<_> = instance.embedded_inventories_mut().collect();
        assert_eq!(inventories.len(), 1);
        assert_eq!(inventories[0].slot_count(), 4);
    }
}
