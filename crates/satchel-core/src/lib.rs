//! Satchel Core - item, slot, and inventory primitives
//!
//! This crate provides the runtime types of the satchel inventory system:
//! - Item definitions: immutable, shared templates ([`ItemDefinition`])
//! - Item properties and queries: modular behavior attached to items and the
//!   typed accumulators that extract information from it
//! - Item instances: concrete, mutable quantities ([`ItemInstance`])
//! - Slots and inventories: stack-aware storage with permission filtering
//! - Resolvers: nesting support for embedded items and inventories
//!
//! Everything is synchronous and single-threaded; callers that share an
//! [`Inventory`] across threads must serialize mutating calls themselves.
//! Fallible operations report through return values, never panics: policy
//! rejections and capacity exhaustion come back as `false`/`None`.
//!
//! Inventory mutations are best-effort. A failed add may have moved part of
//! the amount into other slots already, and that part stays where it landed.

mod definition;
mod identity;
mod instance;
mod interaction;
mod inventory;
mod property;
mod query;
mod resolve;
mod slot;

pub use definition::ItemDefinition;
pub use identity::{AssetRef, EntityId, ItemId};
pub use instance::ItemInstance;
pub use interaction::ItemInteraction;
pub use inventory::{
    Inventory, InventoryEvent, InventoryPrefs, DEFAULT_STACK_LOOP_LIMIT,
};
pub use property::{
    EmbeddedInventoryProperty, EmbeddedItemProperty, EquipableProperty, FixedValueProperty,
    ItemProperty, NameOverrideProperty, Rarity, RarityProperty, ScalingValueProperty,
};
pub use query::{
    EmbeddedInventoryInfo, EmbeddedItemQuery, EquipableQuery, InventoryQuery, ItemQuery,
    MultiQuery, NameQuery, QueryKind, RarityQuery, ValueQuery,
};
pub use resolve::{add_item_recursive, is_item_permitted_recursive};
pub use slot::{ItemSlot, REMOVE_ALL};
