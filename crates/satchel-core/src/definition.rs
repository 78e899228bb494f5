//! Item definitions: the immutable templates items are instantiated from

use crate::identity::{AssetRef, ItemId};
use crate::property::ItemProperty;
use serde::{Deserialize, Serialize};

/// Template describing a kind of item.
///
/// Definitions are authored once, compiled into a database (which assigns the
/// stable [`ItemId`]) and shared read-only between all instances of the item.
/// Property order is significant: it decides query precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Stable id, assigned by a database build. Empty until then.
    #[serde(default)]
    pub id: ItemId,
    /// In-game display name
    pub name: String,
    /// In-game description
    #[serde(default)]
    pub description: String,
    /// Icon asset for presentation layers
    #[serde(default)]
    pub icon: Option<AssetRef>,
    /// World-representation asset used by spawn/pickup layers
    #[serde(default)]
    pub world_asset: Option<AssetRef>,
    /// Max amount a stack of this item can have. Zero or below means
    /// unbounded stacking.
    #[serde(default)]
    pub max_stack: i32,
    /// Modular behavior attached to this item, in query-precedence order
    #[serde(default)]
    pub properties: Vec<ItemProperty>,
    /// Set when a database build has compiled this definition
    #[serde(default)]
    pub compiled: bool,
}

impl ItemDefinition {
    /// Create a new definition with a display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::default(),
            name: name.into(),
            description: String::new(),
            icon: None,
            world_asset: None,
            max_stack: 0,
            properties: Vec::new(),
            compiled: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the icon asset
    pub fn with_icon(mut self, icon: impl Into<AssetRef>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the world-representation asset
    pub fn with_world_asset(mut self, asset: impl Into<AssetRef>) -> Self {
        self.world_asset = Some(asset.into());
        self
    }

    /// Set the max stack size (zero or below = unbounded)
    pub fn with_max_stack(mut self, max_stack: i32) -> Self {
        self.max_stack = max_stack;
        self
    }

    /// Append a property
    pub fn with_property(mut self, property: ItemProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Shared properties, in declaration order.
    ///
    /// These serve every instance of the item directly from the definition;
    /// the remaining properties are cloned per instance.
    pub fn shared_properties(&self) -> impl Iterator<Item = &ItemProperty> {
        self.properties.iter().filter(|p| p.is_shared())
    }

    /// Instance-local properties, in declaration order
    pub fn instance_properties(&self) -> impl Iterator<Item = &ItemProperty> {
        self.properties.iter().filter(|p| !p.is_shared())
    }
}
