//! Identity types for items and interaction participants

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an item definition.
///
/// Empty until a database build assigns it; read-only afterwards. Inventories
/// and slots compare items by this id, never by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An unset id means the definition was never compiled into a database
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier for a runtime entity taking part in an interaction
/// (the sender or target of a query round)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create a new entity ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

/// Name of an external asset (icon, world prefab, equipment model).
///
/// The core never resolves these; spawn and presentation layers do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    /// Create a new asset reference
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the asset name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset:{}", self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id() {
        let id = ItemId::new("base_0");
        assert_eq!(id.as_str(), "base_0");
        assert!(!id.is_unset());
        assert!(ItemId::default().is_unset());
    }

    #[test]
    fn test_entity_id() {
        let id = EntityId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "entity:7");
    }
}
