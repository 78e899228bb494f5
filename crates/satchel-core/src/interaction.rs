//! Interactions: transient query bags handed to item properties

use crate::identity::EntityId;
use crate::query::{ItemQuery, QueryKind};
use indexmap::IndexMap;

/// A transient bag of queries plus the entities taking part.
///
/// Built fresh for every query round and discarded afterwards; never
/// persisted. Holds at most one query per kind.
#[derive(Debug, Clone, Default)]
pub struct ItemInteraction {
    /// Who initiated the interaction, if anyone
    pub sender: Option<EntityId>,
    /// Who the interaction is aimed at, if anyone
    pub target: Option<EntityId>,
    queries: IndexMap<QueryKind, ItemQuery>,
}

impl ItemInteraction {
    /// Create an empty interaction
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initiating entity
    pub fn with_sender(mut self, sender: EntityId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Set the targeted entity
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Add a query, replacing any query of the same kind
    pub fn add_query(&mut self, query: ItemQuery) {
        self.queries.insert(query.kind(), query);
    }

    /// Builder form of [`add_query`](Self::add_query)
    pub fn with_query(mut self, query: ItemQuery) -> Self {
        self.add_query(query);
        self
    }

    /// Look up a query by kind.
    ///
    /// A direct hit wins; on a miss the stored queries are asked in
    /// registration order, which lets composites surface their components.
    pub fn find(&self, kind: QueryKind) -> Option<&ItemQuery> {
        if let Some(query) = self.queries.get(&kind) {
            return Some(query);
        }

        self.queries.values().find_map(|query| query.find(kind))
    }

    /// Mutable variant of [`find`](Self::find)
    pub fn find_mut(&mut self, kind: QueryKind) -> Option<&mut ItemQuery> {
        if self.queries.contains_key(&kind) {
            return self.queries.get_mut(&kind);
        }

        self.queries
            .values_mut()
            .find_map(|query| query.find_mut(kind))
    }

    /// Remove and return a query, e.g. to read its result by value
    pub fn take_query(&mut self, kind: QueryKind) -> Option<ItemQuery> {
        self.queries.shift_remove(&kind)
    }

    /// Number of queries registered directly on this interaction
    pub fn query_count(&self) -> usize {
        self.queries.len()
    }
}
