//! Entities (users, groups, channels) and the directory that names them
//!
//! The renderer never stores names. It asks an [`EntityDirectory`] for them at
//! render time, so the same event renders differently as contacts are renamed.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a user, group or channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of entity an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Group,
    /// Channel where only admins post
    BroadcastChannel,
    /// Channel operating as a large group
    PlainChannel,
}

impl EntityKind {
    pub fn is_channel(self) -> bool {
        matches!(self, EntityKind::BroadcastChannel | EntityKind::PlainChannel)
    }
}

/// Locale preference for ordering person names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameOrder {
    #[default]
    FirstLast,
    LastFirst,
}

/// Read-only lookup of entity names and kinds.
///
/// Implementations must be safe for concurrent read-only use.
pub trait EntityDirectory: Send + Sync {
    /// Full display name, ordered per `order`
    fn display_name(&self, id: EntityId, order: NameOrder) -> Option<String>;

    /// Short name (first name for users, title otherwise)
    fn compact_name(&self, id: EntityId) -> Option<String> {
        self.display_name(id, NameOrder::FirstLast)
    }

    fn kind(&self, id: EntityId) -> Option<EntityKind>;
}

/// A named entity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    User {
        id: EntityId,
        #[serde(default)]
        first_name: String,
        #[serde(default)]
        last_name: String,
    },
    Group {
        id: EntityId,
        title: String,
    },
    BroadcastChannel {
        id: EntityId,
        title: String,
    },
    PlainChannel {
        id: EntityId,
        title: String,
    },
}

impl Entity {
    pub fn user(id: i64, first_name: &str, last_name: &str) -> Self {
        Entity::User {
            id: EntityId(id),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Entity::User { id, .. }
            | Entity::Group { id, .. }
            | Entity::BroadcastChannel { id, .. }
            | Entity::PlainChannel { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::User { .. } => EntityKind::User,
            Entity::Group { .. } => EntityKind::Group,
            Entity::BroadcastChannel { .. } => EntityKind::BroadcastChannel,
            Entity::PlainChannel { .. } => EntityKind::PlainChannel,
        }
    }

    fn display_name(&self, order: NameOrder) -> String {
        match self {
            Entity::User {
                first_name,
                last_name,
                ..
            } => {
                let (a, b) = match order {
                    NameOrder::FirstLast => (first_name, last_name),
                    NameOrder::LastFirst => (last_name, first_name),
                };
                match (a.is_empty(), b.is_empty()) {
                    (false, false) => format!("{} {}", a, b),
                    (false, true) => a.clone(),
                    (true, false) => b.clone(),
                    (true, true) => String::new(),
                }
            }
            Entity::Group { title, .. }
            | Entity::BroadcastChannel { title, .. }
            | Entity::PlainChannel { title, .. } => title.clone(),
        }
    }

    fn compact_name(&self) -> String {
        match self {
            Entity::User {
                first_name,
                last_name,
                ..
            } => {
                if first_name.is_empty() {
                    last_name.clone()
                } else {
                    first_name.clone()
                }
            }
            _ => self.display_name(NameOrder::FirstLast),
        }
    }
}

/// In-memory entity directory
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entities: HashMap<EntityId, Entity>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entity
    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.id(), entity);
    }

    pub fn with(mut self, entity: Entity) -> Self {
        self.insert(entity);
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for Directory {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut directory = Directory::new();
        for entity in iter {
            directory.insert(entity);
        }
        directory
    }
}

impl EntityDirectory for Directory {
    fn display_name(&self, id: EntityId, order: NameOrder) -> Option<String> {
        self.entities.get(&id).map(|e| e.display_name(order))
    }

    fn compact_name(&self, id: EntityId) -> Option<String> {
        self.entities.get(&id).map(Entity::compact_name)
    }

    fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).map(Entity::kind)
    }
}
