//! Ambient facts shared by every event variant

use serde::{Deserialize, Serialize};

use crate::entity::{EntityDirectory, EntityId, NameOrder};

/// The kind of chat an event happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// One-to-one chat with a user or bot
    User,
    /// Small basic group
    Group,
    /// Channel operating as a group
    Supergroup,
    /// Channel where only admins post
    BroadcastChannel,
    /// End-to-end encrypted one-to-one chat
    SecretChat,
}

/// Who produced the event, as far as rendering cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    /// Actor is itself a channel (posting as the channel)
    #[serde(default)]
    pub is_channel: bool,
    /// Actor has a non-empty display name
    #[serde(default = "default_named")]
    pub named: bool,
}

fn default_named() -> bool {
    true
}

/// Read-only facts for one render call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    /// Author of the service message, absent for anonymous admins
    #[serde(default)]
    pub actor: Option<Actor>,
    /// The account viewing the chat
    pub viewer: EntityId,
    /// The chat the event happened in
    pub chat: EntityId,
    pub container: ContainerKind,
    /// The message was received rather than sent by the viewer
    #[serde(default)]
    pub incoming: bool,
    /// Rendering for the condensed chat list instead of the message history
    #[serde(default)]
    pub for_chat_list: bool,
    /// Unix time the render happens at, for "today"/"tomorrow" phrasing
    #[serde(default)]
    pub now: i64,
    /// Viewer's UTC offset in seconds
    #[serde(default)]
    pub utc_offset: i32,
}

impl RenderContext {
    pub fn new(viewer: EntityId, chat: EntityId, container: ContainerKind) -> Self {
        Self {
            actor: None,
            viewer,
            chat,
            container,
            incoming: false,
            for_chat_list: false,
            now: 0,
            utc_offset: 0,
        }
    }

    /// Set the actor, resolving its kind and name through the directory
    pub fn with_actor(mut self, id: EntityId, directory: &dyn EntityDirectory) -> Self {
        let is_channel = directory.kind(id).is_some_and(|k| k.is_channel());
        let named = directory
            .display_name(id, NameOrder::FirstLast)
            .is_some_and(|n| !n.is_empty());
        self.actor = Some(Actor {
            id,
            is_channel,
            named,
        });
        self
    }

    pub fn incoming(mut self, incoming: bool) -> Self {
        self.incoming = incoming;
        self
    }

    pub fn for_chat_list(mut self, for_chat_list: bool) -> Self {
        self.for_chat_list = for_chat_list;
        self
    }

    pub fn at(mut self, now: i64, utc_offset: i32) -> Self {
        self.now = now;
        self.utc_offset = utc_offset;
        self
    }

    pub fn actor_id(&self) -> Option<EntityId> {
        self.actor.map(|a| a.id)
    }

    /// The viewer authored the event
    pub fn actor_is_viewer(&self) -> bool {
        self.actor_id() == Some(self.viewer)
    }

    /// No actor, or one without a display name
    pub fn actor_is_anonymous(&self) -> bool {
        !self.actor.is_some_and(|a| a.named)
    }

    pub fn actor_is_channel(&self) -> bool {
        self.actor.is_some_and(|a| a.is_channel)
    }

    pub fn is_broadcast(&self) -> bool {
        self.container == ContainerKind::BroadcastChannel
    }
}
