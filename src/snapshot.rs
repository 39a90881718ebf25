//! JSON message snapshots for previewing service text
//!
//! A snapshot bundles everything one render needs: the event, its context,
//! the referenced message and the entities it mentions.
//!
//! ```json
//! {
//!   "event": { "kind": "members_removed", "entities": [2] },
//!   "context": { "viewer": 1, "chat": 100, "container": "group" },
//!   "actor": 1,
//!   "entities": [
//!     { "kind": "user", "id": 1, "first_name": "Ada", "last_name": "Lovelace" },
//!     { "kind": "user", "id": 2, "first_name": "Bob", "last_name": "" }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::context::RenderContext;
use crate::display::{RenderResult, Renderer};
use crate::entity::{Directory, Entity, EntityId};
use crate::error::RenderError;
use crate::event::{Event, SecondaryMessage};

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub event: Event,
    pub context: RenderContext,
    /// Actor to resolve through `entities`, replacing `context.actor`
    #[serde(default)]
    pub actor: Option<EntityId>,
    #[serde(default)]
    pub secondary: Option<SecondaryMessage>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn directory(&self) -> Directory {
        self.entities.iter().cloned().collect()
    }

    /// Context with the actor resolved against the snapshot's entities
    pub fn resolved_context(&self, directory: &Directory) -> RenderContext {
        match self.actor {
            Some(id) => self.context.clone().with_actor(id, directory),
            None => self.context.clone(),
        }
    }

    /// Render with a renderer built over this snapshot's directory
    pub fn render_with<'t, F>(&self, build: F) -> Result<Option<RenderResult>, RenderError>
    where
        F: for<'d> FnOnce(&'d Directory) -> Renderer<'t, 'd>,
    {
        let directory = self.directory();
        let ctx = self.resolved_context(&directory);
        build(&directory).render_event(&self.event, &ctx, self.secondary.as_ref())
    }
}
