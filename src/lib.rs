//! servicetext - localized service message rendering with styled ranges
//!
//! Turns a chat service event (member joined, title changed, call ended,
//! message pinned, ...) into a sentence from a localized template and reports
//! which char range each argument occupies, tagged with a style role.
//! The preview binary is in `main.rs`, catalog tooling in
//! `bin/servicetext-catalog.rs`.

pub mod classify;
pub mod config;
pub mod context;
pub mod display;
pub mod entity;
pub mod error;
pub mod event;
pub mod humanize;
pub mod paths;
pub mod snapshot;
pub mod template;

pub use classify::{classify, RenderCase};
pub use context::{ContainerKind, RenderContext};
pub use display::{RenderResult, Renderer, StyleRole, StyledRange};
pub use entity::{Directory, Entity, EntityDirectory, EntityId, NameOrder};
pub use error::{CatalogError, RenderError, TemplateError};
pub use event::{Event, SecondaryMessage};
pub use template::{Catalog, TemplateKey, TemplateProvider};
