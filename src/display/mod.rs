//! Display layer for service text
//!
//! Separates the sentence from its looks. The renderer fills templates and
//! reports styled ranges by role; styles map roles to terminal attributes.
//! Legacy token splicing lives apart in its own module.

mod legacy;
mod renderer;
pub mod styles;

pub use renderer::{Renderer, SlotRole};
pub use styles::{paint, RenderResult, StyleResolver, StyleRole, StyledRange, TerminalStyles};
