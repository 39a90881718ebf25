//! Styled ranges and terminal styling
//!
//! Rendering produces semantic roles only. Turning a role into something
//! visible is the job of a [`StyleResolver`], which the caller picks.

use std::ops::Range;

use crossterm::style::{ContentStyle, Stylize};
use serde::Serialize;

use crate::entity::EntityId;

/// Semantic role of a span of rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "role", content = "entity", rename_all = "snake_case")]
pub enum StyleRole {
    Body,
    /// Emphasized without linking anywhere
    BoldPlain,
    /// Emphasized and linked to an entity
    Mention(EntityId),
}

/// A span of rendered text with its role, in chars
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRange {
    pub range: Range<usize>,
    #[serde(flatten)]
    pub role: StyleRole,
}

impl StyledRange {
    pub fn new(range: Range<usize>, role: StyleRole) -> Self {
        Self { range, role }
    }
}

/// A rendered service sentence.
///
/// `ranges` holds only the non-body spans, sorted by start and never
/// overlapping. Everything outside them is body text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub text: String,
    pub ranges: Vec<StyledRange>,
}

impl RenderResult {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ranges: Vec::new(),
        }
    }

    /// Length of the text in chars
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Cover the whole text with ranges, filling gaps with body spans
    pub fn segments(&self) -> Vec<StyledRange> {
        let len = self.char_len();
        let mut segments = Vec::with_capacity(self.ranges.len() * 2 + 1);
        let mut cursor = 0;

        for styled in &self.ranges {
            if styled.range.start > cursor {
                segments.push(StyledRange::new(cursor..styled.range.start, StyleRole::Body));
            }
            segments.push(styled.clone());
            cursor = styled.range.end;
        }
        if cursor < len {
            segments.push(StyledRange::new(cursor..len, StyleRole::Body));
        }

        segments
    }

    /// Text of one char range
    pub fn slice(&self, range: &Range<usize>) -> String {
        self.text
            .chars()
            .skip(range.start)
            .take(range.end.saturating_sub(range.start))
            .collect()
    }
}

/// Maps roles to visual attributes
pub trait StyleResolver {
    type Attributes;

    fn resolve(&self, role: &StyleRole) -> Self::Attributes;
}

/// ANSI terminal styling via crossterm
#[derive(Debug, Clone, Copy)]
pub struct TerminalStyles {
    pub mention: ContentStyle,
    pub bold: ContentStyle,
    pub body: ContentStyle,
}

impl Default for TerminalStyles {
    fn default() -> Self {
        Self {
            mention: ContentStyle::new().cyan().bold(),
            bold: ContentStyle::new().bold(),
            body: ContentStyle::new(),
        }
    }
}

impl StyleResolver for TerminalStyles {
    type Attributes = ContentStyle;

    fn resolve(&self, role: &StyleRole) -> ContentStyle {
        match role {
            StyleRole::Body => self.body,
            StyleRole::BoldPlain => self.bold,
            StyleRole::Mention(_) => self.mention,
        }
    }
}

/// Render a result to an ANSI string
pub fn paint<R>(result: &RenderResult, resolver: &R) -> String
where
    R: StyleResolver<Attributes = ContentStyle>,
{
    result
        .segments()
        .iter()
        .map(|segment| {
            let text = result.slice(&segment.range);
            format!("{}", resolver.resolve(&segment.role).apply(text))
        })
        .collect()
}
