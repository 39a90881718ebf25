//! TOML-backed string tables
//!
//! ## Format
//!
//! ```toml
//! "Notification.Invited" = "%1$@ invited %2$@"
//! "Time.Days" = { one = "%@ day", other = "%@ days" }
//! ```
//!
//! Keys are quoted so TOML keeps the dots. Placeholders are `%@` (next
//! argument), `%N$@` (argument N, 1-based) and `%%` for a literal percent.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::{ArgumentRange, Filled, TemplateKey, TemplateProvider};
use crate::error::{CatalogError, TemplateError};

const ENGLISH: &str = include_str!("../../locales/en.toml");

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Arg(usize),
}

/// A parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    fn parse(key: &str, source: &str) -> Result<Self, CatalogError> {
        let malformed = |reason: String| CatalogError::Malformed {
            key: key.to_string(),
            reason,
        };

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut next_sequential = 0;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let index = match chars.next() {
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some('@') => {
                    next_sequential += 1;
                    next_sequential - 1
                }
                Some(d) if d.is_ascii_digit() => {
                    let mut digits = String::from(d);
                    while let Some(&d) = chars.peek() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        digits.push(d);
                        chars.next();
                    }
                    if chars.next() != Some('$') || chars.next() != Some('@') {
                        return Err(malformed(format!("expected `$@` after `%{}`", digits)));
                    }
                    let position: usize = digits
                        .parse()
                        .map_err(|_| malformed(format!("bad position `{}`", digits)))?;
                    if position == 0 {
                        return Err(malformed("positions start at 1".to_string()));
                    }
                    position - 1
                }
                Some(other) => {
                    return Err(malformed(format!("unsupported placeholder `%{}`", other)));
                }
                None => return Err(malformed("dangling `%`".to_string())),
            };

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Arg(index));
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }

    fn fill(&self, key: TemplateKey, args: &[&str]) -> Result<Filled, TemplateError> {
        let mut filled = Filled::default();
        let mut len = 0;

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => {
                    filled.text.push_str(text);
                    len += text.chars().count();
                }
                Piece::Arg(index) => {
                    let value = args.get(*index).ok_or(TemplateError::MissingArgument {
                        key,
                        index: *index,
                        supplied: args.len(),
                    })?;
                    let value_len = value.chars().count();
                    filled.text.push_str(value);
                    filled.ranges.push(ArgumentRange {
                        index: *index,
                        range: len..len + value_len,
                    });
                    len += value_len;
                }
            }
        }

        Ok(filled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Single(Template),
    Plural {
        zero: Option<Template>,
        one: Option<Template>,
        other: Template,
    },
}

impl Entry {
    fn select(&self, count: Option<i64>) -> &Template {
        match self {
            Entry::Single(template) => template,
            Entry::Plural { zero, one, other } => match count {
                Some(0) => zero.as_ref().unwrap_or(other),
                Some(1) => one.as_ref().unwrap_or(other),
                _ => other,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Single(String),
    Plural {
        zero: Option<String>,
        one: Option<String>,
        other: Option<String>,
    },
}

/// Locale string table implementing [`TemplateProvider`]
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Entry>,
}

impl Catalog {
    /// Parse a catalog from TOML source
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, RawEntry> = toml::from_str(source)?;
        let mut entries = HashMap::with_capacity(raw.len());

        for (key, value) in raw {
            let entry = match value {
                RawEntry::Single(text) => Entry::Single(Template::parse(&key, &text)?),
                RawEntry::Plural { zero, one, other } => {
                    let other = other.ok_or_else(|| CatalogError::MissingPluralOther(key.clone()))?;
                    Entry::Plural {
                        zero: zero.map(|t| Template::parse(&key, &t)).transpose()?,
                        one: one.map(|t| Template::parse(&key, &t)).transpose()?,
                        other: Template::parse(&key, &other)?,
                    }
                }
            };
            entries.insert(key, entry);
        }

        Ok(Self { entries })
    }

    /// The bundled English catalog
    pub fn english() -> Result<Self, CatalogError> {
        Self::from_toml_str(ENGLISH)
    }

    /// Load a catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let catalog = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        debug!("loaded {} templates from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Replace entries with those from `other`, keeping the rest
    pub fn overlay(mut self, other: Catalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Check the catalog covers every key the renderer can produce
    pub fn ensure_complete(&self) -> Result<(), CatalogError> {
        let missing: Vec<String> = TemplateKey::ALL
            .iter()
            .filter(|k| !self.entries.contains_key(k.as_str()))
            .map(|k| k.as_str().to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Incomplete(missing))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fill(
        &self,
        key: TemplateKey,
        count: Option<i64>,
        args: &[&str],
    ) -> Result<Filled, TemplateError> {
        let entry = self
            .entries
            .get(key.as_str())
            .ok_or(TemplateError::Missing(key))?;
        entry.select(count).fill(key, args)
    }
}

impl TemplateProvider for Catalog {
    fn lookup(&self, key: TemplateKey, args: &[&str]) -> Result<Filled, TemplateError> {
        self.fill(key, None, args)
    }

    fn lookup_counted(
        &self,
        key: TemplateKey,
        count: i64,
        args: &[&str],
    ) -> Result<Filled, TemplateError> {
        self.fill(key, Some(count), args)
    }
}
