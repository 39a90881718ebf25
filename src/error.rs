//! Error types for servicetext

use std::ops::Range;

use thiserror::Error;

use crate::template::TemplateKey;

/// Errors raised by a template provider while filling a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The provider has no entry for the key
    #[error("template not found: {0}")]
    Missing(TemplateKey),

    /// The template references an argument that was not supplied
    #[error("template {key} references argument {index} but only {supplied} were supplied")]
    MissingArgument {
        key: TemplateKey,
        index: usize,
        supplied: usize,
    },
}

/// Errors raised while loading a locale catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file is not valid TOML or has the wrong shape
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// A template has a broken placeholder
    #[error("malformed template {key}: {reason}")]
    Malformed { key: String, reason: String },

    /// A plural table has no `other` form
    #[error("plural entry {0} has no `other` form")]
    MissingPluralOther(String),

    /// Keys the renderer can produce but the catalog lacks
    #[error("catalog is missing {} template(s): {}", .0.len(), .0.join(", "))]
    Incomplete(Vec<String>),
}

/// Fatal rendering errors.
///
/// These indicate a contract violation between the renderer and its
/// template provider. Callers should show no service text at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Provider failed to fill the template
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Provider reported a range for an argument index that does not exist
    #[error("template {key} reported a range for unknown argument {index}")]
    UnknownArgument { key: TemplateKey, index: usize },

    /// Provider reported a range outside the filled text
    #[error("template {key} reported range {range:?} outside text of {len} chars")]
    RangeOutOfBounds {
        key: TemplateKey,
        range: Range<usize>,
        len: usize,
    },

    /// Provider reported ranges that overlap each other
    #[error("template {key} reported overlapping ranges {first:?} and {second:?}")]
    OverlappingRanges {
        key: TemplateKey,
        first: Range<usize>,
        second: Range<usize>,
    },
}
