//! Localized templates
//!
//! A [`TemplateProvider`] owns locale phrasing and word order. The renderer
//! hands it a key plus ordered arguments and gets back the filled text along
//! with the char range each argument landed on. Locales may reorder or drop
//! arguments, so the ranges are the only reliable way to find them again.

mod catalog;
mod keys;

pub use catalog::Catalog;
pub use keys::TemplateKey;

use std::ops::Range;

use crate::error::TemplateError;

/// Where one argument landed in filled text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentRange {
    /// Position in the argument list passed to the provider
    pub index: usize,
    /// Char range in [`Filled::text`]
    pub range: Range<usize>,
}

/// A filled template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filled {
    pub text: String,
    /// One entry per placeholder occurrence, in output order
    pub ranges: Vec<ArgumentRange>,
}

/// Source of localized phrasing.
///
/// Must be total over [`TemplateKey::ALL`] and safe for concurrent read-only use.
/// Ranges are counted in chars, the same scheme the renderer slices with.
pub trait TemplateProvider: Send + Sync {
    fn lookup(&self, key: TemplateKey, args: &[&str]) -> Result<Filled, TemplateError>;

    /// Lookup selecting a plural form for `count`
    fn lookup_counted(
        &self,
        key: TemplateKey,
        count: i64,
        args: &[&str],
    ) -> Result<Filled, TemplateError> {
        let _ = count;
        self.lookup(key, args)
    }
}
