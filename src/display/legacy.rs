//! Raw token splicing for templates that predate argument ranges
//!
//! Game score and payment templates carry literal `{name}`, `{game}`,
//! `{amount}` and `{title}` tokens instead of placeholders. They are found by
//! substring search and replaced here, while tracking where each replacement
//! landed. Nothing else should use this path.

use crate::error::RenderError;
use crate::template::{TemplateKey, TemplateProvider};

use super::styles::{RenderResult, StyleRole, StyledRange};

/// One token to replace, with its replacement and role
pub struct Splice<'a> {
    pub token: &'static str,
    pub value: &'a str,
    pub role: StyleRole,
}

/// Fill a game score template.
///
/// The tokens are located in the template first and replaced in the order they
/// appear in it, so a locale may put the game before the name.
pub fn game_score(
    templates: &dyn TemplateProvider,
    key: TemplateKey,
    score: i32,
    splices: &[Splice<'_>],
) -> Result<RenderResult, RenderError> {
    let value = score.to_string();
    let base = templates
        .lookup_counted(key, i64::from(score), &[&value])?
        .text;

    let mut found: Vec<(usize, &Splice<'_>)> = splices
        .iter()
        .filter_map(|splice| base.find(splice.token).map(|at| (at, splice)))
        .collect();
    found.sort_by_key(|(at, _)| *at);

    let mut text = String::with_capacity(base.len());
    let mut ranges = Vec::new();
    let mut consumed = 0;

    for (at, splice) in found {
        // A token nested inside an earlier one was already consumed
        if at < consumed {
            continue;
        }
        text.push_str(&base[consumed..at]);
        let start = text.chars().count();
        text.push_str(splice.value);
        push_styled(&mut ranges, start..text.chars().count(), splice.role);
        consumed = at + splice.token.len();
    }
    text.push_str(&base[consumed..]);

    Ok(RenderResult { text, ranges })
}

/// Fill the payment template.
///
/// Each token is replaced in turn in the evolving text. Earlier ranges shift
/// when a later replacement lands before them, and a token is never matched
/// inside text that was already spliced in.
pub fn payment(
    templates: &dyn TemplateProvider,
    splices: &[Splice<'_>],
) -> Result<RenderResult, RenderError> {
    let mut text = templates.lookup(TemplateKey::PaymentSentTo, &[])?.text;
    let mut spliced: Vec<std::ops::Range<usize>> = Vec::new();
    let mut ranges: Vec<StyledRange> = Vec::new();

    for splice in splices {
        let Some((at, start)) = find_outside(&text, splice.token, &spliced) else {
            continue;
        };

        let token_chars = splice.token.chars().count();
        let value_chars = splice.value.chars().count();
        text.replace_range(at..at + splice.token.len(), splice.value);

        let shift = |range: &mut std::ops::Range<usize>| {
            if range.start >= start + token_chars {
                range.start = range.start - token_chars + value_chars;
                range.end = range.end - token_chars + value_chars;
            }
        };
        spliced.iter_mut().for_each(shift);
        ranges.iter_mut().for_each(|styled| shift(&mut styled.range));

        spliced.push(start..start + value_chars);
        push_styled(&mut ranges, start..start + value_chars, splice.role);
    }

    ranges.sort_by_key(|styled| styled.range.start);
    Ok(RenderResult { text, ranges })
}

/// First occurrence of `token` not overlapping an already spliced char range.
/// Returns the byte offset and the char offset.
fn find_outside(
    text: &str,
    token: &str,
    spliced: &[std::ops::Range<usize>],
) -> Option<(usize, usize)> {
    let token_chars = token.chars().count();
    text.match_indices(token).find_map(|(at, _)| {
        let start = text[..at].chars().count();
        let end = start + token_chars;
        let clear = spliced.iter().all(|r| end <= r.start || start >= r.end);
        clear.then_some((at, start))
    })
}

fn push_styled(ranges: &mut Vec<StyledRange>, range: std::ops::Range<usize>, role: StyleRole) {
    if role != StyleRole::Body && !range.is_empty() {
        ranges.push(StyledRange::new(range, role));
    }
}
