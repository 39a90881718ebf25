//! What a pinned message contains
//!
//! Priority: a game anywhere wins. Otherwise the first attachment that says
//! what the message is decides. Messages with no telling attachment are text.

use crate::event::{Attachment, File, FileAttribute, PollKind, SecondaryMessage};

/// Text longer than this many chars is clipped
pub const CLIP_CHARS: usize = 14;

/// Resolved kind of the pinned message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinnedContent {
    /// Clipped, single-line text; may be empty
    Text(String),
    Game,
    Photo,
    Video,
    Round,
    /// Voice note
    Audio,
    /// Generic document, including regular audio files
    File,
    Gif,
    Sticker,
    Location,
    Contact,
    Poll,
    Quiz,
    /// The pinned message no longer exists
    Deleted,
}

/// Classify the content of a pinned message
pub fn classify_pinned(message: Option<&SecondaryMessage>) -> PinnedContent {
    let Some(message) = message else {
        return PinnedContent::Deleted;
    };

    if message
        .attachments
        .iter()
        .any(|a| matches!(a, Attachment::Game { .. }))
    {
        return PinnedContent::Game;
    }

    message
        .attachments
        .iter()
        .find_map(attachment_kind)
        .unwrap_or_else(|| PinnedContent::Text(clip_text(&message.text)))
}

fn attachment_kind(attachment: &Attachment) -> Option<PinnedContent> {
    match attachment {
        Attachment::Game { .. } => Some(PinnedContent::Game),
        Attachment::Photo(_) => Some(PinnedContent::Photo),
        Attachment::File(file) => Some(file_kind(file)),
        Attachment::Location => Some(PinnedContent::Location),
        Attachment::Contact => Some(PinnedContent::Contact),
        Attachment::Poll { kind: PollKind::Poll } => Some(PinnedContent::Poll),
        Attachment::Poll { kind: PollKind::Quiz } => Some(PinnedContent::Quiz),
        Attachment::Invoice { .. } | Attachment::Other => None,
    }
}

fn file_kind(file: &File) -> PinnedContent {
    if file.animated {
        return PinnedContent::Gif;
    }

    file.attributes
        .iter()
        .find_map(|attribute| match attribute {
            FileAttribute::Video { round: true } => Some(PinnedContent::Round),
            FileAttribute::Video { round: false } => Some(PinnedContent::Video),
            FileAttribute::Audio { voice: true } => Some(PinnedContent::Audio),
            FileAttribute::Audio { voice: false } => Some(PinnedContent::File),
            FileAttribute::Sticker => Some(PinnedContent::Sticker),
            FileAttribute::Animated | FileAttribute::Other => None,
        })
        .unwrap_or(PinnedContent::File)
}

/// Collapse newlines to spaces, then clip to [`CLIP_CHARS`] chars plus "..."
pub fn clip_text(text: &str) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() > CLIP_CHARS {
        let mut clipped: String = single_line.chars().take(CLIP_CHARS).collect();
        clipped.push_str("...");
        clipped
    } else {
        single_line
    }
}
