//! Service events and the content they may reference
//!
//! Raw data with no formatting. An [`Event`] is built once per render from the
//! caller's message snapshot and never mutated.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// A system-generated chat notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    GroupCreated {
        title: String,
    },
    MembersAdded {
        entities: Vec<EntityId>,
    },
    MembersRemoved {
        entities: Vec<EntityId>,
    },
    PhotoUpdated {
        #[serde(default)]
        image: Option<Image>,
    },
    TitleUpdated {
        title: String,
    },
    /// The pinned message itself travels as the secondary message
    MessagePinned,
    JoinedByLink,
    /// Group upgraded to a channel, or the channel side of that upgrade
    Migrated,
    AutoDeleteTimerChanged {
        /// Seconds; zero disables the timer
        timeout: i32,
    },
    HistoryCleared,
    HistoryScreenshotTaken,
    GameScore {
        game_id: i64,
        score: i32,
    },
    PaymentSent {
        currency: String,
        /// Amount in the currency's minor units
        total_amount: i64,
    },
    PhoneCall {
        #[serde(default)]
        discard_reason: Option<DiscardReason>,
    },
    GroupCall {
        /// Unix timestamp the call is scheduled for
        #[serde(default)]
        scheduled_for: Option<i64>,
        /// Seconds the call lasted, once ended
        #[serde(default)]
        duration: Option<i32>,
    },
    CustomText {
        text: String,
        #[serde(default)]
        entities: Vec<TextEntity>,
    },
    BotDomainGranted {
        domain: String,
    },
    BotSentSecureValues {
        values: Vec<SecureValueType>,
    },
    PeerJoined,
    PhoneNumberRequested,
    ProximityReached {
        from: EntityId,
        to: EntityId,
        /// Metres
        distance: i32,
    },
    InviteToCall {
        entities: Vec<EntityId>,
    },
    Unknown,
    ExpiredMedia {
        media: ExpiredMedia,
    },
}

/// A still image, possibly with an animated video representation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub has_video: bool,
}

/// Why a one-to-one call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    Missed,
    Disconnect,
    Hangup,
    Busy,
}

/// What self-destructing media expired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiredMedia {
    Image,
    File,
}

/// Personal data a user shared with a bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecureValueType {
    PersonalDetails,
    Passport,
    InternalPassport,
    DriversLicense,
    IdCard,
    Address,
    BankStatement,
    UtilityBill,
    RentalAgreement,
    PassportRegistration,
    TemporaryRegistration,
    Phone,
    Email,
}

/// Formatting span inside custom service text, in chars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntity {
    pub offset: usize,
    pub length: usize,
    #[serde(flatten)]
    pub kind: TextEntityKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextEntityKind {
    Bold,
    Italic,
    Code,
    Url,
    TextUrl { url: String },
    Mention,
    TextMention { entity: EntityId },
    Hashtag,
}

/// The message a pin, score or payment event refers to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl SecondaryMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Title of the first game attached
    pub fn game_title(&self) -> Option<&str> {
        self.attachments.iter().find_map(|a| match a {
            Attachment::Game { title } => Some(title.as_str()),
            _ => None,
        })
    }

    /// Title of the last invoice attached
    pub fn invoice_title(&self) -> Option<&str> {
        self.attachments.iter().rev().find_map(|a| match a {
            Attachment::Invoice { title } => Some(title.as_str()),
            _ => None,
        })
    }
}

/// Content attached to a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Attachment {
    Game { title: String },
    Photo(Image),
    File(File),
    Location,
    Contact,
    Poll { kind: PollKind },
    Invoice { title: String },
    Other,
}

/// A document, including videos, voice notes, stickers and GIFs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Set for GIF-style looping animations
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub attributes: Vec<FileAttribute>,
}

impl File {
    pub fn with(mut self, attribute: FileAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileAttribute {
    Video {
        #[serde(default)]
        round: bool,
    },
    Audio {
        #[serde(default)]
        voice: bool,
    },
    Sticker,
    Animated,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollKind {
    #[default]
    Poll,
    Quiz,
}
