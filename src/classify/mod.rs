//! Event classification
//!
//! Reduces an [`Event`] plus its context to a [`RenderCase`]: which sentence
//! shape to produce and exactly the data that sentence needs. Classification
//! is total and never fails; every event maps to one case, including
//! [`RenderCase::Nothing`].

mod pin;

pub use pin::{classify_pinned, clip_text, PinnedContent, CLIP_CHARS};

use tracing::debug;

use crate::context::{ContainerKind, RenderContext};
use crate::entity::EntityId;
use crate::event::{
    DiscardReason, Event, ExpiredMedia, SecondaryMessage, SecureValueType, TextEntity,
};

/// Whether the room is addressed as a channel or a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    Group,
    Channel,
}

/// Entities a directed membership action applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affected {
    /// Exactly one entity, styled as a mention
    One(EntityId),
    /// Several entities, named in one plain list
    Many(Vec<EntityId>),
}

impl Affected {
    fn from_slice(ids: &[EntityId]) -> Self {
        match ids {
            [one] => Affected::One(*one),
            _ => Affected::Many(ids.to_vec()),
        }
    }
}

/// Who a room change is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    /// Impersonal channel phrasing
    Channel,
    /// Impersonal group phrasing, for anonymous actors
    Group,
    Actor(EntityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoChange {
    Photo,
    Video,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSetting {
    /// Seconds until messages delete
    Set(i32),
    Removed,
}

/// Who an auto-delete notice is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAudience {
    /// Viewer changed the timer in a one-to-one chat
    You,
    /// The other side of a one-to-one chat changed it
    Peer(Option<EntityId>),
    Group,
    Channel,
    /// Viewer changed the timer in a secret chat
    SecretYou,
    Secret(Option<EntityId>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Incoming,
    Outgoing,
    Missed,
    Canceled,
}

/// Who hosts a group call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallHost {
    /// Posted as a channel; phrasing is impersonal
    Channel,
    Actor(Option<EntityId>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupCallCase {
    Scheduled {
        host: CallHost,
        at: i64,
        now: i64,
        utc_offset: i32,
    },
    Ended {
        duration: i32,
    },
    Started {
        host: CallHost,
    },
}

/// Labels for shared personal data, after collapsing document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureValueLabel {
    PersonalDetails,
    ProofOfIdentity,
    Address,
    ProofOfAddress,
    Phone,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    /// Viewer approached someone
    YouReached { to: EntityId, distance: i32 },
    /// Someone approached the viewer
    ReachedYou { from: EntityId, distance: i32 },
    Between {
        from: EntityId,
        to: EntityId,
        distance: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallInvite {
    /// The viewer is the only invitee
    ForYou,
    One(EntityId),
    Many(Vec<EntityId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub title: String,
    /// The bot that issued the invoice
    pub bot: EntityId,
}

/// Fully resolved sentence shape for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCase {
    /// Renders to no text at all
    Nothing,
    /// Renders to an empty sentence
    Blank,
    ChannelCreated,
    /// Short form for the chat list
    GroupCreated,
    GroupCreatedWithTitle {
        actor: Option<EntityId>,
        title: String,
    },
    Joined {
        actor: Option<EntityId>,
        room: RoomKind,
    },
    Left {
        actor: Option<EntityId>,
        room: RoomKind,
    },
    Invited {
        actor: Option<EntityId>,
        invitees: Affected,
    },
    Removed {
        actor: Option<EntityId>,
        removed: Affected,
    },
    PhotoChanged {
        by: Attribution,
        change: PhotoChange,
    },
    TitleChanged {
        by: Attribution,
        title: String,
    },
    Pinned {
        actor: Option<EntityId>,
        content: PinnedContent,
    },
    JoinedByLink {
        actor: Option<EntityId>,
    },
    AutoDeleteTimer {
        setting: TimerSetting,
        audience: TimerAudience,
    },
    Screenshot {
        /// `None` when the viewer took it
        taker: Option<EntityId>,
    },
    GameScore {
        actor: Option<EntityId>,
        by_viewer: bool,
        score: i32,
        game: Option<String>,
    },
    PaymentSent {
        amount: i64,
        currency: String,
        invoice: Option<Invoice>,
    },
    Call(CallOutcome),
    GroupCall(GroupCallCase),
    CustomText {
        text: String,
        entities: Vec<TextEntity>,
    },
    BotDomainGranted {
        domain: String,
    },
    SecureValuesSent {
        bot: EntityId,
        labels: Vec<SecureValueLabel>,
    },
    PeerJoined {
        actor: Option<EntityId>,
    },
    Proximity(Proximity),
    CallInvite {
        actor: Option<EntityId>,
        invite: CallInvite,
    },
    MediaExpired(ExpiredMedia),
}

/// Classify an event.
///
/// `secondary` is the message a pin, game score or payment refers to, if it
/// could be loaded.
pub fn classify(
    event: &Event,
    ctx: &RenderContext,
    secondary: Option<&SecondaryMessage>,
) -> RenderCase {
    let actor = ctx.actor_id();
    let room = if ctx.is_broadcast() {
        RoomKind::Channel
    } else {
        RoomKind::Group
    };

    match event {
        Event::GroupCreated { title } => {
            if ctx.is_broadcast() {
                RenderCase::ChannelCreated
            } else if ctx.for_chat_list {
                RenderCase::GroupCreated
            } else {
                RenderCase::GroupCreatedWithTitle {
                    actor,
                    title: title.clone(),
                }
            }
        }

        Event::MembersAdded { entities } => {
            if is_self_action(actor, entities) {
                RenderCase::Joined { actor, room }
            } else {
                RenderCase::Invited {
                    actor,
                    invitees: Affected::from_slice(entities),
                }
            }
        }

        Event::MembersRemoved { entities } => {
            if is_self_action(actor, entities) {
                RenderCase::Left { actor, room }
            } else {
                RenderCase::Removed {
                    actor,
                    removed: Affected::from_slice(entities),
                }
            }
        }

        Event::PhotoUpdated { image } => {
            let change = match image {
                Some(image) if image.has_video => PhotoChange::Video,
                Some(_) => PhotoChange::Photo,
                None => PhotoChange::Removed,
            };
            RenderCase::PhotoChanged {
                by: attribution(ctx),
                change,
            }
        }

        Event::TitleUpdated { title } => RenderCase::TitleChanged {
            by: attribution(ctx),
            title: title.clone(),
        },

        Event::MessagePinned => {
            if secondary.is_none() {
                debug!("pinned message unavailable, rendering as deleted");
            }
            RenderCase::Pinned {
                actor,
                content: classify_pinned(secondary),
            }
        }

        Event::JoinedByLink => RenderCase::JoinedByLink { actor },

        Event::Migrated => RenderCase::Blank,

        Event::AutoDeleteTimerChanged { timeout } => RenderCase::AutoDeleteTimer {
            setting: if *timeout > 0 {
                TimerSetting::Set(*timeout)
            } else {
                TimerSetting::Removed
            },
            audience: timer_audience(ctx),
        },

        Event::HistoryCleared | Event::PhoneNumberRequested | Event::Unknown => RenderCase::Nothing,

        Event::HistoryScreenshotTaken => RenderCase::Screenshot {
            taker: if ctx.incoming { actor } else { None },
        },

        Event::GameScore { score, .. } => RenderCase::GameScore {
            actor,
            by_viewer: ctx.actor_is_viewer(),
            score: *score,
            game: secondary.and_then(|m| m.game_title()).map(str::to_string),
        },

        Event::PaymentSent {
            currency,
            total_amount,
        } => RenderCase::PaymentSent {
            amount: *total_amount,
            currency: currency.clone(),
            invoice: secondary
                .and_then(|m| m.invoice_title())
                .map(|title| Invoice {
                    title: title.to_string(),
                    bot: ctx.chat,
                }),
        },

        Event::PhoneCall { discard_reason } => {
            RenderCase::Call(call_outcome(ctx.incoming, *discard_reason))
        }

        Event::GroupCall {
            scheduled_for,
            duration,
        } => {
            let host = if ctx.actor_is_channel() {
                CallHost::Channel
            } else {
                CallHost::Actor(actor)
            };
            let case = match (scheduled_for, duration) {
                (Some(at), _) => GroupCallCase::Scheduled {
                    host,
                    at: *at,
                    now: ctx.now,
                    utc_offset: ctx.utc_offset,
                },
                (None, Some(duration)) => GroupCallCase::Ended {
                    duration: *duration,
                },
                (None, None) => GroupCallCase::Started { host },
            };
            RenderCase::GroupCall(case)
        }

        Event::CustomText { text, entities } => RenderCase::CustomText {
            text: text.clone(),
            entities: entities.clone(),
        },

        Event::BotDomainGranted { domain } => RenderCase::BotDomainGranted {
            domain: domain.clone(),
        },

        Event::BotSentSecureValues { values } => RenderCase::SecureValuesSent {
            bot: ctx.chat,
            labels: secure_value_labels(values),
        },

        Event::PeerJoined => RenderCase::PeerJoined { actor },

        Event::ProximityReached { from, to, distance } => {
            let distance = *distance;
            RenderCase::Proximity(if *from == ctx.viewer {
                Proximity::YouReached { to: *to, distance }
            } else if *to == ctx.viewer {
                Proximity::ReachedYou {
                    from: *from,
                    distance,
                }
            } else {
                Proximity::Between {
                    from: *from,
                    to: *to,
                    distance,
                }
            })
        }

        Event::InviteToCall { entities } => RenderCase::CallInvite {
            actor,
            invite: match entities.as_slice() {
                [one] if *one == ctx.viewer => CallInvite::ForYou,
                [one] => CallInvite::One(*one),
                _ => CallInvite::Many(entities.clone()),
            },
        },

        Event::ExpiredMedia { media } => RenderCase::MediaExpired(*media),
    }
}

/// The actor is the first affected entity
fn is_self_action(actor: Option<EntityId>, affected: &[EntityId]) -> bool {
    matches!((actor, affected.first()), (Some(actor), Some(first)) if actor == *first)
}

fn attribution(ctx: &RenderContext) -> Attribution {
    match ctx.actor_id() {
        _ if ctx.is_broadcast() => Attribution::Channel,
        Some(id) if !ctx.actor_is_anonymous() => Attribution::Actor(id),
        _ => Attribution::Group,
    }
}

fn timer_audience(ctx: &RenderContext) -> TimerAudience {
    match ctx.container {
        ContainerKind::User if ctx.actor_is_viewer() => TimerAudience::You,
        ContainerKind::User => TimerAudience::Peer(ctx.actor_id()),
        ContainerKind::Group | ContainerKind::Supergroup => TimerAudience::Group,
        ContainerKind::BroadcastChannel => TimerAudience::Channel,
        ContainerKind::SecretChat if ctx.actor_is_viewer() => TimerAudience::SecretYou,
        ContainerKind::SecretChat => TimerAudience::Secret(ctx.actor_id()),
    }
}

/// Base phrasing from direction, then overridden by the discard reason
fn call_outcome(incoming: bool, reason: Option<DiscardReason>) -> CallOutcome {
    let base = if incoming {
        CallOutcome::Incoming
    } else {
        CallOutcome::Outgoing
    };

    match reason {
        Some(DiscardReason::Disconnect) => CallOutcome::Canceled,
        Some(DiscardReason::Missed | DiscardReason::Busy) if incoming => CallOutcome::Missed,
        Some(DiscardReason::Missed | DiscardReason::Busy) => CallOutcome::Canceled,
        Some(DiscardReason::Hangup) | None => base,
    }
}

/// Identity documents and address proofs each collapse to one label
fn secure_value_labels(values: &[SecureValueType]) -> Vec<SecureValueLabel> {
    let mut labels = Vec::with_capacity(values.len());
    let mut has_identity = false;
    let mut has_address_proof = false;

    for value in values {
        let label = match value {
            SecureValueType::PersonalDetails => SecureValueLabel::PersonalDetails,
            SecureValueType::Passport
            | SecureValueType::InternalPassport
            | SecureValueType::DriversLicense
            | SecureValueType::IdCard => {
                if has_identity {
                    continue;
                }
                has_identity = true;
                SecureValueLabel::ProofOfIdentity
            }
            SecureValueType::Address => SecureValueLabel::Address,
            SecureValueType::BankStatement
            | SecureValueType::UtilityBill
            | SecureValueType::RentalAgreement
            | SecureValueType::PassportRegistration
            | SecureValueType::TemporaryRegistration => {
                if has_address_proof {
                    continue;
                }
                has_address_proof = true;
                SecureValueLabel::ProofOfAddress
            }
            SecureValueType::Phone => SecureValueLabel::Phone,
            SecureValueType::Email => SecureValueLabel::Email,
        };
        labels.push(label);
    }

    labels
}
