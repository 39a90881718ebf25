//! Rendering classified events into styled text
//!
//! A [`RenderCase`] is planned into a sentence: a template key plus ordered
//! argument slots, each with a role. The provider fills the template and
//! reports where each argument landed; those ranges are checked and turned
//! into [`StyledRange`]s.

use std::ops::Range;

use tracing::{debug, warn};

use crate::classify::{
    self, Affected, Attribution, CallHost, CallInvite, CallOutcome, GroupCallCase, PhotoChange,
    PinnedContent, Proximity, RenderCase, RoomKind, SecureValueLabel, TimerAudience, TimerSetting,
};
use crate::context::RenderContext;
use crate::entity::{EntityDirectory, EntityId, NameOrder};
use crate::error::RenderError;
use crate::event::{Event, ExpiredMedia, SecondaryMessage, TextEntity, TextEntityKind};
use crate::humanize::{self, Clock, Day};
use crate::template::{ArgumentRange, TemplateKey, TemplateProvider};

use super::legacy::{self, Splice};
use super::styles::{RenderResult, StyleRole, StyledRange};

/// How an argument slot is styled once its range is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Body,
    /// Styled as a mention; without an entity it degrades to bold
    Mention(Option<EntityId>),
}

impl SlotRole {
    fn style(self) -> Option<StyleRole> {
        match self {
            SlotRole::Body => None,
            SlotRole::Mention(None) => Some(StyleRole::BoldPlain),
            SlotRole::Mention(Some(id)) => Some(StyleRole::Mention(id)),
        }
    }
}

#[derive(Debug)]
struct Slot {
    value: String,
    role: SlotRole,
}

/// Template key plus its argument slots, in template argument order
#[derive(Debug)]
struct Sentence {
    key: TemplateKey,
    slots: Vec<Slot>,
}

impl Sentence {
    fn new(key: TemplateKey) -> Self {
        Self {
            key,
            slots: Vec::new(),
        }
    }

    fn arg(mut self, value: impl Into<String>, role: SlotRole) -> Self {
        self.slots.push(Slot {
            value: value.into(),
            role,
        });
        self
    }

    fn body(self, value: impl Into<String>) -> Self {
        self.arg(value, SlotRole::Body)
    }
}

enum Plan {
    Nothing,
    Sentence(Sentence),
    Done(RenderResult),
}

/// Renders service events against a template provider and entity directory.
///
/// Holds only shared references and settings, so one renderer can serve any
/// number of threads.
pub struct Renderer<'t, 'd> {
    templates: &'t dyn TemplateProvider,
    directory: &'d dyn EntityDirectory,
    name_order: NameOrder,
    clock: Clock,
}

impl<'t, 'd> Renderer<'t, 'd> {
    pub fn new(templates: &'t dyn TemplateProvider, directory: &'d dyn EntityDirectory) -> Self {
        Self {
            templates,
            directory,
            name_order: NameOrder::default(),
            clock: Clock::default(),
        }
    }

    pub fn name_order(mut self, order: NameOrder) -> Self {
        self.name_order = order;
        self
    }

    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Classify and render an event in one step
    pub fn render_event(
        &self,
        event: &Event,
        ctx: &RenderContext,
        secondary: Option<&SecondaryMessage>,
    ) -> Result<Option<RenderResult>, RenderError> {
        self.render(&classify::classify(event, ctx, secondary))
    }

    /// Render a classified case. `Ok(None)` means the event shows no text.
    pub fn render(&self, case: &RenderCase) -> Result<Option<RenderResult>, RenderError> {
        match self.plan(case)? {
            Plan::Nothing => Ok(None),
            Plan::Done(result) => Ok(Some(result)),
            Plan::Sentence(sentence) => self.fill(&sentence).map(Some),
        }
    }

    fn plan(&self, case: &RenderCase) -> Result<Plan, RenderError> {
        use TemplateKey as K;

        let sentence = match case {
            RenderCase::Nothing => return Ok(Plan::Nothing),
            RenderCase::Blank => return Ok(Plan::Done(RenderResult::default())),

            RenderCase::ChannelCreated => Sentence::new(K::CreatedChannel),
            RenderCase::GroupCreated => Sentence::new(K::CreatedGroup),
            RenderCase::GroupCreatedWithTitle { actor, title } => {
                self.with_actor(K::CreatedChatWithTitle, *actor).body(title)
            }

            RenderCase::Joined { actor, room } => {
                let key = match room {
                    RoomKind::Channel => K::JoinedChannel,
                    RoomKind::Group => K::JoinedChat,
                };
                self.with_actor(key, *actor)
            }
            RenderCase::Left { actor, room } => {
                let key = match room {
                    RoomKind::Channel => K::LeftChannel,
                    RoomKind::Group => K::LeftChat,
                };
                self.with_actor(key, *actor)
            }

            RenderCase::Invited { actor, invitees } => match invitees {
                Affected::One(id) => self.with_actor(K::Invited, *actor).arg(
                    self.name(*id),
                    SlotRole::Mention(Some(*id)),
                ),
                Affected::Many(ids) => self
                    .with_actor(K::InvitedMultiple, *actor)
                    .body(self.list(ids)),
            },
            RenderCase::Removed { actor, removed } => match removed {
                Affected::One(id) => self
                    .with_actor(K::Kicked, *actor)
                    .arg(self.name(*id), SlotRole::Mention(Some(*id))),
                Affected::Many(ids) => self.with_actor(K::Kicked, *actor).body(self.list(ids)),
            },

            RenderCase::PhotoChanged { by, change } => match (by, change) {
                (Attribution::Channel, PhotoChange::Video) => Sentence::new(K::ChannelVideoUpdated),
                (Attribution::Channel, PhotoChange::Photo) => Sentence::new(K::ChannelPhotoUpdated),
                (Attribution::Channel, PhotoChange::Removed) => {
                    Sentence::new(K::ChannelPhotoRemoved)
                }
                (Attribution::Group, PhotoChange::Video) => Sentence::new(K::GroupVideoUpdated),
                (Attribution::Group, PhotoChange::Photo) => Sentence::new(K::GroupPhotoUpdated),
                (Attribution::Group, PhotoChange::Removed) => Sentence::new(K::GroupPhotoRemoved),
                (Attribution::Actor(id), change) => {
                    let key = match change {
                        PhotoChange::Video => K::ChangedGroupVideo,
                        PhotoChange::Photo => K::ChangedGroupPhoto,
                        PhotoChange::Removed => K::RemovedGroupPhoto,
                    };
                    self.with_actor(key, Some(*id))
                }
            },

            RenderCase::TitleChanged { by, title } => match by {
                Attribution::Channel | Attribution::Group => {
                    Sentence::new(K::ChannelTitleUpdated).body(title)
                }
                Attribution::Actor(id) => self.with_actor(K::ChangedGroupName, Some(*id)).body(title),
            },

            RenderCase::Pinned { actor, content } => {
                let key = match content {
                    PinnedContent::Text(text) if !text.is_empty() => {
                        return Ok(Plan::Sentence(
                            self.with_actor(K::PinnedText, *actor).body(text),
                        ));
                    }
                    PinnedContent::Text(_) | PinnedContent::Deleted => K::PinnedGeneric,
                    PinnedContent::Game => K::PinnedGame,
                    PinnedContent::Photo => K::PinnedPhoto,
                    PinnedContent::Video => K::PinnedVideo,
                    PinnedContent::Round => K::PinnedRound,
                    PinnedContent::Audio => K::PinnedAudio,
                    PinnedContent::File => K::PinnedDocument,
                    PinnedContent::Gif => K::PinnedAnimation,
                    PinnedContent::Sticker => K::PinnedSticker,
                    PinnedContent::Location => K::PinnedLocation,
                    PinnedContent::Contact => K::PinnedContact,
                    PinnedContent::Poll => K::PinnedPoll,
                    PinnedContent::Quiz => K::PinnedQuiz,
                };
                self.with_actor(key, *actor)
            }

            RenderCase::JoinedByLink { actor } => self.with_actor(K::JoinedGroupByLink, *actor),

            RenderCase::AutoDeleteTimer { setting, audience } => {
                self.timer_sentence(*setting, *audience)?
            }

            RenderCase::Screenshot { taker } => match taker {
                Some(id) => Sentence::new(K::Screenshot).body(self.compact(*id)),
                None => Sentence::new(K::ScreenshotSelf),
            },

            RenderCase::GameScore {
                actor,
                by_viewer,
                score,
                game,
            } => {
                let key = match (by_viewer, game.is_some()) {
                    (true, true) => K::GameScoreSelfExtended,
                    (true, false) => K::GameScoreSelfSimple,
                    (false, true) => K::GameScoreExtended,
                    (false, false) => K::GameScoreSimple,
                };
                let name = actor.map(|id| self.name(id)).unwrap_or_default();
                let splices = [
                    Splice {
                        token: "{name}",
                        value: &name,
                        role: SlotRole::Mention(*actor).style().unwrap_or(StyleRole::BoldPlain),
                    },
                    Splice {
                        token: "{game}",
                        value: game.as_deref().unwrap_or_default(),
                        role: StyleRole::BoldPlain,
                    },
                ];
                debug!(key = %key, "splicing game score template");
                return legacy::game_score(self.templates, key, *score, &splices).map(Plan::Done);
            }

            RenderCase::PaymentSent {
                amount,
                currency,
                invoice,
            } => {
                let amount = humanize::currency_amount(*amount, currency);
                match invoice {
                    Some(invoice) => {
                        let bot = self.compact(invoice.bot);
                        let splices = [
                            Splice {
                                token: "{amount}",
                                value: &amount,
                                role: StyleRole::BoldPlain,
                            },
                            Splice {
                                token: "{name}",
                                value: &bot,
                                role: StyleRole::BoldPlain,
                            },
                            Splice {
                                token: "{title}",
                                value: &invoice.title,
                                role: StyleRole::Body,
                            },
                        ];
                        debug!(key = %K::PaymentSentTo, "splicing payment template");
                        return legacy::payment(self.templates, &splices).map(Plan::Done);
                    }
                    None => Sentence::new(K::PaymentSent).body(amount),
                }
            }

            RenderCase::Call(outcome) => Sentence::new(match outcome {
                CallOutcome::Incoming => K::CallIncoming,
                CallOutcome::Outgoing => K::CallOutgoing,
                CallOutcome::Missed => K::CallMissed,
                CallOutcome::Canceled => K::CallCanceled,
            }),

            RenderCase::GroupCall(call) => self.group_call_sentence(call)?,

            RenderCase::CustomText { text, entities } => {
                return Ok(Plan::Done(custom_text(text, entities)));
            }

            RenderCase::BotDomainGranted { domain } => {
                Sentence::new(K::BotDomainGranted).body(domain)
            }

            RenderCase::SecureValuesSent { bot, labels } => {
                let mut names = Vec::with_capacity(labels.len());
                for label in labels {
                    names.push(self.templates.lookup(label_key(*label), &[])?.text);
                }
                Sentence::new(K::PassportValuesSent)
                    .body(self.compact(*bot))
                    .body(names.join(", "))
            }

            RenderCase::PeerJoined { actor } => self.with_actor(K::PeerJoined, *actor),

            RenderCase::Proximity(proximity) => match proximity {
                Proximity::YouReached { to, distance } => Sentence::new(K::ProximityYouReached)
                    .body(humanize::distance(self.templates, *distance)?)
                    .arg(self.name(*to), SlotRole::Mention(Some(*to))),
                Proximity::ReachedYou { from, distance } => Sentence::new(K::ProximityReachedYou)
                    .arg(self.name(*from), SlotRole::Mention(Some(*from)))
                    .body(humanize::distance(self.templates, *distance)?),
                Proximity::Between { from, to, distance } => Sentence::new(K::ProximityReached)
                    .arg(self.name(*from), SlotRole::Mention(Some(*from)))
                    .body(humanize::distance(self.templates, *distance)?)
                    .arg(self.name(*to), SlotRole::Mention(Some(*to))),
            },

            RenderCase::CallInvite { actor, invite } => match invite {
                CallInvite::ForYou => self.with_actor(K::VoiceChatInvitationForYou, *actor),
                CallInvite::One(id) => self
                    .with_actor(K::VoiceChatInvitation, *actor)
                    .arg(self.name(*id), SlotRole::Mention(Some(*id))),
                CallInvite::Many(ids) => self
                    .with_actor(K::VoiceChatInvitationMultiple, *actor)
                    .body(self.list(ids)),
            },

            RenderCase::MediaExpired(media) => Sentence::new(match media {
                ExpiredMedia::Image => K::ImageExpired,
                ExpiredMedia::File => K::VideoExpired,
            }),
        };

        Ok(Plan::Sentence(sentence))
    }

    fn timer_sentence(
        &self,
        setting: TimerSetting,
        audience: TimerAudience,
    ) -> Result<Sentence, RenderError> {
        use TemplateKey as K;

        let author = |id: Option<EntityId>| id.map(|id| self.compact(id)).unwrap_or_default();

        let sentence = match setting {
            TimerSetting::Set(seconds) => {
                let interval = humanize::time_interval(self.templates, seconds, true)?;
                match audience {
                    TimerAudience::You => Sentence::new(K::TimerSetUserYou).body(interval),
                    TimerAudience::Peer(id) => {
                        Sentence::new(K::TimerSetUser).body(author(id)).body(interval)
                    }
                    TimerAudience::Group => Sentence::new(K::TimerSetGroup).body(interval),
                    TimerAudience::Channel => Sentence::new(K::TimerSetChannel).body(interval),
                    TimerAudience::SecretYou => {
                        Sentence::new(K::LifetimeChangedOutgoing).body(interval)
                    }
                    TimerAudience::Secret(id) => Sentence::new(K::LifetimeChanged)
                        .body(author(id))
                        .body(interval),
                }
            }
            TimerSetting::Removed => match audience {
                TimerAudience::You => Sentence::new(K::TimerRemovedUserYou),
                TimerAudience::Peer(id) => Sentence::new(K::TimerRemovedUser).body(author(id)),
                TimerAudience::Group => Sentence::new(K::TimerRemovedGroup),
                TimerAudience::Channel => Sentence::new(K::TimerRemovedChannel),
                TimerAudience::SecretYou => Sentence::new(K::LifetimeRemovedOutgoing),
                TimerAudience::Secret(id) => Sentence::new(K::LifetimeRemoved).body(author(id)),
            },
        };

        Ok(sentence)
    }

    fn group_call_sentence(&self, call: &GroupCallCase) -> Result<Sentence, RenderError> {
        use TemplateKey as K;

        let sentence = match *call {
            GroupCallCase::Scheduled {
                host,
                at,
                now,
                utc_offset,
            } => {
                let moment = humanize::moment(at, now, utc_offset, self.clock);
                match host {
                    CallHost::Channel => match moment.day {
                        Day::Today => Sentence::new(K::VoiceChatScheduledTodayChannel).body(moment.time),
                        Day::Tomorrow => {
                            Sentence::new(K::VoiceChatScheduledTomorrowChannel).body(moment.time)
                        }
                        Day::Yesterday | Day::Other => {
                            let when = self
                                .templates
                                .lookup(K::DateAt, &[&moment.date, &moment.time])?
                                .text;
                            Sentence::new(K::VoiceChatScheduledChannel).body(when)
                        }
                    },
                    CallHost::Actor(actor) => self
                        .with_actor(K::VoiceChatScheduled, actor)
                        .body(humanize::timestamp(self.templates, &moment)?),
                }
            }
            GroupCallCase::Ended { duration } => Sentence::new(K::VoiceChatEnded)
                .body(humanize::call_duration(self.templates, duration)?),
            GroupCallCase::Started {
                host: CallHost::Channel,
            } => Sentence::new(K::VoiceChatStartedChannel),
            GroupCallCase::Started {
                host: CallHost::Actor(actor),
            } => self.with_actor(K::VoiceChatStarted, actor),
        };

        Ok(sentence)
    }

    /// Sentence whose first argument is the actor mention
    fn with_actor(&self, key: TemplateKey, actor: Option<EntityId>) -> Sentence {
        let name = match actor {
            Some(id) => self.name(id),
            None => {
                warn!(key = %key, "no actor for attributed template, using empty name");
                String::new()
            }
        };
        Sentence::new(key).arg(name, SlotRole::Mention(actor))
    }

    fn name(&self, id: EntityId) -> String {
        self.directory
            .display_name(id, self.name_order)
            .unwrap_or_else(|| {
                debug!(%id, "no display name");
                String::new()
            })
    }

    fn compact(&self, id: EntityId) -> String {
        self.directory.compact_name(id).unwrap_or_else(|| {
            debug!(%id, "no compact name");
            String::new()
        })
    }

    /// Resolved names joined with ", "; unknown entities are left out
    fn list(&self, ids: &[EntityId]) -> String {
        ids.iter()
            .filter_map(|id| self.directory.display_name(*id, self.name_order))
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn fill(&self, sentence: &Sentence) -> Result<RenderResult, RenderError> {
        let args: Vec<&str> = sentence.slots.iter().map(|s| s.value.as_str()).collect();
        debug!(key = %sentence.key, args = args.len(), "filling service template");

        let filled = self.templates.lookup(sentence.key, &args)?;

        let reported = validate(sentence, filled.text.chars().count(), filled.ranges)?;
        let ranges = reported
            .into_iter()
            .filter(|arg| !arg.range.is_empty())
            .filter_map(|arg| {
                sentence.slots[arg.index]
                    .role
                    .style()
                    .map(|role| StyledRange::new(arg.range, role))
            })
            .collect();

        Ok(RenderResult {
            text: filled.text,
            ranges,
        })
    }
}

/// Check provider ranges against the sentence and text, sorted by start
fn validate(
    sentence: &Sentence,
    len: usize,
    mut reported: Vec<ArgumentRange>,
) -> Result<Vec<ArgumentRange>, RenderError> {
    reported.sort_by_key(|arg| (arg.range.start, arg.range.end));

    let mut previous: Option<&Range<usize>> = None;
    for arg in &reported {
        if arg.index >= sentence.slots.len() {
            return Err(RenderError::UnknownArgument {
                key: sentence.key,
                index: arg.index,
            });
        }
        if arg.range.start > arg.range.end || arg.range.end > len {
            return Err(RenderError::RangeOutOfBounds {
                key: sentence.key,
                range: arg.range.clone(),
                len,
            });
        }
        if let Some(prev) = previous {
            if prev.end > arg.range.start {
                return Err(RenderError::OverlappingRanges {
                    key: sentence.key,
                    first: prev.clone(),
                    second: arg.range.clone(),
                });
            }
        }
        previous = Some(&arg.range);
    }

    Ok(reported)
}

fn label_key(label: SecureValueLabel) -> TemplateKey {
    match label {
        SecureValueLabel::PersonalDetails => TemplateKey::PassportPersonalDetails,
        SecureValueLabel::ProofOfIdentity => TemplateKey::PassportProofOfIdentity,
        SecureValueLabel::Address => TemplateKey::PassportAddress,
        SecureValueLabel::ProofOfAddress => TemplateKey::PassportProofOfAddress,
        SecureValueLabel::Phone => TemplateKey::PassportPhone,
        SecureValueLabel::Email => TemplateKey::PassportEmail,
    }
}

/// Style caller-supplied text. Bad entities are dropped, never fatal.
fn custom_text(text: &str, entities: &[TextEntity]) -> RenderResult {
    let len = text.chars().count();
    let mut sorted: Vec<&TextEntity> = entities.iter().collect();
    sorted.sort_by_key(|e| (e.offset, e.length));

    let mut ranges: Vec<StyledRange> = Vec::new();
    for entity in sorted {
        let role = match &entity.kind {
            TextEntityKind::Bold | TextEntityKind::Url | TextEntityKind::TextUrl { .. } => {
                StyleRole::BoldPlain
            }
            TextEntityKind::TextMention { entity } => StyleRole::Mention(*entity),
            TextEntityKind::Italic
            | TextEntityKind::Code
            | TextEntityKind::Mention
            | TextEntityKind::Hashtag => continue,
        };

        let range = entity.offset..entity.offset.saturating_add(entity.length);
        if range.is_empty() || range.end > len {
            warn!(?range, len, "dropping out-of-bounds text entity");
            continue;
        }
        if ranges.last().is_some_and(|last| last.range.end > range.start) {
            warn!(?range, "dropping overlapping text entity");
            continue;
        }
        ranges.push(StyledRange::new(range, role));
    }

    RenderResult {
        text: text.to_string(),
        ranges,
    }
}
