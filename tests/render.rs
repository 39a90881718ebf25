//! End-to-end rendering tests for servicetext
//!
//! Drives events through classification and rendering against the bundled
//! English catalog and an in-memory directory.

use servicetext::display::{RenderResult, Renderer, StyleRole};
use servicetext::event::{
    Attachment, DiscardReason, ExpiredMedia, File, FileAttribute, Image, PollKind,
    SecureValueType, TextEntity, TextEntityKind,
};
use servicetext::humanize::Clock;
use servicetext::{
    Catalog, ContainerKind, Directory, Entity, EntityId, Event, RenderContext, SecondaryMessage,
};

// ============================================================================
// Fixtures
// ============================================================================

const VIEWER: EntityId = EntityId(1);
const ADA: EntityId = EntityId(2);
const BOB: EntityId = EntityId(3);
const CY: EntityId = EntityId(4);
const NEWS: EntityId = EntityId(100);
const HIKERS: EntityId = EntityId(200);
const PIZZA_BOT: EntityId = EntityId(300);

/// 2026-03-04 12:00:00 UTC
const NOW: i64 = 1_772_625_600;

fn directory() -> Directory {
    Directory::new()
        .with(Entity::user(1, "Me", "Myself"))
        .with(Entity::user(2, "Ada", "Lovelace"))
        .with(Entity::user(3, "Bob", "Stone"))
        .with(Entity::user(4, "Cy", ""))
        .with(Entity::user(300, "PizzaBot", ""))
        .with(Entity::BroadcastChannel {
            id: NEWS,
            title: "Daily News".into(),
        })
        .with(Entity::Group {
            id: HIKERS,
            title: "Hikers".into(),
        })
}

struct World {
    catalog: Catalog,
    directory: Directory,
}

impl World {
    fn new() -> Self {
        Self {
            catalog: Catalog::english().unwrap(),
            directory: directory(),
        }
    }

    fn renderer(&self) -> Renderer<'_, '_> {
        Renderer::new(&self.catalog, &self.directory)
    }

    fn ctx(&self, chat: EntityId, container: ContainerKind, actor: EntityId) -> RenderContext {
        RenderContext::new(VIEWER, chat, container)
            .with_actor(actor, &self.directory)
            .at(NOW, 0)
    }

    fn group(&self, actor: EntityId) -> RenderContext {
        self.ctx(HIKERS, ContainerKind::Group, actor)
    }

    fn render(
        &self,
        event: &Event,
        ctx: &RenderContext,
        secondary: Option<&SecondaryMessage>,
    ) -> Option<RenderResult> {
        let result = self
            .renderer()
            .render_event(event, ctx, secondary)
            .unwrap();
        if let Some(result) = &result {
            assert_invariants(result);
        }
        result
    }

    fn text(&self, event: &Event, ctx: &RenderContext) -> String {
        self.render(event, ctx, None).unwrap().text
    }
}

/// Styled spans as (text, role) pairs
fn styled(result: &RenderResult) -> Vec<(String, StyleRole)> {
    result
        .ranges
        .iter()
        .map(|r| (result.slice(&r.range), r.role))
        .collect()
}

fn assert_invariants(result: &RenderResult) {
    let len = result.char_len();
    for pair in result.ranges.windows(2) {
        assert!(
            pair[0].range.end <= pair[1].range.start,
            "ranges out of order or overlapping: {:?}",
            result.ranges
        );
    }
    for styled in &result.ranges {
        assert!(styled.range.start < styled.range.end, "empty range");
        assert!(styled.range.end <= len, "range past end of text");
        assert_ne!(styled.role, StyleRole::Body, "body spans are implicit");
    }

    let covered: usize = result.segments().iter().map(|s| s.range.len()).sum();
    assert_eq!(covered, len);
}

fn every_event() -> Vec<Event> {
    vec![
        Event::GroupCreated {
            title: "Hikers".into(),
        },
        Event::MembersAdded {
            entities: vec![BOB],
        },
        Event::MembersAdded {
            entities: vec![BOB, CY],
        },
        Event::MembersRemoved {
            entities: vec![ADA],
        },
        Event::MembersRemoved { entities: vec![] },
        Event::PhotoUpdated {
            image: Some(Image { has_video: true }),
        },
        Event::PhotoUpdated { image: None },
        Event::TitleUpdated {
            title: "Summit".into(),
        },
        Event::MessagePinned,
        Event::JoinedByLink,
        Event::Migrated,
        Event::AutoDeleteTimerChanged { timeout: 0 },
        Event::AutoDeleteTimerChanged { timeout: 604_800 },
        Event::HistoryCleared,
        Event::HistoryScreenshotTaken,
        Event::GameScore {
            game_id: 1,
            score: 10,
        },
        Event::PaymentSent {
            currency: "EUR".into(),
            total_amount: 1250,
        },
        Event::PhoneCall {
            discard_reason: None,
        },
        Event::PhoneCall {
            discard_reason: Some(DiscardReason::Missed),
        },
        Event::GroupCall {
            scheduled_for: Some(NOW + 86_400),
            duration: None,
        },
        Event::GroupCall {
            scheduled_for: None,
            duration: Some(3_700),
        },
        Event::GroupCall {
            scheduled_for: None,
            duration: None,
        },
        Event::CustomText {
            text: "Welcome aboard".into(),
            entities: vec![],
        },
        Event::BotDomainGranted {
            domain: "example.org".into(),
        },
        Event::BotSentSecureValues {
            values: vec![SecureValueType::Phone],
        },
        Event::PeerJoined,
        Event::PhoneNumberRequested,
        Event::ProximityReached {
            from: ADA,
            to: BOB,
            distance: 40,
        },
        Event::InviteToCall {
            entities: vec![VIEWER],
        },
        Event::InviteToCall {
            entities: vec![BOB, CY],
        },
        Event::Unknown,
        Event::ExpiredMedia {
            media: ExpiredMedia::File,
        },
    ]
}

// ============================================================================
// Totality and invariants
// ============================================================================

#[test]
fn test_every_event_renders_in_every_container() {
    let world = World::new();
    let containers = [
        (HIKERS, ContainerKind::Group),
        (HIKERS, ContainerKind::Supergroup),
        (NEWS, ContainerKind::BroadcastChannel),
        (ADA, ContainerKind::User),
        (ADA, ContainerKind::SecretChat),
    ];
    let game = SecondaryMessage::default().with(Attachment::Game {
        title: "Snake".into(),
    });

    for event in every_event() {
        for (chat, container) in containers {
            for actor in [VIEWER, ADA, NEWS, EntityId(999)] {
                let ctx = world.ctx(chat, container, actor);
                world.render(&event, &ctx, None);
                world.render(&event, &ctx.clone().incoming(true), Some(&game));
                world.render(&event, &ctx.clone().for_chat_list(true), None);
            }
        }
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let world = World::new();
    let ctx = world.group(ADA);
    let event = Event::MembersAdded {
        entities: vec![BOB, CY],
    };

    let first = world.render(&event, &ctx, None);
    for _ in 0..5 {
        assert_eq!(world.render(&event, &ctx, None), first);
    }
}

#[test]
fn test_silent_and_blank_events() {
    let world = World::new();
    let ctx = world.group(ADA);

    assert_eq!(world.render(&Event::HistoryCleared, &ctx, None), None);
    assert_eq!(world.render(&Event::PhoneNumberRequested, &ctx, None), None);
    assert_eq!(world.render(&Event::Unknown, &ctx, None), None);
    assert_eq!(
        world.render(&Event::Migrated, &ctx, None),
        Some(RenderResult::default())
    );
}

// ============================================================================
// Membership
// ============================================================================

#[test]
fn test_remove_one_member_has_two_mentions() {
    let world = World::new();
    let result = world
        .render(
            &Event::MembersRemoved {
                entities: vec![BOB],
            },
            &world.group(ADA),
            None,
        )
        .unwrap();

    assert_eq!(result.text, "Ada Lovelace removed Bob Stone");
    assert_eq!(
        styled(&result),
        vec![
            ("Ada Lovelace".to_string(), StyleRole::Mention(ADA)),
            ("Bob Stone".to_string(), StyleRole::Mention(BOB)),
        ]
    );
}

#[test]
fn test_remove_many_members_is_plain_list() {
    let world = World::new();
    let result = world
        .render(
            &Event::MembersRemoved {
                entities: vec![BOB, CY],
            },
            &world.group(ADA),
            None,
        )
        .unwrap();

    assert_eq!(result.text, "Ada Lovelace removed Bob Stone, Cy");
    assert_eq!(
        styled(&result),
        vec![("Ada Lovelace".to_string(), StyleRole::Mention(ADA))]
    );
}

#[test]
fn test_join_and_leave_phrasing() {
    let world = World::new();

    let join = Event::MembersAdded {
        entities: vec![ADA],
    };
    assert_eq!(
        world.text(&join, &world.group(ADA)),
        "Ada Lovelace joined the group"
    );

    let channel = world.ctx(NEWS, ContainerKind::BroadcastChannel, ADA);
    let leave = Event::MembersRemoved {
        entities: vec![ADA],
    };
    assert_eq!(world.text(&leave, &channel), "Ada Lovelace left the channel");
}

#[test]
fn test_invite_many_skips_unknown_names() {
    let world = World::new();
    let event = Event::MembersAdded {
        entities: vec![BOB, EntityId(999), CY],
    };
    assert_eq!(
        world.text(&event, &world.group(ADA)),
        "Ada Lovelace invited Bob Stone, Cy"
    );
}

#[test]
fn test_ranges_count_chars() {
    let mut world = World::new();
    world.directory.insert(Entity::user(5, "Zoë", "Ångström"));

    let result = world
        .render(
            &Event::MembersRemoved {
                entities: vec![EntityId(5)],
            },
            &world.group(ADA),
            None,
        )
        .unwrap();

    assert_eq!(result.text, "Ada Lovelace removed Zoë Ångström");
    assert_eq!(result.ranges[1].range, 21..33);
    assert_eq!(result.slice(&result.ranges[1].range), "Zoë Ångström");
}

#[test]
fn test_locale_may_reorder_arguments() {
    let world = World::new();
    let reordered = Catalog::from_toml_str(r#""Notification.Kicked" = "%2$@ was removed by %1$@""#)
        .unwrap();
    let catalog = Catalog::english().unwrap().overlay(reordered);

    let ctx = world.group(ADA);
    let result = Renderer::new(&catalog, &world.directory)
        .render_event(
            &Event::MembersRemoved {
                entities: vec![BOB],
            },
            &ctx,
            None,
        )
        .unwrap()
        .unwrap();

    assert_eq!(result.text, "Bob Stone was removed by Ada Lovelace");
    assert_eq!(
        styled(&result),
        vec![
            ("Bob Stone".to_string(), StyleRole::Mention(BOB)),
            ("Ada Lovelace".to_string(), StyleRole::Mention(ADA)),
        ]
    );
}

// ============================================================================
// Room changes
// ============================================================================

#[test]
fn test_group_created_variants() {
    let world = World::new();
    let event = Event::GroupCreated {
        title: "Hikers".into(),
    };

    assert_eq!(
        world.text(&event, &world.group(ADA)),
        "Ada Lovelace created the group \"Hikers\""
    );
    assert_eq!(
        world.text(&event, &world.group(ADA).for_chat_list(true)),
        "Group created"
    );
    assert_eq!(
        world.text(&event, &world.ctx(NEWS, ContainerKind::BroadcastChannel, NEWS)),
        "Channel created"
    );
}

#[test]
fn test_photo_and_title_attribution() {
    let world = World::new();
    let channel = world.ctx(NEWS, ContainerKind::BroadcastChannel, ADA);

    assert_eq!(
        world.text(&Event::PhotoUpdated { image: None }, &channel),
        "Channel photo removed"
    );
    assert_eq!(
        world.text(
            &Event::PhotoUpdated {
                image: Some(Image { has_video: true })
            },
            &world.group(ADA)
        ),
        "Ada Lovelace changed the group video"
    );
    assert_eq!(
        world.text(
            &Event::TitleUpdated {
                title: "Breaking".into()
            },
            &channel
        ),
        "Channel renamed to \"Breaking\""
    );

    // Unknown actor has no display name
    let nameless = world.group(EntityId(999));
    assert_eq!(
        world.text(
            &Event::PhotoUpdated {
                image: Some(Image::default())
            },
            &nameless
        ),
        "Group photo updated"
    );
}

// ============================================================================
// Pins
// ============================================================================

#[test]
fn test_pinned_game_beats_photo() {
    let world = World::new();
    let pinned = SecondaryMessage::text("look")
        .with(Attachment::Photo(Image::default()))
        .with(Attachment::Game {
            title: "Snake".into(),
        });

    let result = world
        .render(&Event::MessagePinned, &world.group(ADA), Some(&pinned))
        .unwrap();
    assert_eq!(result.text, "Ada Lovelace pinned a game");
}

#[test]
fn test_pinned_text_is_clipped() {
    let world = World::new();
    let pinned = SecondaryMessage::text("Hello\nworld this is long");

    let result = world
        .render(&Event::MessagePinned, &world.group(ADA), Some(&pinned))
        .unwrap();
    assert_eq!(result.text, "Ada Lovelace pinned \"Hello world th...\"");
    assert_eq!(
        styled(&result),
        vec![("Ada Lovelace".to_string(), StyleRole::Mention(ADA))]
    );
}

#[test]
fn test_pinned_media_kinds() {
    let world = World::new();
    let ctx = world.group(ADA);
    let cases = [
        (
            Attachment::File(File::default().with(FileAttribute::Audio { voice: true })),
            "Ada Lovelace pinned a voice message",
        ),
        (
            Attachment::File(File {
                animated: true,
                attributes: vec![],
            }),
            "Ada Lovelace pinned a GIF",
        ),
        (
            Attachment::Poll {
                kind: PollKind::Quiz,
            },
            "Ada Lovelace pinned a quiz",
        ),
        (Attachment::Location, "Ada Lovelace pinned a map"),
    ];

    for (attachment, expected) in cases {
        let pinned = SecondaryMessage::default().with(attachment);
        let result = world
            .render(&Event::MessagePinned, &ctx, Some(&pinned))
            .unwrap();
        assert_eq!(result.text, expected);
    }
}

#[test]
fn test_pinned_deleted_or_empty() {
    let world = World::new();
    let ctx = world.group(ADA);

    assert_eq!(
        world.render(&Event::MessagePinned, &ctx, None).unwrap().text,
        "Ada Lovelace pinned a message"
    );
    assert_eq!(
        world
            .render(&Event::MessagePinned, &ctx, Some(&SecondaryMessage::default()))
            .unwrap()
            .text,
        "Ada Lovelace pinned a message"
    );
}

// ============================================================================
// Timers and calls
// ============================================================================

#[test]
fn test_auto_delete_timer() {
    let world = World::new();
    let off = Event::AutoDeleteTimerChanged { timeout: 0 };
    let week = Event::AutoDeleteTimerChanged { timeout: 604_800 };

    let own_dm = world.ctx(ADA, ContainerKind::User, VIEWER);
    assert_eq!(world.text(&off, &own_dm), "You disabled the auto-delete timer");

    let channel = world.ctx(NEWS, ContainerKind::BroadcastChannel, VIEWER);
    assert_eq!(
        world.text(&off, &channel),
        "Auto-delete timer was disabled in this channel"
    );

    let their_dm = world.ctx(ADA, ContainerKind::User, ADA);
    let result = world.render(&week, &their_dm, None).unwrap();
    assert_eq!(
        result.text,
        "Ada set messages to automatically delete after 1 week."
    );
    assert!(result.ranges.is_empty());

    let supergroup = world.ctx(HIKERS, ContainerKind::Supergroup, ADA);
    assert_eq!(
        world.text(&Event::AutoDeleteTimerChanged { timeout: 90_000 }, &supergroup),
        "Messages will automatically delete after 25 hours."
    );
}

#[test]
fn test_call_outcomes() {
    let world = World::new();
    let dm = world.ctx(ADA, ContainerKind::User, ADA);
    let call = |reason| Event::PhoneCall {
        discard_reason: reason,
    };

    assert_eq!(
        world.text(&call(Some(DiscardReason::Busy)), &dm.clone().incoming(true)),
        "Missed Call"
    );
    assert_eq!(
        world.text(&call(Some(DiscardReason::Busy)), &dm),
        "Cancelled Call"
    );
    assert_eq!(
        world.text(&call(Some(DiscardReason::Hangup)), &dm.clone().incoming(true)),
        "Incoming Call"
    );
    assert_eq!(world.text(&call(None), &dm), "Outgoing Call");
}

#[test]
fn test_group_call_phrasing() {
    let world = World::new();
    let channel = world.ctx(NEWS, ContainerKind::BroadcastChannel, NEWS);

    let soon = Event::GroupCall {
        scheduled_for: Some(NOW + 3_600),
        duration: None,
    };
    assert_eq!(
        world.text(&soon, &channel),
        "Voice chat scheduled for today at 13:00"
    );

    let later = Event::GroupCall {
        scheduled_for: Some(NOW + 10 * 86_400),
        duration: None,
    };
    assert_eq!(
        world.text(&later, &channel),
        "Voice chat scheduled for Mar 14 at 12:00"
    );

    let result = world
        .renderer()
        .clock(Clock::TwelveHour)
        .render_event(&soon, &world.group(ADA), None)
        .unwrap()
        .unwrap();
    assert_eq!(
        result.text,
        "Ada Lovelace scheduled a voice chat for today at 1:00 PM"
    );

    let ended = Event::GroupCall {
        scheduled_for: None,
        duration: Some(125),
    };
    assert_eq!(world.text(&ended, &channel), "Voice chat ended (2 minutes)");
    assert_eq!(
        world.text(&ended, &world.group(ADA)),
        "Voice chat ended (2 minutes)"
    );
}

#[test]
fn test_call_invites() {
    let world = World::new();
    let ctx = world.group(ADA);

    assert_eq!(
        world.text(
            &Event::InviteToCall {
                entities: vec![VIEWER]
            },
            &ctx
        ),
        "Ada Lovelace invited you to the voice chat"
    );

    let result = world
        .render(
            &Event::InviteToCall {
                entities: vec![BOB],
            },
            &ctx,
            None,
        )
        .unwrap();
    assert_eq!(result.text, "Ada Lovelace invited Bob Stone to the voice chat");
    assert_eq!(result.ranges.len(), 2);
}

// ============================================================================
// Legacy splicing
// ============================================================================

#[test]
fn test_game_score() {
    let world = World::new();
    let game = SecondaryMessage::default().with(Attachment::Game {
        title: "Snake".into(),
    });
    let event = Event::GameScore {
        game_id: 1,
        score: 42,
    };

    let result = world.render(&event, &world.group(ADA), Some(&game)).unwrap();
    assert_eq!(result.text, "Ada Lovelace scored 42 points in Snake");
    assert_eq!(
        styled(&result),
        vec![
            ("Ada Lovelace".to_string(), StyleRole::Mention(ADA)),
            ("Snake".to_string(), StyleRole::BoldPlain),
        ]
    );

    let single = Event::GameScore {
        game_id: 1,
        score: 1,
    };
    let result = world.render(&single, &world.group(VIEWER), None).unwrap();
    assert_eq!(result.text, "You scored 1 point");
    assert!(result.ranges.is_empty());
}

#[test]
fn test_payment_sent() {
    let world = World::new();
    let ctx = world.ctx(PIZZA_BOT, ContainerKind::User, VIEWER);
    let event = Event::PaymentSent {
        currency: "USD".into(),
        total_amount: 1500,
    };
    let invoice = SecondaryMessage::default().with(Attachment::Invoice {
        title: "Large pie".into(),
    });

    let result = world.render(&event, &ctx, Some(&invoice)).unwrap();
    assert_eq!(
        result.text,
        "You successfully transferred $15.00 to PizzaBot for Large pie"
    );
    assert_eq!(
        styled(&result),
        vec![
            ("$15.00".to_string(), StyleRole::BoldPlain),
            ("PizzaBot".to_string(), StyleRole::BoldPlain),
        ]
    );

    assert_eq!(world.text(&event, &ctx), "Payment: $15.00");
}

// ============================================================================
// Everything else
// ============================================================================

#[test]
fn test_proximity() {
    let world = World::new();
    let ctx = world.ctx(ADA, ContainerKind::User, ADA);

    let result = world
        .render(
            &Event::ProximityReached {
                from: ADA,
                to: VIEWER,
                distance: 1_500,
            },
            &ctx,
            None,
        )
        .unwrap();
    assert_eq!(result.text, "Ada Lovelace is now within 1.5 km from you");
    assert_eq!(
        styled(&result),
        vec![("Ada Lovelace".to_string(), StyleRole::Mention(ADA))]
    );

    let result = world
        .render(
            &Event::ProximityReached {
                from: VIEWER,
                to: BOB,
                distance: 30,
            },
            &ctx,
            None,
        )
        .unwrap();
    assert_eq!(result.text, "You are now within 30 m from Bob Stone");
    assert_eq!(
        styled(&result),
        vec![("Bob Stone".to_string(), StyleRole::Mention(BOB))]
    );
}

#[test]
fn test_proximity_extreme_distance() {
    let world = World::new();
    let ctx = world.ctx(ADA, ContainerKind::User, ADA);

    let result = world
        .render(
            &Event::ProximityReached {
                from: ADA,
                to: VIEWER,
                distance: i32::MAX,
            },
            &ctx,
            None,
        )
        .unwrap();
    assert_eq!(
        result.text,
        "Ada Lovelace is now within 2147483.6 km from you"
    );
    assert_invariants(&result);
}

#[test]
fn test_secure_values() {
    let world = World::new();
    let ctx = world.ctx(PIZZA_BOT, ContainerKind::User, VIEWER);
    let event = Event::BotSentSecureValues {
        values: vec![
            SecureValueType::Passport,
            SecureValueType::IdCard,
            SecureValueType::Email,
        ],
    };

    assert_eq!(
        world.text(&event, &ctx),
        "PizzaBot received the following documents: proof of identity, email address"
    );
}

#[test]
fn test_screenshot_and_peer_joined() {
    let world = World::new();
    let secret = world.ctx(ADA, ContainerKind::SecretChat, ADA).incoming(true);

    assert_eq!(
        world.text(&Event::HistoryScreenshotTaken, &secret),
        "Ada took a screenshot!"
    );
    assert_eq!(
        world.text(
            &Event::HistoryScreenshotTaken,
            &world.ctx(ADA, ContainerKind::SecretChat, VIEWER)
        ),
        "You took a screenshot!"
    );
    assert_eq!(
        world.text(&Event::PeerJoined, &world.ctx(ADA, ContainerKind::User, ADA)),
        "Ada Lovelace joined"
    );
}

#[test]
fn test_custom_text_entities() {
    let world = World::new();
    let event = Event::CustomText {
        text: "Ada unlocked a badge".into(),
        entities: vec![
            TextEntity {
                offset: 0,
                length: 3,
                kind: TextEntityKind::TextMention { entity: ADA },
            },
            TextEntity {
                offset: 15,
                length: 5,
                kind: TextEntityKind::Bold,
            },
            TextEntity {
                offset: 18,
                length: 10,
                kind: TextEntityKind::Bold,
            },
        ],
    };

    let result = world.render(&event, &world.group(ADA), None).unwrap();
    assert_eq!(result.text, "Ada unlocked a badge");
    assert_eq!(
        styled(&result),
        vec![
            ("Ada".to_string(), StyleRole::Mention(ADA)),
            ("badge".to_string(), StyleRole::BoldPlain),
        ]
    );
}

#[test]
fn test_expired_media_and_domain() {
    let world = World::new();
    let ctx = world.ctx(ADA, ContainerKind::User, ADA);

    assert_eq!(
        world.text(
            &Event::ExpiredMedia {
                media: ExpiredMedia::Image
            },
            &ctx
        ),
        "Photo has expired"
    );
    assert_eq!(
        world.text(
            &Event::BotDomainGranted {
                domain: "example.org".into()
            },
            &ctx
        ),
        "You allowed this bot to message you when you logged in on example.org."
    );
}
