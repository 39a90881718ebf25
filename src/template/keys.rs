//! The closed set of template keys the renderer can ask for

use std::fmt;

macro_rules! template_keys {
    ($($variant:ident => $name:literal,)+) => {
        /// A localized template the renderer can request
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TemplateKey {
            $($variant,)+
        }

        impl TemplateKey {
            /// Every key, for catalog completeness checks
            pub const ALL: &'static [TemplateKey] = &[$(TemplateKey::$variant,)+];

            /// Dotted name used in locale catalogs
            pub fn as_str(self) -> &'static str {
                match self {
                    $(TemplateKey::$variant => $name,)+
                }
            }
        }
    };
}

template_keys! {
    CreatedChannel => "Notification.CreatedChannel",
    CreatedGroup => "Notification.CreatedGroup",
    CreatedChatWithTitle => "Notification.CreatedChatWithTitle",
    JoinedChannel => "Notification.JoinedChannel",
    JoinedChat => "Notification.JoinedChat",
    Invited => "Notification.Invited",
    InvitedMultiple => "Notification.InvitedMultiple",
    LeftChannel => "Notification.LeftChannel",
    LeftChat => "Notification.LeftChat",
    Kicked => "Notification.Kicked",

    ChannelVideoUpdated => "Channel.MessageVideoUpdated",
    ChannelPhotoUpdated => "Channel.MessagePhotoUpdated",
    ChannelPhotoRemoved => "Channel.MessagePhotoRemoved",
    GroupVideoUpdated => "Group.MessageVideoUpdated",
    GroupPhotoUpdated => "Group.MessagePhotoUpdated",
    GroupPhotoRemoved => "Group.MessagePhotoRemoved",
    ChangedGroupVideo => "Notification.ChangedGroupVideo",
    ChangedGroupPhoto => "Notification.ChangedGroupPhoto",
    RemovedGroupPhoto => "Notification.RemovedGroupPhoto",
    ChannelTitleUpdated => "Channel.MessageTitleUpdated",
    ChangedGroupName => "Notification.ChangedGroupName",

    PinnedGeneric => "Message.PinnedGenericMessage",
    PinnedText => "Notification.PinnedTextMessage",
    PinnedGame => "Message.AuthorPinnedGame",
    PinnedPhoto => "Notification.PinnedPhotoMessage",
    PinnedVideo => "Notification.PinnedVideoMessage",
    PinnedRound => "Notification.PinnedRoundMessage",
    PinnedAudio => "Notification.PinnedAudioMessage",
    PinnedDocument => "Notification.PinnedDocumentMessage",
    PinnedAnimation => "Notification.PinnedAnimationMessage",
    PinnedSticker => "Notification.PinnedStickerMessage",
    PinnedLocation => "Notification.PinnedLocationMessage",
    PinnedContact => "Notification.PinnedContactMessage",
    PinnedPoll => "Notification.PinnedPollMessage",
    PinnedQuiz => "Notification.PinnedQuizMessage",

    JoinedGroupByLink => "Notification.JoinedGroupByLink",

    TimerSetUserYou => "Conversation.AutoremoveTimerSetUserYou",
    TimerSetUser => "Conversation.AutoremoveTimerSetUser",
    TimerSetGroup => "Conversation.AutoremoveTimerSetGroup",
    TimerSetChannel => "Conversation.AutoremoveTimerSetChannel",
    LifetimeChangedOutgoing => "Notification.MessageLifetimeChangedOutgoing",
    LifetimeChanged => "Notification.MessageLifetimeChanged",
    TimerRemovedUserYou => "Conversation.AutoremoveTimerRemovedUserYou",
    TimerRemovedUser => "Conversation.AutoremoveTimerRemovedUser",
    TimerRemovedGroup => "Conversation.AutoremoveTimerRemovedGroup",
    TimerRemovedChannel => "Conversation.AutoremoveTimerRemovedChannel",
    LifetimeRemovedOutgoing => "Notification.MessageLifetimeRemovedOutgoing",
    LifetimeRemoved => "Notification.MessageLifetimeRemoved",

    Screenshot => "Notification.SecretChatMessageScreenshot",
    ScreenshotSelf => "Notification.SecretChatMessageScreenshotSelf",

    GameScoreSelfExtended => "ServiceMessage.GameScoreSelfExtended",
    GameScoreSelfSimple => "ServiceMessage.GameScoreSelfSimple",
    GameScoreExtended => "ServiceMessage.GameScoreExtended",
    GameScoreSimple => "ServiceMessage.GameScoreSimple",
    PaymentSentTo => "Notification.PaymentSent",
    PaymentSent => "Message.PaymentSent",

    CallIncoming => "Notification.CallIncoming",
    CallOutgoing => "Notification.CallOutgoing",
    CallCanceled => "Notification.CallCanceled",
    CallMissed => "Notification.CallMissed",

    VoiceChatScheduledChannel => "Notification.VoiceChatScheduledChannel",
    VoiceChatScheduledTomorrowChannel => "Notification.VoiceChatScheduledTomorrowChannel",
    VoiceChatScheduledTodayChannel => "Notification.VoiceChatScheduledTodayChannel",
    VoiceChatScheduled => "Notification.VoiceChatScheduled",
    VoiceChatEnded => "Notification.VoiceChatEnded",
    VoiceChatStartedChannel => "Notification.VoiceChatStartedChannel",
    VoiceChatStarted => "Notification.VoiceChatStarted",
    VoiceChatInvitationForYou => "Notification.VoiceChatInvitationForYou",
    VoiceChatInvitation => "Notification.VoiceChatInvitation",
    VoiceChatInvitationMultiple => "Notification.VoiceChatInvitationMultiple",

    BotDomainGranted => "AuthSessions.Message",
    PassportPersonalDetails => "Notification.PassportValuePersonalDetails",
    PassportProofOfIdentity => "Notification.PassportValueProofOfIdentity",
    PassportAddress => "Notification.PassportValueAddress",
    PassportProofOfAddress => "Notification.PassportValueProofOfAddress",
    PassportPhone => "Notification.PassportValuePhone",
    PassportEmail => "Notification.PassportValueEmail",
    PassportValuesSent => "Notification.PassportValuesSentMessage",

    PeerJoined => "Notification.Joined",

    ProximityYouReached => "Notification.ProximityYouReached",
    ProximityReachedYou => "Notification.ProximityReachedYou",
    ProximityReached => "Notification.ProximityReached",

    ImageExpired => "Message.ImageExpired",
    VideoExpired => "Message.VideoExpired",

    Seconds => "Time.Seconds",
    Minutes => "Time.Minutes",
    Hours => "Time.Hours",
    Days => "Time.Days",
    Weeks => "Time.Weeks",
    Months => "Time.Months",
    Years => "Time.Years",
    TodayAt => "Time.TodayAt",
    TomorrowAt => "Time.TomorrowAt",
    YesterdayAt => "Time.YesterdayAt",
    DateAt => "Time.DateAt",
    Meters => "Distance.Meters",
    Kilometers => "Distance.Kilometers",
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
