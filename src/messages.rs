//! The message catalog: every shape exchanged with the host and the `type` discriminant that
//! identifies it.
//!
//! [`AddonMessage`] is a closed union keyed by `type`. Only [`InitMessage`] is interpreted by the
//! SDK; every other variant carries an [`Envelope`] that the consuming application reads.

use crate::context::{ConfigurationItem, HostInfo, ParticipantInfo, PrincipalInfo};
use crate::lenient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Discriminants of the messages the SDK recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Host → addon handshake carrying the session context.
    Init,
    /// Addon → host request for a fresh handshake.
    InitRequested,
    Data,
    /// Addon → host announcement that it is listening.
    Ready,
    Tooltips,
    Participants,
    MeetState,
    HostChanged,
    Reposition,
    /// A participant's profile (display name, colour, theme) changed.
    UserProfile,
    StateActive,
    StateInactive,
}

impl MessageType {
    pub const ALL: [MessageType; 12] = [
        MessageType::Init,
        MessageType::InitRequested,
        MessageType::Data,
        MessageType::Ready,
        MessageType::Tooltips,
        MessageType::Participants,
        MessageType::MeetState,
        MessageType::HostChanged,
        MessageType::Reposition,
        MessageType::UserProfile,
        MessageType::StateActive,
        MessageType::StateInactive,
    ];

    /// The wire discriminant.
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageType::Init => "meet-sync-init",
            MessageType::InitRequested => "meet-sync-init-requested",
            MessageType::Data => "meet-message-data",
            MessageType::Ready => "meet-sdk-ready",
            // Misspelling is part of the deployed protocol.
            MessageType::Tooltips => "meet-tooltip-reqest",
            MessageType::Participants => "meet-message-participants",
            MessageType::MeetState => "meet-state-changed",
            MessageType::HostChanged => "meet-host-changed",
            MessageType::Reposition => "meet-float-reposition",
            MessageType::UserProfile => "meet-userprofile-changed",
            MessageType::StateActive => "meet-state-active",
            MessageType::StateInactive => "meet-state-inactive",
        }
    }

    /// Look up a wire discriminant. `None` means the type is not part of the catalog.
    pub fn from_discriminant(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == raw)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode in which the host asks the addon to render.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddonMode {
    Hidden,
    Mini,
    #[default]
    Normal,
    Fullscreen,
}

/// State of the host chrome around the addon frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChromeState {
    Topbar,
    Normal,
    Fullscreen,
}

/// States a meeting passes through during the lifetime of the addon.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedMeetingState {
    MeetingDraft,
    MeetingCreated,
    MeetingCanceled,
    MeetingArchived,

    SchedulingTime,
    SchedulingFailed,
    SchedulingCompleted,

    MeetingStarted,
    MeetingFailed,
    MeetingStopped,
    MeetingCompleted,

    FeedbackCollecting,
    FeedbackFailed,
    FeedbackCompleted,

    BillableStarted,
    BillableStopped,
}

/// Colours the host assigns to participants.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedColor {
    #[serde(rename = "#303F9F")]
    DarkIndigo,
    #[serde(rename = "#FF5722")]
    DeepOrange,
    #[serde(rename = "#388E3C")]
    DarkGreen,
    #[serde(rename = "#FBC02D")]
    DarkYellow,
    #[serde(rename = "#512DA8")]
    DeepPurple,
    #[serde(rename = "#C2185B")]
    DarkPink,
    #[serde(rename = "#00796B")]
    DarkTeal,
}

impl PredefinedColor {
    pub const fn hex(self) -> &'static str {
        match self {
            PredefinedColor::DarkIndigo => "#303F9F",
            PredefinedColor::DeepOrange => "#FF5722",
            PredefinedColor::DarkGreen => "#388E3C",
            PredefinedColor::DarkYellow => "#FBC02D",
            PredefinedColor::DeepPurple => "#512DA8",
            PredefinedColor::DarkPink => "#C2185B",
            PredefinedColor::DarkTeal => "#00796B",
        }
    }
}

/// Participant who just joined the session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantJoinInfo {
    #[serde(flatten)]
    pub participant: ParticipantInfo,

    /// Hub-level identifier used to address messages to this specific user.
    pub user_identifier: String,
}

/// Participant who just left the session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantLeaveInfo {
    pub addon_identifier: String,
    pub session_id: String,
    pub session_user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Body of every message the SDK does not interpret.
///
/// `payload` is the conventional field; anything else the host attached is kept in `extra` so
/// consumers see the message exactly as sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            extra: Map::new(),
        }
    }

    /// Parse the payload string as JSON into `T`. `Ok(None)` when there is no payload.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.payload
            .as_deref()
            .map(|raw| serde_json::from_str(raw))
            .transpose()
    }
}

/// Handshake sent by the host. Establishes the trusted origin and delivers session context.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitMessage {
    /// `None` when absent or malformed; a bad principal never blocks the handshake.
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub principal: Option<PrincipalInfo>,

    /// The only field a handshake must carry intact.
    pub host: HostInfo,

    /// Addon runtime settings defined by the addon author.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub settings: BTreeMap<String, String>,

    /// Per-meeting configuration defined at meeting creation.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub configuration: Vec<ConfigurationItem>,

    /// Participants online when the addon was initialized. Malformed entries are skipped.
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub participants: Vec<ParticipantInfo>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub mode: AddonMode,

    /// `None` for states this build does not know.
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<PredefinedMeetingState>,

    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub chrome_state: Option<ChromeState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl InitMessage {
    /// A handshake carrying only the host address; everything else defaulted.
    pub fn for_host(host: HostInfo) -> Self {
        Self {
            principal: None,
            host,
            settings: BTreeMap::new(),
            configuration: Vec::new(),
            participants: Vec::new(),
            mode: AddonMode::default(),
            state: None,
            chrome_state: None,
            payload: None,
        }
    }
}

/// Any message exchanged with the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum AddonMessage {
    #[serde(rename = "meet-sync-init")]
    Init(InitMessage),
    #[serde(rename = "meet-sync-init-requested")]
    InitRequested(Envelope),
    #[serde(rename = "meet-message-data")]
    Data(Envelope),
    #[serde(rename = "meet-sdk-ready")]
    Ready(Envelope),
    #[serde(rename = "meet-tooltip-reqest")]
    Tooltips(Envelope),
    #[serde(rename = "meet-message-participants")]
    Participants(Envelope),
    #[serde(rename = "meet-state-changed")]
    MeetState(Envelope),
    #[serde(rename = "meet-host-changed")]
    HostChanged(Envelope),
    #[serde(rename = "meet-float-reposition")]
    Reposition(Envelope),
    #[serde(rename = "meet-userprofile-changed")]
    UserProfile(Envelope),
    #[serde(rename = "meet-state-active")]
    StateActive(Envelope),
    #[serde(rename = "meet-state-inactive")]
    StateInactive(Envelope),
}

impl AddonMessage {
    pub fn ready() -> Self {
        AddonMessage::Ready(Envelope::default())
    }

    pub fn init_request() -> Self {
        AddonMessage::InitRequested(Envelope::default())
    }

    pub fn data(payload: impl Into<String>) -> Self {
        AddonMessage::Data(Envelope::with_payload(payload))
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            AddonMessage::Init(_) => MessageType::Init,
            AddonMessage::InitRequested(_) => MessageType::InitRequested,
            AddonMessage::Data(_) => MessageType::Data,
            AddonMessage::Ready(_) => MessageType::Ready,
            AddonMessage::Tooltips(_) => MessageType::Tooltips,
            AddonMessage::Participants(_) => MessageType::Participants,
            AddonMessage::MeetState(_) => MessageType::MeetState,
            AddonMessage::HostChanged(_) => MessageType::HostChanged,
            AddonMessage::Reposition(_) => MessageType::Reposition,
            AddonMessage::UserProfile(_) => MessageType::UserProfile,
            AddonMessage::StateActive(_) => MessageType::StateActive,
            AddonMessage::StateInactive(_) => MessageType::StateInactive,
        }
    }

    pub fn payload(&self) -> Option<&str> {
        match self {
            AddonMessage::Init(init) => init.payload.as_deref(),
            AddonMessage::InitRequested(env)
            | AddonMessage::Data(env)
            | AddonMessage::Ready(env)
            | AddonMessage::Tooltips(env)
            | AddonMessage::Participants(env)
            | AddonMessage::MeetState(env)
            | AddonMessage::HostChanged(env)
            | AddonMessage::Reposition(env)
            | AddonMessage::UserProfile(env)
            | AddonMessage::StateActive(env)
            | AddonMessage::StateInactive(env) => env.payload.as_deref(),
        }
    }

    pub fn as_init(&self) -> Option<&InitMessage> {
        match self {
            AddonMessage::Init(init) => Some(init),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discriminants_are_unique_and_resolvable() {
        for ty in MessageType::ALL {
            assert_eq!(MessageType::from_discriminant(ty.as_str()), Some(ty));
        }
        let mut names: Vec<_> = MessageType::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MessageType::ALL.len());
        assert_eq!(MessageType::from_discriminant("meet-addonmode-change"), None);
    }

    #[test]
    fn serialized_type_matches_message_type() {
        let messages = [
            AddonMessage::ready(),
            AddonMessage::init_request(),
            AddonMessage::data("x"),
            AddonMessage::StateInactive(Envelope::default()),
        ];
        for msg in messages {
            let v = serde_json::to_value(&msg).unwrap();
            assert_eq!(v["type"], msg.message_type().as_str());
        }
    }

    #[test]
    fn envelope_keeps_unknown_fields() {
        let raw = json!({
            "type": "meet-float-reposition",
            "payload": "p",
            "x": 10,
            "anchor": { "side": "left" }
        });
        let msg: AddonMessage = serde_json::from_value(raw.clone()).unwrap();
        match &msg {
            AddonMessage::Reposition(env) => {
                assert_eq!(env.payload.as_deref(), Some("p"));
                assert_eq!(env.extra["x"], 10);
                assert!(!env.extra.contains_key("type"));
            }
            other => panic!("unexpected variant {other:?}"),
        }
        assert_eq!(serde_json::to_value(&msg).unwrap(), raw);
    }

    #[test]
    fn minimal_handshake_uses_defaults() {
        let msg: AddonMessage = serde_json::from_value(json!({
            "type": "meet-sync-init",
            "host": { "origin": "https://host.example" }
        }))
        .unwrap();
        let init = msg.as_init().expect("init");
        assert_eq!(init.host.origin, "https://host.example");
        assert_eq!(init.host.auth_host, "");
        assert_eq!(init.mode, AddonMode::Normal);
        assert!(init.principal.is_none());
        assert!(init.participants.is_empty());
        assert_eq!(
            init,
            &InitMessage::for_host(HostInfo {
                origin: "https://host.example".into(),
                auth_host: String::new(),
            })
        );
    }

    #[test]
    fn leave_info_decodes_from_payload() {
        let env = Envelope::with_payload(
            r#"{"addonIdentifier":"a","sessionId":"s","sessionUserId":"u"}"#,
        );
        let leave: ParticipantLeaveInfo = env.decode_payload().unwrap().unwrap();
        assert_eq!(leave.session_user_id, "u");
        assert_eq!(leave.display_name, None);
        assert!(Envelope::default()
            .decode_payload::<ParticipantLeaveInfo>()
            .unwrap()
            .is_none());
    }

    #[test]
    fn colors_serialize_as_hex() {
        for color in [PredefinedColor::DarkIndigo, PredefinedColor::DarkTeal] {
            assert_eq!(serde_json::to_value(color).unwrap(), color.hex());
        }
    }
}
