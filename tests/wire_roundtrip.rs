use addons_sdk::messages::{ParticipantJoinInfo, PredefinedColor};
use addons_sdk::wire::encode_message;
use addons_sdk::{
    AddonMessage, AddonMode, ChromeState, ConfigurationItem, Envelope, HostInfo, InitMessage,
    ParticipantInfo, ParticipantUserInfo, PredefinedMeetingState, PrincipalInfo, Theme,
    TokenInfo,
};
use std::collections::BTreeMap;

fn participant(user_id: &str) -> ParticipantInfo {
    ParticipantInfo {
        user: ParticipantUserInfo {
            avatar_url: Some(format!("https://cdn.example/{user_id}.png")),
            display_name: None,
            color: PredefinedColor::DarkGreen.hex().to_string(),
            is_guest: false,
            theme: Theme::Light,
        },
        addon_identifier: "whiteboard".into(),
        session_id: "s-1".into(),
        session_user_id: user_id.into(),
        session_user_role: "attendee".into(),
    }
}

fn full_handshake() -> InitMessage {
    let mut settings = BTreeMap::new();
    settings.insert("pen".to_string(), "blue".to_string());
    settings.insert("grid".to_string(), "off".to_string());

    InitMessage {
        principal: Some(PrincipalInfo {
            participant: participant("u-1"),
            token: TokenInfo {
                value: "jwt".into(),
                expire_at: 1_893_456_000,
            },
            tenant: None,
        }),
        host: HostInfo {
            origin: "https://host.example".into(),
            auth_host: "https://auth.example".into(),
        },
        settings,
        configuration: vec![ConfigurationItem {
            key: "mode".into(),
            value: "teams".into(),
        }],
        participants: vec![participant("u-1"), participant("u-2")],
        mode: AddonMode::Mini,
        state: Some(PredefinedMeetingState::BillableStarted),
        chrome_state: Some(ChromeState::Fullscreen),
        payload: Some("extra".into()),
    }
}

#[test]
fn handshake_survives_round_trip() {
    let msg = AddonMessage::Init(full_handshake());
    let text = encode_message(&msg).unwrap();
    let back: AddonMessage = serde_json::from_str(&text).unwrap();
    assert_eq!(back, msg);
}

#[test]
fn handshake_wire_shape_is_camel_case_and_flat() {
    let v = serde_json::to_value(AddonMessage::Init(full_handshake())).unwrap();
    assert_eq!(v["type"], "meet-sync-init");
    assert_eq!(v["chromeState"], "fullscreen");
    assert_eq!(v["state"], "BillableStarted");
    assert_eq!(v["host"]["authHost"], "https://auth.example");
    assert_eq!(v["principal"]["sessionUserId"], "u-1");
    assert_eq!(v["principal"]["token"]["expireAt"], 1_893_456_000);
    assert!(v["principal"].get("tenant").is_none());
    assert!(v["principal"].get("user").is_none(), "nesting must not leak");
}

#[test]
fn opaque_messages_survive_round_trip() {
    let mut extra = serde_json::Map::new();
    extra.insert("x".into(), 12.into());
    extra.insert("y".into(), 40.into());

    let messages = [
        AddonMessage::ready(),
        AddonMessage::init_request(),
        AddonMessage::data("{\"k\":1}"),
        AddonMessage::Reposition(Envelope {
            payload: None,
            extra,
        }),
    ];
    for msg in messages {
        let text = encode_message(&msg).unwrap();
        let back: AddonMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(back, msg, "{text}");
    }
}

#[test]
fn join_info_payload_round_trip() {
    let join = ParticipantJoinInfo {
        participant: participant("u-3"),
        user_identifier: "hub-77".into(),
    };
    let msg = AddonMessage::Participants(Envelope::with_payload(
        serde_json::to_string(&join).unwrap(),
    ));

    let text = encode_message(&msg).unwrap();
    let back: AddonMessage = serde_json::from_str(&text).unwrap();
    let AddonMessage::Participants(env) = back else {
        panic!("wrong variant");
    };
    let decoded: ParticipantJoinInfo = env.decode_payload().unwrap().unwrap();
    assert_eq!(decoded, join);
}
