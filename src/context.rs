//! Identity and host context carried by the handshake message.
//!
//! The host flattens the participant hierarchy on the wire (a principal is a participant is a
//! user, all in one JSON object). Here each layer is its own struct and the outer layer embeds
//! the inner one with `#[serde(flatten)]`, so the JSON stays flat.

use crate::lenient;
use serde::{Deserialize, Serialize};

/// Bearer token the addon presents to the addon API, plus its expiry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub value: String,
    /// Unix timestamp (seconds) after which `value` is no longer accepted.
    #[serde(deserialize_with = "lenient::unix_seconds")]
    pub expire_at: i64,
}

impl TokenInfo {
    /// True once `now` (Unix seconds) has reached the expiry timestamp.
    ///
    /// Addons typically check this before calling the API and ask for a fresh handshake with
    /// [`AddonsSdk::request_reinit`](crate::AddonsSdk::request_reinit) when it returns true.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expire_at
    }
}

/// One per-meeting configuration property.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationItem {
    pub key: String,
    pub value: String,
}

/// Addressing information about the embedding host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    /// Origin of the frame whose posted messages are processed, and the only origin the SDK
    /// posts to once initialized.
    pub origin: String,

    /// Address of the API used to validate the token. Not used for message routing.
    #[serde(default)]
    pub auth_host: String,
}

/// Requested theme of the addon UI.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Participant attributes that are not tied to a session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantUserInfo {
    /// Absent when the user has no avatar or does not share it with addons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Absent when the user does not share it with addons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Colour assigned to the user, for personalizing user-specific UX. Empty when not sent.
    #[serde(default)]
    pub color: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub is_guest: bool,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub theme: Theme,
}

/// A participant as seen by one addon in one session. Identifiers are addon-specific hashes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    #[serde(flatten)]
    pub user: ParticipantUserInfo,

    pub addon_identifier: String,
    pub session_id: String,
    pub session_user_id: String,
    pub session_user_role: String,
}

/// The authenticated user the addon runs on behalf of.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalInfo {
    #[serde(flatten)]
    pub participant: ParticipantInfo,

    pub token: TokenInfo,

    /// Hashed tenant identifier; `None` for the default tenant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
}
