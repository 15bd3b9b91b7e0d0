//! # addons_sdk
//!
//! Addon-side SDK for talking to an embedding **host** across the iframe messaging boundary:
//!
//! - Validate every inbound event (origin, source, shape) before your code sees it
//! - Pin the host origin from the handshake and only ever post back to it
//! - A typed, closed catalog of the messages host and addon exchange
//!
//! ---
//!
//! ## How the protocol works
//!
//! The addon runs inside a frame of the host application. Both sides exchange JSON text:
//!
//! 1. The addon announces it is listening ([`AddonsSdk::announce_ready`]). This is the only
//!    message posted to `*`, because no host origin is known yet.
//! 2. The host answers with a handshake ([`InitMessage`], type `meet-sync-init`) carrying the
//!    principal, participants, settings and its own origin.
//! 3. The SDK pins that origin. From now on inbound events from other origins are dropped and
//!    outbound messages are addressed to the pinned origin only.
//! 4. The host may re-send the handshake at any time (e.g. after
//!    [`AddonsSdk::request_reinit`]); the origin it carries replaces the previous one.
//!
//! Every message is a JSON object with a `type` discriminant and an optional string `payload`.
//!
//! ### Most important gotchas
//!
//! - **Nothing is sent before the handshake.** [`AddonsSdk::send`] returns
//!   [`SdkError::NotReady`] (and reports it) until an origin is pinned.
//! - **Bad events are dropped quietly.** Non-text data, broken JSON, missing `type`, wrong
//!   origin: all return [`Dispatch::Dropped`] and only show up at trace level. An unknown `type`
//!   is the exception and is reported to the error handler, since it usually means host and
//!   addon disagree on the protocol.
//! - **Before the first handshake any origin is accepted.** A hostile frame that wins the race
//!   can become the trusted host. Set [`SdkConfig::expected_host_origin`] if you know the host
//!   origin up front.
//!
//! ---
//!
//! ## Crate layout
//!
//! - [`messages`] / [`context`]: the message catalog and identity model.
//! - [`dispatcher`]: inbound validation, classification and routing.
//! - [`gateway`]: outbound delivery.
//! - [`session`]: the trusted host origin.
//! - [`transport`]: the seam to the messaging primitive, plus [`MemoryTransport`].
//! - [`handler`]: message and error handler traits.
//! - [`config`]: [`SdkConfig`], TOML/env loading, tracing setup.
//! - `runtime` (feature `tokio`): channel transport and async event loop.
//!
//! ---
//!
//! ## Quick start
//!
//! ```rust
//! use addons_sdk::{AddonMessage, AddonsSdk, ContextId, InboundEvent, MemoryTransport, TargetOrigin};
//!
//! let transport = MemoryTransport::new();
//! let me = ContextId(1);
//! let host = ContextId(2);
//!
//! let mut sdk = AddonsSdk::builder(transport.clone(), me)
//!     .on_message(|msg: &AddonMessage| {
//!         eprintln!("got {}", msg.message_type());
//!     })
//!     .build();
//!
//! sdk.announce_ready().unwrap();
//!
//! let handshake = r#"{"type":"meet-sync-init","host":{"origin":"https://host.example"}}"#;
//! sdk.on_receive(&InboundEvent::text(host, "https://host.example", handshake));
//! assert_eq!(sdk.trusted_origin(), Some("https://host.example"));
//!
//! sdk.send_data(r#"{"cursor":[1,2]}"#).unwrap();
//!
//! let posted = transport.posted();
//! assert_eq!(posted[0].target, TargetOrigin::Any);
//! assert_eq!(posted[1].target, TargetOrigin::Exact("https://host.example".into()));
//! ```
//!
//! ---
//!
//! ## Async embedding
//!
//! With the `tokio` feature, `runtime::channel` puts the messaging primitive behind channels and
//! `runtime::event_loop` drains inbound events in order. See the `runtime` module for an example.

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod handler;
mod lenient;
pub mod messages;
#[cfg(feature = "tokio")]
pub mod runtime;
pub mod sdk;
pub mod session;
pub mod transport;
pub mod wire;

// -------- Re-exports --------

#[doc(inline)]
pub use config::{LogLevel, SdkConfig};
#[doc(inline)]
pub use context::{
    ConfigurationItem, HostInfo, ParticipantInfo, ParticipantUserInfo, PrincipalInfo, Theme,
    TokenInfo,
};
#[doc(inline)]
pub use dispatcher::{Dispatch, Dispatcher};
#[doc(inline)]
pub use error::{Rejection, SdkError, TransportError};
#[doc(inline)]
pub use gateway::Gateway;
#[doc(inline)]
pub use handler::{ErrorHandler, MessageHandler};
#[doc(inline)]
pub use messages::{
    AddonMessage, AddonMode, ChromeState, Envelope, InitMessage, MessageType,
    PredefinedMeetingState,
};
#[doc(inline)]
pub use sdk::{AddonsSdk, AddonsSdkBuilder};
#[doc(inline)]
pub use session::Session;
#[doc(inline)]
pub use transport::{ContextId, InboundEvent, MemoryTransport, PostedMessage, TargetOrigin, Transport};

/// Result type used throughout the SDK.
pub type Result<T> = std::result::Result<T, SdkError>;
