//! Error types for the addon SDK.
//!
//! Two families live here:
//!
//! - [`SdkError`]: conditions reported to the injected [`ErrorHandler`](crate::handler::ErrorHandler)
//!   and returned from outbound calls.
//! - [`Rejection`]: why an inbound event was dropped. Rejections are logged at trace level and
//!   returned from [`Dispatcher::on_receive`](crate::dispatcher::Dispatcher::on_receive), but only
//!   [`Rejection::UnknownType`] is ever surfaced to the error handler.

use thiserror::Error;

/// Errors surfaced by the SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// A message was sent before any handshake established a trusted host origin.
    #[error("you can not send messages before the SDK is initialized (no trusted host origin)")]
    NotReady,

    /// The host sent a message whose discriminant is outside the known catalog.
    #[error("unknown host message of type: {message_type} (origin {origin})")]
    UnknownMessageType {
        message_type: String,
        origin: String,
    },

    /// An outbound message could not be serialized.
    #[error("failed to serialize outbound message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The transport primitive refused the post.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure reported by a [`Transport`](crate::transport::Transport) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The receiving side is gone (e.g. the parent frame was torn down).
    #[error("transport closed")]
    Closed,

    /// Any other failure, described by the implementation.
    #[error("{0}")]
    Other(String),
}

/// Why the dispatcher dropped an inbound event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// `data` was null or an empty string.
    #[error("event carries no data")]
    EmptyData,
    /// `origin` was empty.
    #[error("event carries no origin")]
    EmptyOrigin,
    /// The event was posted by the addon's own execution context.
    #[error("event posted by own context")]
    OwnSource,
    /// The event came from somewhere other than the trusted (or pinned) host origin.
    #[error("invalid message origin {actual}, expected {expected}")]
    UntrustedOrigin { expected: String, actual: String },
    /// `data` was not a string.
    #[error("event data is not a string")]
    NonTextData,
    /// `data` was not a JSON object.
    #[error("event data is not a JSON object")]
    InvalidJson,
    /// The JSON object had no non-empty string `type`.
    #[error("message has no type")]
    MissingType,
    /// `type` is known but the body does not match the message shape.
    #[error("malformed message body: {0}")]
    InvalidShape(String),
    /// A handshake named an empty host origin, which can never be posted to.
    #[error("handshake carries an empty host origin")]
    EmptyHostOrigin,
    /// `type` is outside the catalog.
    #[error("unknown message type {0}")]
    UnknownType(String),
}
