//! Inbound side of the protocol: decides whether an event is a legitimate host message and
//! where it goes.
//!
//! Every event runs through the same short-circuiting pipeline:
//!
//! 1. non-empty `data` and `origin`
//! 2. not posted by the addon's own context
//! 3. origin matches the trusted host origin (or the configured pin before the first handshake)
//! 4. `data` is text
//! 5. text is a JSON object with a non-empty `type`
//!
//! then the discriminant is classified against the catalog and the message is routed. A
//! handshake must also name a non-empty host origin. Failed checks drop the event quietly; only
//! an unknown discriminant is reported to the error handler.

use crate::error::{Rejection, SdkError};
use crate::handler::{ErrorHandler, MessageHandler};
use crate::messages::{AddonMessage, InitMessage, MessageType};
use crate::session::Session;
use crate::transport::{ContextId, InboundEvent};
use crate::wire;
use serde_json::Value;
use tracing::{debug, trace};

/// What happened to one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Accepted and handed to the message handler.
    Routed(MessageType),
    /// Dropped before reaching the message handler.
    Dropped(Rejection),
}

impl Dispatch {
    /// True when the event reached the message handler.
    pub fn is_routed(&self) -> bool {
        matches!(self, Dispatch::Routed(_))
    }
}

/// Validates, classifies and routes inbound events.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    own_context: ContextId,
    expected_host_origin: Option<String>,
}

impl Dispatcher {
    /// `own_context` identifies the addon's own frame; events it posted are ignored.
    pub fn new(own_context: ContextId) -> Self {
        Self {
            own_context,
            expected_host_origin: None,
        }
    }

    /// Only accept pre-handshake events from `origin`. Without a pin, any origin may deliver
    /// the first handshake.
    pub fn with_expected_host_origin(mut self, origin: Option<String>) -> Self {
        self.expected_host_origin = origin;
        self
    }

    /// The addon's own frame, whose events are always dropped.
    pub fn own_context(&self) -> ContextId {
        self.own_context
    }

    /// Process one inbound event to completion.
    pub fn on_receive(
        &self,
        session: &mut Session,
        event: &InboundEvent,
        messages: &mut dyn MessageHandler,
        errors: &mut dyn ErrorHandler,
    ) -> Dispatch {
        trace!(origin = %event.origin, source = ?event.source, "received event");

        let data = match self.validate(session, event) {
            Ok(data) => data,
            Err(rejection) => return drop_event(rejection),
        };

        let envelope = match wire::decode_envelope(data) {
            Ok(envelope) => envelope,
            Err(rejection) => return drop_event(rejection),
        };

        let Some(ty) = MessageType::from_discriminant(&envelope.message_type) else {
            errors.on_error(&SdkError::UnknownMessageType {
                message_type: envelope.message_type.clone(),
                origin: event.origin.clone(),
            });
            return Dispatch::Dropped(Rejection::UnknownType(envelope.message_type));
        };

        let message = match wire::decode_message(ty, envelope) {
            Ok(message) => message,
            Err(rejection) => return drop_event(rejection),
        };

        match &message {
            AddonMessage::Init(init) => {
                if let Err(rejection) = process_handshake(session, init) {
                    return drop_event(rejection);
                }
            }
            AddonMessage::InitRequested(_)
            | AddonMessage::Data(_)
            | AddonMessage::Ready(_)
            | AddonMessage::Tooltips(_)
            | AddonMessage::Participants(_)
            | AddonMessage::MeetState(_)
            | AddonMessage::HostChanged(_)
            | AddonMessage::Reposition(_)
            | AddonMessage::UserProfile(_)
            | AddonMessage::StateActive(_)
            | AddonMessage::StateInactive(_) => {}
        }

        trace!(message_type = %ty, "routing to message handler");
        messages.on_message(&message);
        Dispatch::Routed(ty)
    }

    fn validate<'e>(
        &self,
        session: &Session,
        event: &'e InboundEvent,
    ) -> Result<&'e str, Rejection> {
        match &event.data {
            Value::Null => return Err(Rejection::EmptyData),
            Value::String(s) if s.is_empty() => return Err(Rejection::EmptyData),
            _ => {}
        }
        if event.origin.is_empty() {
            return Err(Rejection::EmptyOrigin);
        }

        if event.source == Some(self.own_context) {
            return Err(Rejection::OwnSource);
        }

        let expected = session
            .trusted_origin()
            .or(self.expected_host_origin.as_deref());
        if let Some(expected) = expected {
            if event.origin != expected {
                return Err(Rejection::UntrustedOrigin {
                    expected: expected.to_string(),
                    actual: event.origin.clone(),
                });
            }
        }

        match &event.data {
            Value::String(s) => Ok(s),
            _ => Err(Rejection::NonTextData),
        }
    }
}

/// Pin the handshake's host origin as trusted, replacing any previous one.
///
/// An empty origin is refused and leaves the session untouched.
pub fn process_handshake(session: &mut Session, init: &InitMessage) -> Result<(), Rejection> {
    debug!(origin = %init.host.origin, auth_host = %init.host.auth_host, "handshake received");
    if init.host.origin.is_empty() {
        return Err(Rejection::EmptyHostOrigin);
    }
    session.pin_origin(init.host.origin.as_str());
    Ok(())
}

fn drop_event(rejection: Rejection) -> Dispatch {
    trace!(%rejection, "dropping event");
    Dispatch::Dropped(rejection)
}
