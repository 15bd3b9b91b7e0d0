//! Capabilities the consuming application plugs into the SDK.
//!
//! Both traits are implemented for closures, so most addons pass a closure to
//! [`AddonsSdkBuilder`](crate::AddonsSdkBuilder) instead of writing a type.

use crate::error::SdkError;
use crate::messages::AddonMessage;
use tracing::{error, trace};

/// Receives every message the dispatcher accepted, handshake included.
pub trait MessageHandler {
    fn on_message(&mut self, message: &AddonMessage);
}

impl<F> MessageHandler for F
where
    F: FnMut(&AddonMessage),
{
    fn on_message(&mut self, message: &AddonMessage) {
        self(message)
    }
}

/// Receives error reports: unknown message types, sends before initialization and outbound
/// failures.
pub trait ErrorHandler {
    fn on_error(&mut self, error: &SdkError);
}

impl<F> ErrorHandler for F
where
    F: FnMut(&SdkError),
{
    fn on_error(&mut self, error: &SdkError) {
        self(error)
    }
}

/// Default message handler: traces and discards.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMessageHandler;

impl MessageHandler for NoopMessageHandler {
    fn on_message(&mut self, message: &AddonMessage) {
        trace!(message_type = %message.message_type(), "no message handler installed");
    }
}

/// Default error handler: emits an error-level tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorHandler;

impl ErrorHandler for TracingErrorHandler {
    fn on_error(&mut self, err: &SdkError) {
        match err {
            SdkError::UnknownMessageType {
                message_type,
                origin,
            } => error!(%message_type, %origin, "{err}"),
            _ => error!("{err}"),
        }
    }
}
