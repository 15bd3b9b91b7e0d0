use crate::error::SdkError;
use crate::messages::AddonMessage;
use crate::session::Session;
use crate::transport::{TargetOrigin, Transport};
use crate::wire::encode_message;
use crate::Result;
use tracing::debug;

/// The only path by which the addon posts messages to the host.
///
/// Everything except the ready announcement requires an initialized [`Session`] and is
/// addressed to its trusted origin exactly.
#[derive(Debug, Clone)]
pub struct Gateway<T> {
    transport: T,
}

impl<T: Transport> Gateway<T> {
    /// Post through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Serialize `message` and post it to the trusted host origin.
    ///
    /// Fails with [`SdkError::NotReady`], without touching the transport, until a handshake
    /// has pinned an origin.
    pub fn send(&self, session: &Session, message: &AddonMessage) -> Result<()> {
        let origin = session.trusted_origin().ok_or(SdkError::NotReady)?;
        let text = encode_message(message)?;
        debug!(message_type = %message.message_type(), %origin, "sending message");
        self.transport
            .post(text, &TargetOrigin::Exact(origin.to_string()))?;
        Ok(())
    }

    /// Ask the host for a fresh handshake, e.g. after the token expired.
    pub fn request_reinit(&self, session: &Session) -> Result<()> {
        self.send(session, &AddonMessage::init_request())
    }

    /// Tell whoever embeds the frame that the addon is listening.
    ///
    /// This is the one message sent before trust exists, so it goes to `*`.
    pub fn announce_ready(&self) -> Result<()> {
        let text = encode_message(&AddonMessage::ready())?;
        debug!("announcing ready to *");
        self.transport.post(text, &TargetOrigin::Any)?;
        Ok(())
    }
}
