use crate::config::SdkConfig;
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::gateway::Gateway;
use crate::handler::{ErrorHandler, MessageHandler, NoopMessageHandler, TracingErrorHandler};
use crate::messages::AddonMessage;
use crate::session::Session;
use crate::transport::{ContextId, InboundEvent, Transport};
use crate::Result;
use tracing::debug;

/// The addon's messaging endpoint.
///
/// Construct one at startup, feed it every event the messaging primitive delivers through
/// [`on_receive`](Self::on_receive), and post through [`send`](Self::send). It owns the
/// session, so there is exactly one trusted host origin per instance.
pub struct AddonsSdk<T: Transport> {
    config: SdkConfig,
    session: Session,
    dispatcher: Dispatcher,
    gateway: Gateway<T>,
    on_message: Box<dyn MessageHandler>,
    on_error: Box<dyn ErrorHandler>,
}

impl<T: Transport> AddonsSdk<T> {
    /// An SDK with default config and handlers.
    pub fn new(transport: T, own_context: ContextId) -> Self {
        Self::builder(transport, own_context).build()
    }

    pub fn builder(transport: T, own_context: ContextId) -> AddonsSdkBuilder<T> {
        AddonsSdkBuilder {
            transport,
            own_context,
            config: SdkConfig::default(),
            on_message: None,
            on_error: None,
        }
    }

    /// Validate, classify and route one inbound event.
    ///
    /// Never fails: rejected events are dropped and described by the returned [`Dispatch`].
    pub fn on_receive(&mut self, event: &InboundEvent) -> Dispatch {
        self.dispatcher.on_receive(
            &mut self.session,
            event,
            &mut *self.on_message,
            &mut *self.on_error,
        )
    }

    /// Post `message` to the trusted host origin. Errors are also reported to the error
    /// handler.
    pub fn send(&mut self, message: &AddonMessage) -> Result<()> {
        let result = self.gateway.send(&self.session, message);
        self.report(result)
    }

    /// Post a data message carrying `payload`.
    pub fn send_data(&mut self, payload: impl Into<String>) -> Result<()> {
        self.send(&AddonMessage::data(payload))
    }

    /// Ask the host to initialize the addon again (e.g. the token expired).
    pub fn request_reinit(&mut self) -> Result<()> {
        let result = self.gateway.request_reinit(&self.session);
        self.report(result)
    }

    /// Announce readiness to the embedding frame, addressed to `*`.
    pub fn announce_ready(&mut self) -> Result<()> {
        let result = self.gateway.announce_ready();
        self.report(result)
    }

    pub fn set_message_handler(&mut self, handler: impl MessageHandler + 'static) {
        self.on_message = Box::new(handler);
    }

    pub fn set_error_handler(&mut self, handler: impl ErrorHandler + 'static) {
        self.on_error = Box::new(handler);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_initialized()
    }

    pub fn trusted_origin(&self) -> Option<&str> {
        self.session.trusted_origin()
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        self.gateway.transport()
    }

    fn report(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = &result {
            self.on_error.on_error(err);
        }
        result
    }
}

/// Builder for [`AddonsSdk`]; handlers are injected here rather than patched in later.
pub struct AddonsSdkBuilder<T: Transport> {
    transport: T,
    own_context: ContextId,
    config: SdkConfig,
    on_message: Option<Box<dyn MessageHandler>>,
    on_error: Option<Box<dyn ErrorHandler>>,
}

impl<T: Transport> AddonsSdkBuilder<T> {
    pub fn config(mut self, config: SdkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_message(mut self, handler: impl MessageHandler + 'static) -> Self {
        self.on_message = Some(Box::new(handler));
        self
    }

    pub fn on_error(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> AddonsSdk<T> {
        let dispatcher = Dispatcher::new(self.own_context)
            .with_expected_host_origin(self.config.expected_host_origin.clone());
        debug!(
            own_context = ?self.own_context,
            pinned = ?self.config.expected_host_origin,
            "observing messages"
        );
        AddonsSdk {
            config: self.config,
            session: Session::new(),
            dispatcher,
            gateway: Gateway::new(self.transport),
            on_message: self
                .on_message
                .unwrap_or_else(|| Box::new(NoopMessageHandler)),
            on_error: self
                .on_error
                .unwrap_or_else(|| Box::new(TracingErrorHandler)),
        }
    }
}
