//! The seam between the SDK and the cross-frame messaging primitive.
//!
//! The SDK never talks to a browser API directly. Embedders implement [`Transport`] for
//! whatever delivers text to the parent frame, and push every received event into
//! [`AddonsSdk::on_receive`](crate::AddonsSdk::on_receive).

use crate::error::TransportError;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identity of an execution context (a window/frame) taking part in messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

/// Where a post is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOrigin {
    /// `*`: any origin, no confidentiality guarantee.
    Any,
    /// Exactly this origin.
    Exact(String),
}

impl fmt::Display for TargetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetOrigin::Any => f.write_str("*"),
            TargetOrigin::Exact(origin) => f.write_str(origin),
        }
    }
}

/// An event delivered by the messaging primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    /// Sending context, when the primitive exposes one.
    pub source: Option<ContextId>,
    /// Origin declared by the primitive for the sender.
    pub origin: String,
    /// Posted data. Protocol messages are always JSON text, so anything but a string is
    /// rejected.
    pub data: Value,
}

impl InboundEvent {
    /// A text event, the only kind that can carry a protocol message.
    pub fn text(source: ContextId, origin: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            source: Some(source),
            origin: origin.into(),
            data: Value::String(data.into()),
        }
    }
}

/// Delivers serialized messages to the host frame.
pub trait Transport {
    fn post(&self, data: String, target: &TargetOrigin) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, data: String, target: &TargetOrigin) -> Result<(), TransportError> {
        (**self).post(data, target)
    }
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn post(&self, data: String, target: &TargetOrigin) -> Result<(), TransportError> {
        (**self).post(data, target)
    }
}

/// One post handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub data: String,
    pub target: TargetOrigin,
}

/// In-memory transport that records every post.
///
/// Clones share the same log, so a test can keep one handle and give another to the SDK.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    posted: Rc<RefCell<Vec<PostedMessage>>>,
    closed: Rc<Cell<bool>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything posted so far, oldest first.
    pub fn posted(&self) -> Vec<PostedMessage> {
        self.posted.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<PostedMessage> {
        std::mem::take(&mut *self.posted.borrow_mut())
    }

    /// Make every later post fail with [`TransportError::Closed`].
    pub fn close(&self) {
        self.closed.set(true);
    }
}

impl Transport for MemoryTransport {
    fn post(&self, data: String, target: &TargetOrigin) -> Result<(), TransportError> {
        if self.closed.get() {
            return Err(TransportError::Closed);
        }
        self.posted.borrow_mut().push(PostedMessage {
            data,
            target: target.clone(),
        });
        Ok(())
    }
}
