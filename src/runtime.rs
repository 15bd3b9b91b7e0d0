//! Async embedding: channel-backed transport and an inbound event loop.
//!
//! Useful when the messaging primitive lives on the other side of a channel (a bridge task, a
//! webview callback, a test harness). The SDK itself stays synchronous; the loop just awaits the
//! next event and hands it over, one at a time, in arrival order.
//!
//! ```no_run
//! use addons_sdk::runtime::{channel, event_loop};
//! use addons_sdk::{AddonsSdk, ContextId, InboundEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let (transport, mut outbound) = channel();
//!     let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<InboundEvent>();
//!
//!     let mut sdk = AddonsSdk::new(transport, ContextId(1));
//!     sdk.announce_ready().unwrap();
//!     let ready = outbound.recv().await.unwrap();
//!     eprintln!("post {} to {}", ready.data, ready.target);
//!
//!     drop(inbound_tx); // a real bridge keeps this alive and forwards frame events into it
//!     event_loop(&mut sdk, inbound_rx).await;
//! }
//! ```

use crate::error::TransportError;
use crate::sdk::AddonsSdk;
use crate::transport::{InboundEvent, PostedMessage, TargetOrigin, Transport};
use tokio::sync::mpsc;
use tracing::debug;

/// Transport that forwards every post into an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<PostedMessage>,
}

impl Transport for ChannelTransport {
    fn post(&self, data: String, target: &TargetOrigin) -> Result<(), TransportError> {
        self.tx
            .send(PostedMessage {
                data,
                target: target.clone(),
            })
            .map_err(|_| TransportError::Closed)
    }
}

/// A [`ChannelTransport`] and the receiver that sees everything posted through it.
pub fn channel() -> (ChannelTransport, mpsc::UnboundedReceiver<PostedMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelTransport { tx }, rx)
}

/// Feed inbound events to `sdk` until every sender of `inbound` is dropped.
///
/// Returns the number of events that were routed to the message handler.
pub async fn event_loop<T: Transport>(
    sdk: &mut AddonsSdk<T>,
    mut inbound: mpsc::UnboundedReceiver<InboundEvent>,
) -> usize {
    let mut routed = 0;
    while let Some(event) = inbound.recv().await {
        if sdk.on_receive(&event).is_routed() {
            routed += 1;
        }
    }
    debug!(routed, "inbound channel closed");
    routed
}
