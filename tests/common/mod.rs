#![allow(dead_code)]

use addons_sdk::{
    AddonMessage, AddonsSdk, ContextId, InboundEvent, MemoryTransport, SdkConfig, SdkError,
};
use std::{cell::RefCell, collections::HashMap, env, rc::Rc};

pub const ADDON: ContextId = ContextId(1);
pub const HOST: ContextId = ContextId(2);
pub const HOST_ORIGIN: &str = "https://host.example";

/// An SDK over a [`MemoryTransport`] whose handlers record everything they see.
pub struct Harness {
    pub sdk: AddonsSdk<MemoryTransport>,
    pub transport: MemoryTransport,
    pub messages: Rc<RefCell<Vec<AddonMessage>>>,
    pub errors: Rc<RefCell<Vec<String>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(SdkConfig::default())
    }

    pub fn with_config(config: SdkConfig) -> Self {
        let transport = MemoryTransport::new();
        let messages = Rc::new(RefCell::new(Vec::new()));
        let errors = Rc::new(RefCell::new(Vec::new()));

        let seen = Rc::clone(&messages);
        let reported = Rc::clone(&errors);
        let sdk = AddonsSdk::builder(transport.clone(), ADDON)
            .config(config)
            .on_message(move |msg: &AddonMessage| seen.borrow_mut().push(msg.clone()))
            .on_error(move |err: &SdkError| reported.borrow_mut().push(err.to_string()))
            .build();

        Self {
            sdk,
            transport,
            messages,
            errors,
        }
    }

    /// Run a handshake from the host announcing `origin`, posted from `origin` itself.
    pub fn initialize(&mut self, origin: &str) {
        let dispatch = self.sdk.on_receive(&handshake_event(origin, origin));
        assert!(dispatch.is_routed(), "handshake rejected: {dispatch:?}");
    }

    pub fn message_count(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.borrow().len()
    }
}

pub fn handshake_json(host_origin: &str) -> String {
    serde_json::json!({
        "type": "meet-sync-init",
        "host": { "origin": host_origin },
        "mode": "normal"
    })
    .to_string()
}

/// A handshake announcing `host_origin`, delivered with event origin `event_origin`.
pub fn handshake_event(event_origin: &str, host_origin: &str) -> InboundEvent {
    InboundEvent::text(HOST, event_origin, handshake_json(host_origin))
}

pub fn host_event(data: &str) -> InboundEvent {
    InboundEvent::text(HOST, HOST_ORIGIN, data)
}

/// Env guard that restores previous env vars on drop.
pub struct EnvGuard {
    old: HashMap<String, Option<String>>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, Option<&str>)]) -> Self {
        let mut old = HashMap::new();
        for (k, v) in vars {
            old.insert((*k).to_string(), env::var(k).ok());
            match v {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
        Self { old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, prev) in self.old.drain() {
            match prev {
                Some(v) => env::set_var(k, v),
                None => env::remove_var(k),
            }
        }
    }
}
