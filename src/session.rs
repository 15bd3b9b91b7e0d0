//! The single piece of mutable protocol state: which host origin is trusted.

use tracing::trace;

/// Session state owned by the SDK for the lifetime of the addon.
///
/// Starts uninitialized. Every accepted handshake pins the host origin it carries, replacing
/// any earlier one. There is no way back to uninitialized.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    trusted_origin: Option<String>,
}

impl Session {
    /// A session with no trusted origin yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trusted_origin(&self) -> Option<&str> {
        self.trusted_origin.as_deref()
    }

    /// Outbound delivery is permitted only once this is true.
    pub fn is_initialized(&self) -> bool {
        self.trusted_origin.is_some()
    }

    /// Pin `origin` as the trusted host origin.
    pub(crate) fn pin_origin(&mut self, origin: impl Into<String>) {
        let origin = origin.into();
        trace!(previous = ?self.trusted_origin, %origin, "pinning host origin");
        self.trusted_origin = Some(origin);
    }
}
