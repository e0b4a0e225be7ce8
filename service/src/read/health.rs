//! Backend health read definitions.

use strum::{AsRefStr, Display, IntoStaticStr};

/// Reachability of the storage backend.
#[derive(
    AsRefStr, Clone, Copy, Debug, Display, Eq, Hash, IntoStaticStr, PartialEq,
)]
#[strum(serialize_all = "snake_case")]
pub enum Backend {
    /// Backend answered the health check.
    Connected,

    /// Backend is configured, but failed to answer the health check.
    Error,

    /// Backend is not configured at all.
    Unknown,
}

impl Backend {
    /// Indicates whether the backend is usable.
    #[must_use]
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}
