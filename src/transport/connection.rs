use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

/// Lifecycle of a sync session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Identifies one connect attempt. Background tasks of an older session
/// hold a stale id and can no longer change the state.
pub type SessionId = u64;

#[derive(Debug, Default)]
struct Inner {
    state: ConnectionState,
    session: SessionId,
}

/// Connection state machine shared by a transport and its background tasks.
///
/// ```text
/// Disconnected --begin_connect--> Connecting --connected--> Connected
///      ^                              |                        |
///      +-----------failed-------------+                        |
///      +---------------------disconnect------------------------+
/// ```
///
/// `disconnect` moves any state back to `Disconnected`. Every other
/// transition is only accepted from the state shown; a rejected transition
/// leaves the state unchanged and returns `false`.
#[derive(Debug, Default)]
pub struct Connection {
    inner: Mutex<Inner>,
}

impl Connection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.lock().state
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Starts a new session, returning its id.
    pub fn begin_connect(&self) -> Option<SessionId> {
        let mut inner = self.lock();
        if inner.state != ConnectionState::Disconnected {
            warn!(
                "rejected connection transition {:?} -> Connecting",
                inner.state
            );
            return None;
        }
        inner.session += 1;
        inner.state = ConnectionState::Connecting;
        debug!("session {} Disconnected -> Connecting", inner.session);
        Some(inner.session)
    }

    pub fn connected(&self) -> bool {
        self.transition(ConnectionState::Connecting, ConnectionState::Connected)
    }

    pub fn failed(&self) -> bool {
        self.transition(ConnectionState::Connecting, ConnectionState::Disconnected)
    }

    pub fn disconnect(&self) {
        let mut inner = self.lock();
        if inner.state != ConnectionState::Disconnected {
            debug!("session {} {:?} -> Disconnected", inner.session, inner.state);
            inner.state = ConnectionState::Disconnected;
        }
    }

    /// Disconnects only if `session` is still the current one. Returns
    /// `false` when a newer session has started since.
    pub fn end_session(&self, session: SessionId) -> bool {
        let mut inner = self.lock();
        if inner.session != session {
            debug!(
                "ignoring end of stale session {session}, current is {}",
                inner.session
            );
            return false;
        }
        if inner.state != ConnectionState::Disconnected {
            debug!("session {session} {:?} -> Disconnected", inner.state);
            inner.state = ConnectionState::Disconnected;
        }
        true
    }

    fn transition(&self, from: ConnectionState, to: ConnectionState) -> bool {
        let mut inner = self.lock();
        if inner.state != from {
            warn!("rejected connection transition {:?} -> {:?}", inner.state, to);
            return false;
        }
        debug!("session {} {from:?} -> {to:?}", inner.session);
        inner.state = to;
        true
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
