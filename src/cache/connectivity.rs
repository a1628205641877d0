//! Connection-state machine for remote cache clients
//!
//! Connectivity is tracked as an explicit two-state machine instead of a
//! callback-mutated flag: transport-level events are applied through a single
//! transition function and the resulting state is published on a watch
//! channel, so transitions stay observable and testable in isolation.
//!
//! ```text
//! uninstantiated -> Live -> Closed (terminal)
//! ```
//!
//! `Closed` is terminal per instance. A closed client is evicted and replaced
//! with a fresh instance; it is never revived in place.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Operational state of a single backend connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The connection is usable.
    Live,
    /// The connection is permanently unusable for this instance.
    Closed,
}

/// Transport-level events reported by the connection-owning driver.
#[derive(Debug, Clone)]
pub enum ConnectivityEvent {
    /// The connection (re)established itself.
    Ready,
    /// A fatal connectivity fault (connection refused / connection dropped).
    Fatal(String),
}

fn transition(current: ConnectionState, event: &ConnectivityEvent) -> ConnectionState {
    match (current, event) {
        // Closed is terminal: no event revives this instance
        (ConnectionState::Closed, _) => ConnectionState::Closed,
        (ConnectionState::Live, ConnectivityEvent::Ready) => ConnectionState::Live,
        (ConnectionState::Live, ConnectivityEvent::Fatal(_)) => ConnectionState::Closed,
    }
}

/// Shared connectivity handle for one client instance.
///
/// Cloning shares the underlying channel, so every clone of a client observes
/// the same state.
#[derive(Debug, Clone)]
pub struct ConnectionHealth {
    tx: Arc<watch::Sender<ConnectionState>>,
    rx: watch::Receiver<ConnectionState>,
}

impl ConnectionHealth {
    /// New handle in the `Live` state.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(ConnectionState::Live);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        *self.rx.borrow()
    }

    /// True iff this instance has reached the terminal `Closed` state.
    pub fn is_closed(&self) -> bool {
        self.state() == ConnectionState::Closed
    }

    /// Apply a connectivity event and return the resulting state.
    pub fn apply(&self, event: ConnectivityEvent) -> ConnectionState {
        let current = self.state();
        let next = transition(current, &event);
        if next != current {
            match &event {
                ConnectivityEvent::Fatal(reason) => {
                    warn!(reason = %reason, "cache connection entered closed state");
                }
                ConnectivityEvent::Ready => {
                    debug!("cache connection ready");
                }
            }
            self.tx.send_replace(next);
        }
        next
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.rx.clone()
    }
}

impl Default for ConnectionHealth {
    fn default() -> Self {
        Self::new()
    }
}
