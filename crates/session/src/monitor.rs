//! Session validity monitoring.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use aula_auth::{TokenStore, validate_session};

/// Session validity as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Valid,
    Expired,
}

/// Polls the token store on a fixed interval and publishes validity.
///
/// `Valid → Expired` happens when a check finds the stored token missing,
/// malformed, or past its embedded expiry. `Expired → Valid` never happens on
/// its own: only an explicit [`SessionMonitor::reset`] after a fresh login
/// re-arms the monitor.
pub struct SessionMonitor {
    tokens: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl SessionMonitor {
    /// Build the monitor and its initial subscription. The initial state is
    /// whatever the store holds right now.
    pub fn new(tokens: Arc<dyn TokenStore>) -> (Arc<Self>, watch::Receiver<SessionState>) {
        let initial = judge(&*tokens);
        let (tx, rx) = watch::channel(initial);
        (Arc::new(Self { tokens, state: tx }), rx)
    }

    /// Currently published state.
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Run one check immediately. A check can only downgrade: once expired,
    /// the session stays expired until [`SessionMonitor::reset`].
    pub fn check_now(&self) -> SessionState {
        if self.state() == SessionState::Expired {
            return SessionState::Expired;
        }

        let next = judge(&*self.tokens);
        if next == SessionState::Expired {
            tracing::info!("session expired");
            self.state.send_replace(SessionState::Expired);
        }
        next
    }

    /// Re-judge the store from scratch after an explicit login (the one
    /// transition allowed to leave `Expired`).
    pub fn reset(&self) -> SessionState {
        let next = judge(&*self.tokens);
        self.state.send_replace(next);
        next
    }

    /// Spawn the fixed-interval polling task. The first check runs
    /// immediately, then every `poll`.
    pub fn spawn(self: &Arc<Self>, poll: Duration) -> JoinHandle<()> {
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                monitor.check_now();
            }
        })
    }
}

fn judge(tokens: &dyn TokenStore) -> SessionState {
    match validate_session(tokens.load().as_deref(), Utc::now()) {
        Ok(_) => SessionState::Valid,
        Err(reason) => {
            tracing::debug!(%reason, "stored token does not constitute a valid session");
            SessionState::Expired
        }
    }
}
