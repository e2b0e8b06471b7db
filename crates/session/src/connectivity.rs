//! Backend reachability monitoring.
//!
//! Runs independently of the session monitor on its own interval. The shell
//! shows a persistent banner while offline; when connectivity returns it
//! shows a transient notice and reloads the current route, since page state
//! cached across an outage is assumed stale.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Connectivity as seen by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    Online,
    Offline,
}

/// How the monitor decides whether the backend is reachable.
pub trait ConnectivityProbe {
    fn is_reachable(&self) -> impl Future<Output = bool> + Send;
}

/// Production probe: a cheap GET against the backend base URL. Any HTTP
/// response at all counts as reachable; only transport failure is offline.
pub struct HttpProbe {
    http: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: base_url.into(),
        }
    }
}

impl ConnectivityProbe for HttpProbe {
    async fn is_reachable(&self) -> bool {
        self.http.get(&self.url).send().await.is_ok()
    }
}

pub struct ConnectivityMonitor;

impl ConnectivityMonitor {
    /// Spawn the polling task. The published state starts `Online`
    /// (optimistic, like a freshly loaded page) and flips on probe
    /// transitions.
    pub fn spawn<P>(probe: P, poll: Duration) -> (watch::Receiver<ConnectivityState>, JoinHandle<()>)
    where
        P: ConnectivityProbe + Send + Sync + 'static,
    {
        let (tx, rx) = watch::channel(ConnectivityState::Online);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let next = if probe.is_reachable().await {
                    ConnectivityState::Online
                } else {
                    ConnectivityState::Offline
                };

                // Publish transitions only; steady state stays quiet.
                if *tx.borrow() == next {
                    continue;
                }
                tx.send_replace(next);
                match next {
                    ConnectivityState::Offline => {
                        tracing::warn!("backend unreachable; entering offline mode")
                    }
                    ConnectivityState::Online => tracing::info!("connectivity restored"),
                }
            }
        });

        (rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FlagProbe(Arc<AtomicBool>);

    impl ConnectivityProbe for FlagProbe {
        async fn is_reachable(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    const POLL: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn starts_online_and_flips_on_probe_failure() {
        let reachable = Arc::new(AtomicBool::new(true));
        let (mut rx, _task) = ConnectivityMonitor::spawn(FlagProbe(reachable.clone()), POLL);

        assert_eq!(*rx.borrow(), ConnectivityState::Online);

        reachable.store(false, Ordering::SeqCst);
        tokio::time::timeout(POLL * 2, rx.changed())
            .await
            .expect("no transition within one probe interval")
            .unwrap();
        assert_eq!(*rx.borrow(), ConnectivityState::Offline);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_when_probe_succeeds_again() {
        let reachable = Arc::new(AtomicBool::new(false));
        let (mut rx, _task) = ConnectivityMonitor::spawn(FlagProbe(reachable.clone()), POLL);

        tokio::time::timeout(POLL * 2, rx.changed()).await.unwrap().unwrap();
        assert_eq!(*rx.borrow(), ConnectivityState::Offline);

        reachable.store(true, Ordering::SeqCst);
        tokio::time::timeout(POLL * 2, rx.changed()).await.unwrap().unwrap();
        assert_eq!(*rx.borrow(), ConnectivityState::Online);
    }
}
