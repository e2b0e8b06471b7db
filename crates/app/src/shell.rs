//! Application shell: route state, monitor subscriptions, surface policy.

use std::sync::Arc;

use tokio::sync::watch;

use aula_auth::TokenStore;
use aula_session::{ConnectivityState, SessionState};

use crate::routes::Route;
use crate::scope::MountScope;
use crate::surface::Surface;

/// Top-level chrome around whichever page is mounted.
///
/// The shell owns the current route, the per-mount task scope, and the
/// policy for monitor-driven surfaces: the session-expired modal is
/// suppressed while the login route is current, the offline banner persists
/// while the backend is unreachable, and a restored connection triggers a
/// transient notice plus a full reload of the current route (page state
/// cached across an outage is assumed stale).
pub struct Shell {
    route: Route,
    session_rx: watch::Receiver<SessionState>,
    connectivity_rx: watch::Receiver<ConnectivityState>,
    last_connectivity: ConnectivityState,
    tokens: Arc<dyn TokenStore>,
    scope: MountScope,
    generation: u64,
}

impl Shell {
    pub fn new(
        session_rx: watch::Receiver<SessionState>,
        connectivity_rx: watch::Receiver<ConnectivityState>,
        tokens: Arc<dyn TokenStore>,
        initial: Route,
    ) -> Self {
        Self {
            route: initial,
            session_rx,
            connectivity_rx,
            last_connectivity: ConnectivityState::Online,
            tokens,
            scope: MountScope::new(),
            generation: 0,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Tasks spawned for the current mount; replaced (and the old ones
    /// aborted) on every navigation or reload.
    pub fn scope(&mut self) -> &mut MountScope {
        &mut self.scope
    }

    /// Bumped on every mount; pages that somehow outlive a reload can use it
    /// to detect they are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::info!(from = %self.route, to = %route, "navigating");
        self.route = route;
        self.remount();
    }

    /// Remount the current route from scratch.
    pub fn reload(&mut self) {
        tracing::info!(route = %self.route, "reloading");
        self.remount();
    }

    fn remount(&mut self) {
        self.scope = MountScope::new();
        self.generation += 1;
    }

    /// Surfaces the shell itself wants shown right now, derived from the
    /// monitor states. Call once per frame/tick.
    pub fn poll_surfaces(&mut self) -> Vec<Surface> {
        let mut surfaces = Vec::new();

        let session = *self.session_rx.borrow_and_update();
        if session == SessionState::Expired && self.route != Route::Login {
            surfaces.push(Surface::SessionExpiredModal);
        }

        let connectivity = *self.connectivity_rx.borrow_and_update();
        if connectivity == ConnectivityState::Offline {
            surfaces.push(Surface::OfflineBanner);
        }
        if self.last_connectivity == ConnectivityState::Offline
            && connectivity == ConnectivityState::Online
        {
            surfaces.push(Surface::BackOnlineNotice);
            self.reload();
        }
        self.last_connectivity = connectivity;

        surfaces
    }

    /// The expired modal's one action: drop the stored token and go to the
    /// login page.
    pub fn redirect_to_login(&mut self) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!(error = %err, "failed to clear stored session token");
        }
        self.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_auth::MemoryTokenStore;

    struct Monitors {
        session_tx: watch::Sender<SessionState>,
        connectivity_tx: watch::Sender<ConnectivityState>,
    }

    fn shell_at(route: Route) -> (Shell, Monitors, Arc<MemoryTokenStore>) {
        let (session_tx, session_rx) = watch::channel(SessionState::Valid);
        let (connectivity_tx, connectivity_rx) = watch::channel(ConnectivityState::Online);
        let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
        let shell = Shell::new(session_rx, connectivity_rx, tokens.clone(), route);
        (
            shell,
            Monitors {
                session_tx,
                connectivity_tx,
            },
            tokens,
        )
    }

    #[test]
    fn expired_modal_shows_on_ordinary_routes() {
        let (mut shell, monitors, _tokens) = shell_at(Route::Dashboard);

        assert!(shell.poll_surfaces().is_empty());
        monitors.session_tx.send_replace(SessionState::Expired);
        assert_eq!(shell.poll_surfaces(), vec![Surface::SessionExpiredModal]);
    }

    #[test]
    fn expired_modal_is_suppressed_on_the_login_route() {
        let (mut shell, monitors, _tokens) = shell_at(Route::Login);

        monitors.session_tx.send_replace(SessionState::Expired);
        assert!(shell.poll_surfaces().is_empty());

        // Leaving the login route un-suppresses it.
        shell.navigate(Route::Dashboard);
        assert_eq!(shell.poll_surfaces(), vec![Surface::SessionExpiredModal]);
    }

    #[test]
    fn offline_banner_persists_until_reconnect() {
        let (mut shell, monitors, _tokens) = shell_at(Route::Dashboard);

        monitors
            .connectivity_tx
            .send_replace(ConnectivityState::Offline);
        assert_eq!(shell.poll_surfaces(), vec![Surface::OfflineBanner]);
        // Still offline next poll: banner again (persistent, not one-shot).
        assert_eq!(shell.poll_surfaces(), vec![Surface::OfflineBanner]);
    }

    #[test]
    fn reconnect_shows_transient_notice_and_reloads_once() {
        let (mut shell, monitors, _tokens) = shell_at(Route::Classes);
        let before = shell.generation();

        monitors
            .connectivity_tx
            .send_replace(ConnectivityState::Offline);
        shell.poll_surfaces();

        monitors
            .connectivity_tx
            .send_replace(ConnectivityState::Online);
        assert_eq!(shell.poll_surfaces(), vec![Surface::BackOnlineNotice]);
        assert_eq!(shell.generation(), before + 1);

        // Steady online state afterwards: nothing further.
        assert!(shell.poll_surfaces().is_empty());
        assert_eq!(shell.generation(), before + 1);
    }

    #[test]
    fn redirecting_to_login_clears_the_token() {
        let (mut shell, _monitors, tokens) = shell_at(Route::Dashboard);

        shell.redirect_to_login();
        assert_eq!(shell.route(), &Route::Login);
        assert_eq!(tokens.load(), None);
    }

    #[test]
    fn navigation_replaces_the_mount_scope() {
        let (mut shell, _monitors, _tokens) = shell_at(Route::Dashboard);
        let before = shell.generation();
        shell.navigate(Route::Forum);
        assert_eq!(shell.generation(), before + 1);
        assert_eq!(shell.scope().task_count(), 0);
    }
}
