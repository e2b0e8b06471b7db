//! Login page.

use aula_client::ApiClient;
use aula_core::DomainResult;
use aula_core::validate::require;
use aula_session::SessionMonitor;

use crate::routes::Route;
use crate::surface::{Surface, SurfaceLog};

/// Username/password form. The expired-session modal is never shown here;
/// the shell suppresses it while this route is current.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub username: String,
    pub password: String,
    surfaces: SurfaceLog,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(&self) -> DomainResult<()> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        Ok(())
    }

    /// Validate, exchange credentials, persist the token, and re-arm the
    /// session monitor. Returns the route to navigate to on success.
    pub async fn submit(&mut self, client: &ApiClient, monitor: &SessionMonitor) -> Option<Route> {
        if let Err(err) = self.validate() {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return None;
        }

        let token = match client.login(&self.username, &self.password).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "login rejected");
                self.surfaces.push(Surface::ErrorDialog(
                    "Login failed. Check your username and password.".to_string(),
                ));
                return None;
            }
        };

        if let Err(err) = client.tokens().save(&token) {
            tracing::error!(error = %err, "failed to persist session token");
            self.surfaces.push(Surface::ErrorDialog(
                "Could not store the session token.".to_string(),
            ));
            return None;
        }

        monitor.reset();
        Some(Route::Dashboard)
    }

    pub fn surfaces(&mut self) -> &mut SurfaceLog {
        &mut self.surfaces
    }
}
