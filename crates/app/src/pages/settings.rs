//! Settings: identity card, logout, admin user registration.

use aula_auth::{Role, SessionClaims};
use aula_client::{ApiClient, Registration};
use aula_core::resource::RoleCounts;
use aula_core::validate::require;
use aula_core::{DomainResult, UserId};

use crate::fetch::Slot;
use crate::routes::Route;
use crate::surface::{Surface, SurfaceLog};

pub struct SettingsPage {
    claims: SessionClaims,
    role_counts: Slot<RoleCounts>,
    surfaces: SurfaceLog,
}

impl SettingsPage {
    pub fn new(claims: SessionClaims) -> Self {
        Self {
            claims,
            role_counts: Slot::empty(),
            surfaces: SurfaceLog::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }

    pub fn user_id(&self) -> UserId {
        self.claims.id
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Admins also see the user-count-by-role cards here.
    pub async fn load(&mut self, client: &ApiClient) {
        if self.claims.role != Role::Admin {
            return;
        }

        let id = self.role_counts.begin();
        match client.role_counts().await {
            Ok(counts) => {
                self.role_counts.resolve(id, counts);
            }
            Err(err) => tracing::error!(error = %err, "failed to fetch user counts"),
        }
    }

    pub fn role_counts(&self) -> Option<&RoleCounts> {
        self.role_counts.get()
    }

    /// Drop the stored token and head to the login page.
    pub fn logout(&mut self, client: &ApiClient) -> Route {
        if let Err(err) = client.tokens().clear() {
            tracing::warn!(error = %err, "failed to clear session token");
        }
        Route::Login
    }

    /// Admin-only: register a new user, then refresh the role counts.
    pub async fn register(&mut self, client: &ApiClient, registration: Registration) {
        if !self.claims.role.can_register_users() {
            self.surfaces.push(Surface::ErrorDialog(
                "Only admins can register users.".to_string(),
            ));
            return;
        }

        if let Err(err) = validate_registration(&registration) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.register(&registration).await {
            Ok(()) => {
                self.load(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("User registered.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to register user"),
        }
    }

    pub fn surfaces(&mut self) -> &mut SurfaceLog {
        &mut self.surfaces
    }
}

fn validate_registration(registration: &Registration) -> DomainResult<()> {
    require("username", &registration.username)?;
    require("password", &registration.password)?;
    Ok(())
}
