use serde::{Deserialize, Serialize};

use aula_auth::{Role, SessionClaims};
use aula_core::resource::RoleCounts;

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// New-user registration payload (admin screen).
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl ApiClient {
    /// Exchange credentials for a session token. Persisting it is the
    /// caller's job; the client never writes the store.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let resp: LoginResponse = self
            .post_json_returning("/login", &Credentials { username, password })
            .await?;
        Ok(resp.token)
    }

    pub async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.post_json("/register", registration).await
    }

    /// Server-side introspection of the current token's claims.
    pub async fn token_claims(&self) -> Result<SessionClaims, ApiError> {
        self.get_json("/get-token-claims").await
    }

    /// User counts per role, for the admin dashboard cards.
    pub async fn role_counts(&self) -> Result<RoleCounts, ApiError> {
        self.get_json("/roles/count").await
    }
}
