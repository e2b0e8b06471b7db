use serde::Serialize;

use aula_core::{ClassId, Member, UserId};

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct RemoveMember {
    user_id: UserId,
}

impl ApiClient {
    /// Class roster. The endpoint wraps the list in an envelope.
    pub async fn members(&self, class: ClassId) -> Result<Vec<Member>, ApiError> {
        self.get_enveloped(&format!("/class/{class}/members")).await
    }

    /// Remove a member from a class roster (the endpoint takes the user id in
    /// the request body).
    pub async fn remove_member(&self, class: ClassId, user: UserId) -> Result<(), ApiError> {
        self.delete_json(&format!("/class/{class}/members"), &RemoveMember { user_id: user })
            .await
    }
}
