use serde::{Deserialize, Serialize};

use aula_core::{Class, ClassId, UserId};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Create/update payload for a class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassForm {
    pub name: String,
    #[serde(rename = "jadwal_kelas")]
    pub schedule: String,
    pub teacher: String,
    pub class_code: String,
}

#[derive(Serialize)]
struct JoinRequest<'a> {
    class_code: &'a str,
}

#[derive(Deserialize)]
struct ClassCountResponse {
    class_count: String,
}

#[derive(Deserialize)]
struct AssignmentCountResponse {
    #[serde(rename = "assignment")]
    count: String,
}

impl ApiClient {
    pub async fn classes(&self) -> Result<Vec<Class>, ApiError> {
        self.get_json("/classes").await
    }

    /// Classes the given student has joined.
    pub async fn classes_by_student(&self, student: UserId) -> Result<Vec<Class>, ApiError> {
        self.get_json(&format!("/classes/student/{student}")).await
    }

    pub async fn class_by_id(&self, id: ClassId) -> Result<Class, ApiError> {
        self.get_json(&format!("/class/{id}")).await
    }

    pub async fn create_class(&self, form: &ClassForm) -> Result<(), ApiError> {
        self.post_json("/class", form).await
    }

    pub async fn update_class(&self, id: ClassId, form: &ClassForm) -> Result<(), ApiError> {
        self.put_json(&format!("/class/{id}"), form).await
    }

    pub async fn delete_class(&self, id: ClassId) -> Result<(), ApiError> {
        self.delete(&format!("/class/{id}")).await
    }

    pub async fn join_class(&self, id: ClassId, class_code: &str) -> Result<(), ApiError> {
        self.post_json(&format!("/class/{id}/join"), &JoinRequest { class_code })
            .await
    }

    /// Number of classes the user belongs to.
    ///
    /// The backend returns the count as a JSON *string*; garbage is a decode
    /// error, not a silent zero.
    pub async fn class_count(&self, user: UserId) -> Result<u64, ApiError> {
        let resp: ClassCountResponse = self.get_json(&format!("/classes/count/{user}")).await?;
        resp.class_count
            .parse()
            .map_err(|e| ApiError::Decode(format!("class_count: {e}")))
    }

    /// Number of assignments tied to the user.
    pub async fn assignment_count(&self, user: UserId) -> Result<u64, ApiError> {
        let resp: AssignmentCountResponse =
            self.get_json(&format!("/assignments/count/{user}")).await?;
        resp.count
            .parse()
            .map_err(|e| ApiError::Decode(format!("assignment count: {e}")))
    }
}
