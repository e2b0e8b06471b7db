use serde::Serialize;

use aula_core::{ClassId, ReportRow, UserId};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Grade entry payload (teacher/admin).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GradeForm {
    pub user_id: UserId,
    pub class_id: ClassId,
    pub grade: u32,
}

impl ApiClient {
    /// A student's report: one row per graded class.
    pub async fn report(&self, user: UserId) -> Result<Vec<ReportRow>, ApiError> {
        self.get_json(&format!("/rapot/{user}")).await
    }

    pub async fn submit_grade(&self, form: &GradeForm) -> Result<(), ApiError> {
        self.post_json("/grades", form).await
    }
}
