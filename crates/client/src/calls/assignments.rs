use reqwest::multipart::{Form, Part};

use aula_core::{Assignment, AssignmentId, ClassId, UserId};

use crate::api::{ApiClient, FileUpload};
use crate::error::ApiError;

/// Create/update payload for an assignment.
#[derive(Debug, Clone, Default)]
pub struct AssignmentForm {
    pub title: String,
    pub description: String,
    /// Free-form date string, passed through as entered.
    pub due_date: String,
    pub attachment: Option<FileUpload>,
}

impl AssignmentForm {
    fn into_multipart(self) -> Form {
        let mut form = Form::new()
            .text("title", self.title)
            .text("description", self.description)
            .text("due_date", self.due_date);
        if let Some(file) = self.attachment {
            form = form.part("attachment", Part::bytes(file.bytes).file_name(file.file_name));
        }
        form
    }
}

impl ApiClient {
    /// All assignments in a class (teacher/admin view).
    pub async fn assignments(&self, class: ClassId) -> Result<Vec<Assignment>, ApiError> {
        self.get_json(&format!("/assignments/{class}")).await
    }

    /// Assignments in a class scoped to one user (student view).
    pub async fn assignments_by_user(
        &self,
        class: ClassId,
        user: UserId,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get_json(&format!("/assignments/{class}/{user}")).await
    }

    pub async fn create_assignment(
        &self,
        class: ClassId,
        form: AssignmentForm,
    ) -> Result<(), ApiError> {
        self.post_multipart(&format!("/assignment/{class}"), form.into_multipart())
            .await
    }

    pub async fn update_assignment(
        &self,
        class: ClassId,
        id: AssignmentId,
        form: AssignmentForm,
    ) -> Result<(), ApiError> {
        self.put_multipart(&format!("/{class}/assignment/{id}"), form.into_multipart())
            .await
    }

    pub async fn delete_assignment(&self, id: AssignmentId) -> Result<(), ApiError> {
        self.delete(&format!("/assignment/{id}")).await
    }

    /// Upload a student's submission file for an assignment.
    pub async fn upload_submission(
        &self,
        assignment: AssignmentId,
        file: FileUpload,
    ) -> Result<(), ApiError> {
        let form = Form::new()
            .part("file", Part::bytes(file.bytes).file_name(file.file_name))
            .text("assignment_id", assignment.to_string());
        self.post_multipart("/upload-assignment", form).await
    }
}
