use reqwest::multipart::{Form, Part};

use aula_core::{ClassId, Material, MaterialId};

use crate::api::{ApiClient, FileUpload};
use crate::error::ApiError;

/// Create/update payload for a material.
///
/// Sent as multipart so an attachment can ride along with the text fields.
#[derive(Debug, Clone, Default)]
pub struct MaterialForm {
    pub title: String,
    pub content: String,
    pub attachment: Option<FileUpload>,
}

impl MaterialForm {
    fn into_multipart(self) -> Form {
        let mut form = Form::new()
            .text("title", self.title)
            .text("content", self.content);
        if let Some(file) = self.attachment {
            form = form.part("attachment", Part::bytes(file.bytes).file_name(file.file_name));
        }
        form
    }
}

impl ApiClient {
    /// Materials for a class (bare list; callers order it for display).
    pub async fn materials(&self, class: ClassId) -> Result<Vec<Material>, ApiError> {
        self.get_json(&format!("/materials/{class}")).await
    }

    pub async fn material_by_id(
        &self,
        class: ClassId,
        id: MaterialId,
    ) -> Result<Material, ApiError> {
        self.get_json(&format!("/{class}/material/{id}")).await
    }

    pub async fn create_material(
        &self,
        class: ClassId,
        form: MaterialForm,
    ) -> Result<(), ApiError> {
        self.post_multipart(&format!("/material/{class}"), form.into_multipart())
            .await
    }

    pub async fn update_material(
        &self,
        class: ClassId,
        id: MaterialId,
        form: MaterialForm,
    ) -> Result<(), ApiError> {
        self.put_multipart(&format!("/{class}/material/{id}"), form.into_multipart())
            .await
    }

    pub async fn delete_material(&self, id: MaterialId) -> Result<(), ApiError> {
        self.delete(&format!("/material/{id}")).await
    }
}
