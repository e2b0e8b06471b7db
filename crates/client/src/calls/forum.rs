use serde::Serialize;

use aula_core::{Comment, CommentId, ForumId, ForumPost};

use crate::api::ApiClient;
use crate::error::ApiError;

/// New forum post. Author fields come from the decoded session claims.
#[derive(Debug, Clone, Serialize)]
pub struct ForumPostForm {
    pub title: String,
    pub content: String,
    pub author: String,
    pub author_role: String,
}

/// New comment under a post.
#[derive(Debug, Clone, Serialize)]
pub struct CommentForm {
    pub content: String,
    pub author: String,
    pub author_role: String,
}

impl ApiClient {
    /// All forum posts (enveloped list).
    pub async fn forums(&self) -> Result<Vec<ForumPost>, ApiError> {
        self.get_enveloped("/forums").await
    }

    pub async fn create_forum(&self, form: &ForumPostForm) -> Result<(), ApiError> {
        self.post_json("/forums", form).await
    }

    pub async fn delete_forum(&self, id: ForumId) -> Result<(), ApiError> {
        self.delete(&format!("/forums/{id}")).await
    }

    /// Comments under one post (bare list).
    pub async fn comments(&self, forum: ForumId) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&format!("/forums/{forum}/comments")).await
    }

    pub async fn create_comment(&self, forum: ForumId, form: &CommentForm) -> Result<(), ApiError> {
        self.post_json(&format!("/forums/{forum}/comments"), form)
            .await
    }

    pub async fn delete_comment(&self, id: CommentId) -> Result<(), ApiError> {
        self.delete(&format!("/comments/{id}")).await
    }
}
