//! Discussion forum: posts with their comments.

use std::collections::HashMap;

use aula_auth::SessionClaims;
use aula_client::{ApiClient, CommentForm, ForumPostForm};
use aula_core::validate::require;
use aula_core::{Comment, CommentId, DomainResult, ForumId, ForumPost};

use crate::fetch::Slot;
use crate::surface::{Surface, SurfaceLog};

/// A post together with its fetched comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumThread {
    pub post: ForumPost,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingDelete {
    Post(ForumId),
    Comment(CommentId),
}

pub struct ForumPage {
    claims: SessionClaims,
    threads: Slot<Vec<ForumThread>>,
    pending_delete: Option<PendingDelete>,
    surfaces: SurfaceLog,
}

impl ForumPage {
    pub fn new(claims: SessionClaims) -> Self {
        Self {
            claims,
            threads: Slot::empty(),
            pending_delete: None,
            surfaces: SurfaceLog::new(),
        }
    }

    /// Fetch all posts, then their comments. The per-post comment fetches
    /// are independent tasks and may resolve in any order; each result lands
    /// in its own thread keyed by post id.
    pub async fn refresh(&mut self, client: &ApiClient) {
        let id = self.threads.begin();

        let posts = match client.forums().await {
            Ok(posts) => posts,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch forums");
                self.surfaces.push(Surface::ErrorDialog(
                    "Failed to fetch the forum.".to_string(),
                ));
                return;
            }
        };

        let mut handles = Vec::with_capacity(posts.len());
        for post in &posts {
            let client = client.clone();
            let forum_id = post.id;
            handles.push(tokio::spawn(async move {
                (forum_id, client.comments(forum_id).await)
            }));
        }

        let mut comments_by_post: HashMap<ForumId, Vec<Comment>> = HashMap::new();
        for handle in handles {
            match handle.await {
                Ok((forum_id, Ok(comments))) => {
                    comments_by_post.insert(forum_id, comments);
                }
                Ok((forum_id, Err(err))) => {
                    tracing::error!(%forum_id, error = %err, "failed to fetch comments")
                }
                Err(err) => tracing::error!(error = %err, "comment fetch task failed"),
            }
        }

        let threads = posts
            .into_iter()
            .map(|post| {
                let comments = comments_by_post.remove(&post.id).unwrap_or_default();
                ForumThread { post, comments }
            })
            .collect();

        self.threads.resolve(id, threads);
    }

    pub fn threads(&self) -> &[ForumThread] {
        self.threads.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub async fn create_post(&mut self, client: &ApiClient, title: &str, content: &str) {
        if let Err(err) = validate_post(title, content) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        let form = ForumPostForm {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            author: self.claims.username.clone(),
            author_role: self.claims.role.wire_name().to_string(),
        };

        match client.create_forum(&form).await {
            Ok(()) => {
                self.refresh(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Post created.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to create forum post"),
        }
    }

    pub async fn create_comment(&mut self, client: &ApiClient, forum: ForumId, content: &str) {
        if let Err(err) = require("comment", content) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        let form = CommentForm {
            content: content.trim().to_string(),
            author: self.claims.username.clone(),
            author_role: self.claims.role.wire_name().to_string(),
        };

        match client.create_comment(forum, &form).await {
            Ok(()) => {
                self.refresh(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Comment added.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to create comment"),
        }
    }

    pub fn request_delete_post(&mut self, id: ForumId) {
        self.pending_delete = Some(PendingDelete::Post(id));
        self.surfaces.push(Surface::ConfirmDelete(format!("post {id}")));
    }

    pub fn request_delete_comment(&mut self, id: CommentId) {
        self.pending_delete = Some(PendingDelete::Comment(id));
        self.surfaces
            .push(Surface::ConfirmDelete(format!("comment {id}")));
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self, client: &ApiClient) {
        let Some(target) = self.pending_delete.take() else {
            return;
        };

        let deleted = match target {
            PendingDelete::Post(id) => client.delete_forum(id).await,
            PendingDelete::Comment(id) => client.delete_comment(id).await,
        };

        match deleted {
            Ok(()) => self.refresh(client).await,
            Err(err) => tracing::error!(error = %err, "failed to delete from forum"),
        }
    }

    pub fn surfaces(&mut self) -> &mut SurfaceLog {
        &mut self.surfaces
    }
}

fn validate_post(title: &str, content: &str) -> DomainResult<()> {
    require("title", title)?;
    require("content", content)?;
    Ok(())
}
