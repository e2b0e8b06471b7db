//! Class page: materials, assignments, and roster tabs for one class.

use aula_auth::SessionClaims;
use aula_client::{
    ApiClient, ApiError, AssignmentForm, FileUpload, MaterialForm, RetryPolicy, fetch_with_retry,
};
use aula_core::resource::sort_materials_newest_first;
use aula_core::validate::require;
use aula_core::{
    Assignment, AssignmentId, Class, ClassId, DomainResult, Material, MaterialId, Member, UserId,
    dedup_by_key,
};

use crate::fetch::Slot;
use crate::surface::{Surface, SurfaceLog};

/// What a pending confirmation dialog would delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Material(MaterialId),
    Assignment(AssignmentId),
    Member(UserId),
}

pub struct ClassPage {
    class_id: ClassId,
    claims: SessionClaims,
    retry: RetryPolicy,
    details: Slot<Class>,
    materials: Slot<Vec<Material>>,
    assignments: Slot<Vec<Assignment>>,
    members: Slot<Vec<Member>>,
    loading: bool,
    pending_delete: Option<DeleteTarget>,
    surfaces: SurfaceLog,
}

impl ClassPage {
    pub fn new(class_id: ClassId, claims: SessionClaims) -> Self {
        Self::with_retry(class_id, claims, RetryPolicy::default())
    }

    pub fn with_retry(class_id: ClassId, claims: SessionClaims, retry: RetryPolicy) -> Self {
        Self {
            class_id,
            claims,
            retry,
            details: Slot::empty(),
            materials: Slot::empty(),
            assignments: Slot::empty(),
            members: Slot::empty(),
            loading: false,
            pending_delete: None,
            surfaces: SurfaceLog::new(),
        }
    }

    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Initial load: details, materials, assignments, and roster fetched
    /// concurrently, each wrapped in the bounded retry. A fetch that still
    /// fails after the retries leaves its tab empty and queues a persistent
    /// error dialog; the other tabs are unaffected.
    pub async fn load(&mut self, client: &ApiClient) {
        self.loading = true;

        let class_id = self.class_id;
        let role = self.claims.role;
        let user = self.claims.id;
        let policy = self.retry;

        let details_id = self.details.begin();
        let materials_id = self.materials.begin();
        let assignments_id = self.assignments.begin();
        let members_id = self.members.begin();

        let (details, materials, assignments, members) = tokio::join!(
            fetch_with_retry(policy, || client.class_by_id(class_id)),
            fetch_with_retry(policy, || client.materials(class_id)),
            fetch_with_retry(policy, || async move {
                if role.can_manage_classes() {
                    client.assignments(class_id).await
                } else {
                    client.assignments_by_user(class_id, user).await
                }
            }),
            fetch_with_retry(policy, || client.members(class_id)),
        );

        match details {
            Ok(class) => {
                self.details.resolve(details_id, class);
            }
            Err(err) => self.fetch_failed("class details", err),
        }

        match materials {
            Ok(mut list) => {
                sort_materials_newest_first(&mut list);
                self.materials.resolve(materials_id, list);
            }
            Err(err) => {
                self.materials.resolve(materials_id, Vec::new());
                self.fetch_failed("materials", err);
            }
        }

        match assignments {
            Ok(list) => {
                self.assignments.resolve(assignments_id, list);
            }
            Err(err) => {
                self.assignments.resolve(assignments_id, Vec::new());
                self.fetch_failed("assignments", err);
            }
        }

        match members {
            Ok(list) => {
                self.members.resolve(members_id, dedup_by_key(list));
            }
            Err(err) => {
                self.members.resolve(members_id, Vec::new());
                self.fetch_failed("members", err);
            }
        }

        self.loading = false;
    }

    fn fetch_failed(&mut self, what: &'static str, err: ApiError) {
        tracing::error!(what, error = %err, "fetch failed after retries");
        self.surfaces.push(Surface::ErrorDialog(format!(
            "Failed to fetch {what}. Please check your internet connection."
        )));
    }

    pub fn details(&self) -> Option<&Class> {
        self.details.get()
    }

    pub fn materials(&self) -> &[Material] {
        self.materials.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn assignments(&self) -> &[Assignment] {
        self.assignments.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn members(&self) -> &[Member] {
        self.members.get().map(Vec::as_slice).unwrap_or(&[])
    }

    async fn refresh_materials(&mut self, client: &ApiClient) {
        let class_id = self.class_id;
        let policy = self.retry;
        let id = self.materials.begin();

        match fetch_with_retry(policy, || client.materials(class_id)).await {
            Ok(mut list) => {
                sort_materials_newest_first(&mut list);
                self.materials.resolve(id, list);
            }
            Err(err) => {
                self.materials.resolve(id, Vec::new());
                self.fetch_failed("materials", err);
            }
        }
    }

    async fn refresh_assignments(&mut self, client: &ApiClient) {
        let class_id = self.class_id;
        let role = self.claims.role;
        let user = self.claims.id;
        let policy = self.retry;
        let id = self.assignments.begin();

        let fetched = fetch_with_retry(policy, || async move {
            if role.can_manage_classes() {
                client.assignments(class_id).await
            } else {
                client.assignments_by_user(class_id, user).await
            }
        })
        .await;

        match fetched {
            Ok(list) => {
                self.assignments.resolve(id, list);
            }
            Err(err) => {
                self.assignments.resolve(id, Vec::new());
                self.fetch_failed("assignments", err);
            }
        }
    }

    async fn refresh_members(&mut self, client: &ApiClient) {
        let class_id = self.class_id;
        let policy = self.retry;
        let id = self.members.begin();

        match fetch_with_retry(policy, || client.members(class_id)).await {
            Ok(list) => {
                self.members.resolve(id, dedup_by_key(list));
            }
            Err(err) => {
                self.members.resolve(id, Vec::new());
                self.fetch_failed("members", err);
            }
        }
    }

    pub async fn create_material(&mut self, client: &ApiClient, form: MaterialForm) {
        if let Err(err) = validate_material(&form) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.create_material(self.class_id, form).await {
            Ok(()) => {
                self.refresh_materials(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Material added.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to create material"),
        }
    }

    pub async fn update_material(&mut self, client: &ApiClient, id: MaterialId, form: MaterialForm) {
        if let Err(err) = validate_material(&form) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.update_material(self.class_id, id, form).await {
            Ok(()) => {
                self.refresh_materials(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Material updated.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to update material"),
        }
    }

    pub async fn create_assignment(&mut self, client: &ApiClient, form: AssignmentForm) {
        if let Err(err) = validate_assignment(&form) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.create_assignment(self.class_id, form).await {
            Ok(()) => {
                self.refresh_assignments(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Assignment added.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to create assignment"),
        }
    }

    pub async fn update_assignment(
        &mut self,
        client: &ApiClient,
        id: AssignmentId,
        form: AssignmentForm,
    ) {
        if let Err(err) = validate_assignment(&form) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.update_assignment(self.class_id, id, form).await {
            Ok(()) => {
                self.refresh_assignments(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Assignment updated.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to update assignment"),
        }
    }

    /// Hand in a file for an assignment (generic multipart upload).
    pub async fn submit_file(
        &mut self,
        client: &ApiClient,
        assignment: AssignmentId,
        file: FileUpload,
    ) {
        match client.upload_submission(assignment, file).await {
            Ok(()) => {
                self.surfaces
                    .push(Surface::SuccessToast("File uploaded.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to upload submission"),
        }
    }

    /// Step one of deletion: ask for confirmation. No call is issued yet.
    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.pending_delete = Some(target);
        let label = match target {
            DeleteTarget::Material(id) => format!("material {id}"),
            DeleteTarget::Assignment(id) => format!("assignment {id}"),
            DeleteTarget::Member(id) => format!("member {id}"),
        };
        self.surfaces.push(Surface::ConfirmDelete(label));
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirming issues exactly one delete call, then re-fetches the one
    /// affected collection.
    pub async fn confirm_delete(&mut self, client: &ApiClient) {
        let Some(target) = self.pending_delete.take() else {
            return;
        };

        match target {
            DeleteTarget::Material(id) => match client.delete_material(id).await {
                Ok(()) => self.refresh_materials(client).await,
                Err(err) => tracing::error!(error = %err, "failed to delete material"),
            },
            DeleteTarget::Assignment(id) => match client.delete_assignment(id).await {
                Ok(()) => self.refresh_assignments(client).await,
                Err(err) => tracing::error!(error = %err, "failed to delete assignment"),
            },
            DeleteTarget::Member(id) => match client.remove_member(self.class_id, id).await {
                Ok(()) => self.refresh_members(client).await,
                Err(err) => tracing::error!(error = %err, "failed to remove member"),
            },
        }
    }

    pub fn surfaces(&mut self) -> &mut SurfaceLog {
        &mut self.surfaces
    }
}

fn validate_material(form: &MaterialForm) -> DomainResult<()> {
    require("title", &form.title)?;
    require("content", &form.content)?;
    Ok(())
}

fn validate_assignment(form: &AssignmentForm) -> DomainResult<()> {
    require("title", &form.title)?;
    require("description", &form.description)?;
    Ok(())
}
