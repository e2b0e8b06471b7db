//! Class portal: list, create/edit, delete, join-by-code.

use rand::Rng;

use aula_auth::{Role, SessionClaims};
use aula_client::{ApiClient, ClassForm};
use aula_core::resource::sort_classes;
use aula_core::validate::require;
use aula_core::{Class, ClassId, DomainResult, dedup_by_key};

use crate::fetch::Slot;
use crate::surface::{Surface, SurfaceLog};

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub struct ClassPortalPage {
    claims: SessionClaims,
    classes: Slot<Vec<Class>>,
    pending_delete: Option<ClassId>,
    surfaces: SurfaceLog,
}

impl ClassPortalPage {
    pub fn new(claims: SessionClaims) -> Self {
        Self {
            claims,
            classes: Slot::empty(),
            pending_delete: None,
            surfaces: SurfaceLog::new(),
        }
    }

    /// Students see the classes they joined; teachers and admins see all.
    /// The rendered list is deduplicated by class code and sorted by id.
    pub async fn refresh(&mut self, client: &ApiClient) {
        let id = self.classes.begin();

        let fetched = if self.claims.role == Role::Student {
            client.classes_by_student(self.claims.id).await
        } else {
            client.classes().await
        };

        match fetched {
            Ok(list) => {
                let mut list = dedup_by_key(list);
                sort_classes(&mut list);
                self.classes.resolve(id, list);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch classes");
                self.classes.resolve(id, Vec::new());
            }
        }
    }

    pub fn classes(&self) -> &[Class] {
        self.classes.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Generate a 6–7 character alphanumeric class code not already in use
    /// by anything in the current snapshot.
    pub fn generate_class_code(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let code = random_code(&mut rng);
            if !self.classes().iter().any(|c| c.class_code == code) {
                return code;
            }
        }
    }

    /// Pre-filled edit form for an existing class.
    pub fn edit_form(&self, id: ClassId) -> Option<ClassForm> {
        let class = self.classes().iter().find(|c| c.id == id)?;
        Some(ClassForm {
            name: class.name.clone(),
            schedule: class.schedule.clone(),
            teacher: class.teacher.clone(),
            class_code: class.class_code.clone(),
        })
    }

    pub async fn create(&mut self, client: &ApiClient, form: ClassForm) {
        if let Err(err) = validate_class_form(&form) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.create_class(&form).await {
            Ok(()) => {
                self.refresh(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Class created.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to create class"),
        }
    }

    pub async fn update(&mut self, client: &ApiClient, id: ClassId, form: ClassForm) {
        if let Err(err) = validate_class_form(&form) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.update_class(id, &form).await {
            Ok(()) => {
                self.refresh(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Class updated.".to_string()));
            }
            Err(err) => tracing::error!(error = %err, "failed to update class"),
        }
    }

    /// Step one of deletion: ask for confirmation. No call is issued yet.
    pub fn request_delete(&mut self, id: ClassId) {
        self.pending_delete = Some(id);
        self.surfaces
            .push(Surface::ConfirmDelete(format!("class {id}")));
    }

    /// Cancelling the confirmation leaves everything untouched.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirming issues exactly one delete call followed by one re-fetch.
    pub async fn confirm_delete(&mut self, client: &ApiClient) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        match client.delete_class(id).await {
            Ok(()) => self.refresh(client).await,
            Err(err) => tracing::error!(error = %err, "failed to delete class"),
        }
    }

    /// Student join-by-code. A code that matches no existing class surfaces
    /// a validation error on the join form and issues no join call.
    pub async fn join_by_code(&mut self, client: &ApiClient, code: &str) {
        let code = code.trim();
        if code.is_empty() {
            self.surfaces.push(Surface::ValidationModal(
                "class code is required".to_string(),
            ));
            return;
        }

        // The join endpoint is addressed by class id, so resolve the code
        // against a fresh listing first.
        let all = match client.classes().await {
            Ok(list) => list,
            Err(err) => {
                tracing::error!(error = %err, "failed to look up class code");
                self.surfaces.push(Surface::ErrorDialog(
                    "Could not look up the class code.".to_string(),
                ));
                return;
            }
        };

        let Some(target) = all.iter().find(|c| c.class_code == code) else {
            self.surfaces.push(Surface::ValidationModal(
                "no class matches that code".to_string(),
            ));
            return;
        };

        match client.join_class(target.id, code).await {
            Ok(()) => {
                self.refresh(client).await;
                self.surfaces
                    .push(Surface::SuccessToast("Joined class.".to_string()));
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to join class");
                self.surfaces.push(Surface::ValidationModal(
                    "unable to join with that code".to_string(),
                ));
            }
        }
    }

    pub fn surfaces(&mut self) -> &mut SurfaceLog {
        &mut self.surfaces
    }
}

fn validate_class_form(form: &ClassForm) -> DomainResult<()> {
    require("name", &form.name)?;
    require("schedule", &form.schedule)?;
    require("teacher", &form.teacher)?;
    Ok(())
}

fn random_code(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(6..=7);
    (0..len)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}
