//! Grade report plus teacher/admin grade entry.

use aula_auth::SessionClaims;
use aula_client::{ApiClient, GradeForm};
use aula_core::resource::grade_description;
use aula_core::validate::require_grade;
use aula_core::{Class, DomainError, DomainResult, ReportRow, dedup_by_key};

use crate::fetch::Slot;
use crate::surface::{Surface, SurfaceLog};

pub struct AchievementsPage {
    claims: SessionClaims,
    report: Slot<Vec<ReportRow>>,
    classes: Slot<Vec<Class>>,
    surfaces: SurfaceLog,
}

impl AchievementsPage {
    pub fn new(claims: SessionClaims) -> Self {
        Self {
            claims,
            report: Slot::empty(),
            classes: Slot::empty(),
            surfaces: SurfaceLog::new(),
        }
    }

    /// Report rows for the logged-in user and the class list for the grade
    /// entry selector; the two load independently.
    pub async fn load(&mut self, client: &ApiClient) {
        let report_id = self.report.begin();
        let classes_id = self.classes.begin();
        let user = self.claims.id;

        let (report, classes) = tokio::join!(client.report(user), client.classes());

        match report {
            Ok(rows) => {
                if rows.is_empty() {
                    self.surfaces
                        .push(Surface::ErrorDialog("No report data yet.".to_string()));
                }
                self.report.resolve(report_id, rows);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch report data");
                self.surfaces.push(Surface::ErrorDialog(
                    "Failed to fetch report data.".to_string(),
                ));
            }
        }

        match classes {
            Ok(list) => {
                self.classes.resolve(classes_id, dedup_by_key(list));
            }
            Err(err) => tracing::error!(error = %err, "failed to fetch class data"),
        }
    }

    /// Report rows with their banded labels.
    pub fn rows(&self) -> Vec<(&ReportRow, &'static str)> {
        self.report
            .get()
            .map(|rows| {
                rows.iter()
                    .map(|row| (row, grade_description(row.grade)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn classes(&self) -> &[Class] {
        self.classes.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Teacher/admin grade entry: validate, submit, re-fetch the report.
    pub async fn submit_grade(&mut self, client: &ApiClient, form: GradeForm) {
        if !self.claims.role.can_manage_classes() {
            self.surfaces.push(Surface::ErrorDialog(
                "Only teachers and admins can enter grades.".to_string(),
            ));
            return;
        }

        if let Err(err) = validate_grade_form(&form) {
            self.surfaces.push(Surface::ValidationModal(err.to_string()));
            return;
        }

        match client.submit_grade(&form).await {
            Ok(()) => {
                let id = self.report.begin();
                match client.report(self.claims.id).await {
                    Ok(rows) => {
                        self.report.resolve(id, rows);
                    }
                    Err(err) => tracing::error!(error = %err, "failed to re-fetch report"),
                }
                self.surfaces
                    .push(Surface::SuccessToast("Grade recorded.".to_string()));
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to input grade");
                self.surfaces
                    .push(Surface::ErrorDialog("Failed to input grade.".to_string()));
            }
        }
    }

    pub fn surfaces(&mut self) -> &mut SurfaceLog {
        &mut self.surfaces
    }
}

fn validate_grade_form(form: &GradeForm) -> DomainResult<()> {
    if form.user_id.as_i64() <= 0 {
        return Err(DomainError::validation("a student must be selected"));
    }
    if form.class_id.as_i64() <= 0 {
        return Err(DomainError::validation("a class must be selected"));
    }
    require_grade(form.grade)
}
