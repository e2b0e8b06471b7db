//! Dashboard: decoded identity plus role-gated widgets.

use chrono::{NaiveTime, Utc};

use aula_auth::{Role, SessionClaims, TokenStore, validate_session};
use aula_client::ApiClient;
use aula_core::resource::{RoleCounts, upcoming_classes};
use aula_core::{Class, dedup_by_key};

use crate::fetch::Slot;
use crate::routes::Route;
use crate::surface::SurfaceLog;

/// How many upcoming classes the reminder widget shows.
const REMINDER_LIMIT: usize = 4;

pub struct DashboardPage {
    claims: SessionClaims,
    reminders: Slot<Vec<Class>>,
    role_counts: Slot<RoleCounts>,
    class_count: Slot<usize>,
    assignment_count: Slot<u64>,
    surfaces: SurfaceLog,
}

impl DashboardPage {
    /// Decode the stored token; mounting without a usable session redirects
    /// to login.
    pub fn mount(tokens: &dyn TokenStore) -> Result<Self, Route> {
        match validate_session(tokens.load().as_deref(), Utc::now()) {
            Ok(claims) => Ok(Self {
                claims,
                reminders: Slot::empty(),
                role_counts: Slot::empty(),
                class_count: Slot::empty(),
                assignment_count: Slot::empty(),
                surfaces: SurfaceLog::new(),
            }),
            Err(reason) => {
                tracing::debug!(%reason, "dashboard mounted without a valid session");
                Err(Route::Login)
            }
        }
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Load every widget for this role. The fetches are independent and may
    /// resolve in any order; a failed widget is logged and left empty, it
    /// never takes the page down.
    pub async fn load(&mut self, client: &ApiClient, now: NaiveTime) {
        let role = self.claims.role;
        let user = self.claims.id;

        let reminders_id = self.reminders.begin();
        let counts_id = self.role_counts.begin();
        let classes_id = self.class_count.begin();
        let assignments_id = self.assignment_count.begin();

        let (all_classes, role_counts, own_classes, assignment_count) = tokio::join!(
            client.classes(),
            async {
                if role.can_manage_classes() {
                    Some(client.role_counts().await)
                } else {
                    None
                }
            },
            async {
                if role == Role::Student {
                    Some(client.classes_by_student(user).await)
                } else {
                    None
                }
            },
            async {
                if role == Role::Student {
                    Some(client.assignment_count(user).await)
                } else {
                    None
                }
            },
        );

        match all_classes {
            Ok(classes) => {
                let upcoming = upcoming_classes(&classes, now, REMINDER_LIMIT);
                self.reminders.resolve(reminders_id, upcoming);
            }
            Err(err) => tracing::error!(error = %err, "failed to fetch class reminders"),
        }

        if let Some(result) = role_counts {
            match result {
                Ok(counts) => {
                    self.role_counts.resolve(counts_id, counts);
                }
                Err(err) => tracing::error!(error = %err, "failed to fetch user counts"),
            }
        }

        if let Some(result) = own_classes {
            match result {
                Ok(classes) => {
                    // Same class joined twice still counts once.
                    let distinct = dedup_by_key(classes).len();
                    self.class_count.resolve(classes_id, distinct);
                }
                Err(err) => tracing::error!(error = %err, "failed to fetch class count"),
            }
        }

        if let Some(result) = assignment_count {
            match result {
                Ok(count) => {
                    self.assignment_count.resolve(assignments_id, count);
                }
                Err(err) => tracing::error!(error = %err, "failed to fetch assignment count"),
            }
        }
    }

    /// Up to four classes still ahead of now today, soonest first.
    pub fn reminders(&self) -> &[Class] {
        self.reminders.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Admin/teacher widget: user counts per role.
    pub fn role_counts(&self) -> Option<&RoleCounts> {
        self.role_counts.get()
    }

    /// Student widget: number of distinct joined classes.
    pub fn class_count(&self) -> Option<usize> {
        self.class_count.get().copied()
    }

    /// Student widget: assignment counter.
    pub fn assignment_count(&self) -> Option<u64> {
        self.assignment_count.get().copied()
    }

    pub fn surfaces(&mut self) -> &mut SurfaceLog {
        &mut self.surfaces
    }
}
