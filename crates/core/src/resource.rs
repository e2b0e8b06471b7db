//! Resource view models.
//!
//! Every type here is a transient snapshot of a server-owned entity: fetched
//! fresh per view, never persisted locally. Field names map 1:1 onto the
//! backend's JSON contract; where the wire name differs from the Rust name a
//! serde rename carries the contract.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;

use crate::id::{AssignmentId, ClassId, CommentId, ForumId, GradeId, MaterialId, UserId};

/// A class as listed in the portal and on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    /// Daily schedule as `HH:MM`, free-form on the wire.
    #[serde(rename = "jadwal_kelas")]
    pub schedule: String,
    pub teacher: String,
    pub class_code: String,
    pub created_at: DateTime<Utc>,
}

impl Class {
    /// Parse the `HH:MM` schedule string.
    ///
    /// The backend does not validate this field, so garbage parses to `None`
    /// rather than an error; views simply skip such classes in reminders.
    pub fn schedule_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.schedule.trim(), "%H:%M").ok()
    }
}

/// Course material inside a class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub class_id: ClassId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Attachment URL; the backend sends `""` when there is none.
    #[serde(default)]
    pub attachment: String,
}

impl Material {
    pub fn attachment(&self) -> Option<&str> {
        if self.attachment.is_empty() {
            None
        } else {
            Some(&self.attachment)
        }
    }
}

/// An assignment inside a class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub class_id: ClassId,
    pub title: String,
    pub description: String,
    /// Free-form date string, exactly as entered in the form.
    #[serde(default)]
    pub due_date: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attachment: String,
    #[serde(default)]
    pub created_by: Option<UserId>,
}

impl Assignment {
    pub fn attachment(&self) -> Option<&str> {
        if self.attachment.is_empty() {
            None
        } else {
            Some(&self.attachment)
        }
    }
}

/// A class member as returned by the roster endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Member {
    pub id: UserId,
    pub username: String,
    pub role: String,
}

/// A forum post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForumPost {
    pub id: ForumId,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub author_role: String,
    pub created_at: DateTime<Utc>,
}

/// A comment under a forum post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub forum_id: ForumId,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub author_role: String,
    pub created_at: DateTime<Utc>,
}

/// A stored grade record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GradeRecord {
    pub id: GradeId,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub grade: u32,
}

/// One row of a student's grade report (`/rapot/{user_id}`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportRow {
    pub class_name: String,
    pub grade: u32,
}

/// User counts per role (`/roles/count`), keyed by the role's wire name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RoleCounts(pub BTreeMap<String, u64>);

impl RoleCounts {
    pub fn of(&self, wire_name: &str) -> u64 {
        self.0.get(wire_name).copied().unwrap_or(0)
    }
}

/// Human-readable label for a 0–100 grade, banded the way report cards
/// render it.
pub fn grade_description(grade: u32) -> &'static str {
    match grade {
        100.. => "Perfect",
        91..=99 => "Excellent",
        81..=90 => "Good",
        76..=80 => "Below standard",
        _ => "Needs improvement",
    }
}

/// Portal ordering: ascending by id.
pub fn sort_classes(classes: &mut [Class]) {
    classes.sort_by_key(|c| c.id);
}

/// Material listing order: newest first, ties broken by id descending.
pub fn sort_materials_newest_first(materials: &mut [Material]) {
    materials.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Classes whose schedule time is still ahead of `now` today, soonest first,
/// capped at `limit` (dashboard reminders).
pub fn upcoming_classes(classes: &[Class], now: NaiveTime, limit: usize) -> Vec<Class> {
    let mut upcoming: Vec<(NaiveTime, Class)> = classes
        .iter()
        .filter_map(|c| {
            let at = c.schedule_time()?;
            (at > now).then(|| (at, c.clone()))
        })
        .collect();
    upcoming.sort_by_key(|(at, _)| *at);
    upcoming.truncate(limit);
    upcoming.into_iter().map(|(_, c)| c).collect()
}
