//! `aula-core` — client-side domain foundation.
//!
//! This crate contains **pure data** building blocks: typed identifiers,
//! resource view models matching the backend's wire contract, canonical
//! identity rules, and pre-submission validation. No I/O, no HTTP.

pub mod error;
pub mod id;
pub mod identity;
pub mod resource;
pub mod validate;

pub use error::{DomainError, DomainResult};
pub use id::{AssignmentId, ClassId, CommentId, ForumId, GradeId, MaterialId, UserId};
pub use identity::{Keyed, dedup_by_key};
pub use resource::{
    Assignment, Class, Comment, ForumPost, GradeRecord, Material, Member, ReportRow, RoleCounts,
};
