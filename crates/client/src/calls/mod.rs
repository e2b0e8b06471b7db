//! One method per backend operation, grouped by resource.
//!
//! Paths follow the backend's REST shape: collection endpoints (`/classes`,
//! `/forums`), singleton endpoints (`/class/{id}`), and nested action
//! endpoints (`/class/{id}/join`). Which responses arrive wrapped in a
//! `{status, message, data}` envelope and which arrive bare is an endpoint-
//! by-endpoint fact of the backend, encoded here once.

mod accounts;
mod assignments;
mod classes;
mod forum;
mod grades;
mod materials;
mod members;

pub use accounts::Registration;
pub use assignments::AssignmentForm;
pub use classes::ClassForm;
pub use forum::{CommentForm, ForumPostForm};
pub use grades::GradeForm;
pub use materials::MaterialForm;
