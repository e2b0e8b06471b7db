//! `aula-client` — HTTP client for the LMS backend.
//!
//! One call per backend operation, grouped by resource under [`calls`]. Every
//! authenticated call reads the bearer token from the token store **at call
//! time**, so a token refreshed mid-session is used on the very next request.
//! The client performs no retries; bounded retry for view fetches lives in
//! [`retry`] and is applied by the caller.

pub mod api;
pub mod calls;
pub mod error;
pub mod retry;

pub use api::{ApiClient, FileUpload, RequestId};
pub use calls::{
    AssignmentForm, ClassForm, CommentForm, ForumPostForm, GradeForm, MaterialForm, Registration,
};
pub use error::ApiError;
pub use retry::{RetryPolicy, fetch_with_retry};
