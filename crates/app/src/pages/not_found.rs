//! Fallback page for unmatched routes. Issues no calls.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundPage {
    path: String,
}

impl NotFoundPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> String {
        format!("The page {} does not exist.", self.path)
    }
}
