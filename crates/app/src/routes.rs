//! Route table.

use aula_core::ClassId;

/// Which page is mounted.
///
/// Anything that does not match lands on the dedicated fallback page rather
/// than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Classes,
    Achievements,
    Forum,
    Class(ClassId),
    Report(String),
    Settings,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        match path {
            "/" => Route::Dashboard,
            "/login" => Route::Login,
            "/classes" => Route::Classes,
            "/achievements" => Route::Achievements,
            "/forum" => Route::Forum,
            "/settings" => Route::Settings,
            _ => {
                if let Some(rest) = path.strip_prefix("/class/") {
                    if let Ok(id) = rest.parse::<ClassId>() {
                        return Route::Class(id);
                    }
                }
                if let Some(subject) = path.strip_prefix("/report/") {
                    if !subject.is_empty() && !subject.contains('/') {
                        return Route::Report(subject.to_string());
                    }
                }
                Route::NotFound(path.to_string())
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Classes => "/classes".to_string(),
            Route::Achievements => "/achievements".to_string(),
            Route::Forum => "/forum".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Class(id) => format!("/class/{id}"),
            Route::Report(subject) => format!("/report/{subject}"),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Navigation chrome is hidden on the login route.
    pub fn shows_navigation(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}
