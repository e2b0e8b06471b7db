//! `aula-app` — headless shell and page view models.
//!
//! Pages own their state and express user-facing side effects (modals,
//! toasts, banners) as data in a [`surface::SurfaceLog`] instead of
//! rendering anything; any front end can drain and present them. The
//! [`shell::Shell`] holds the current route, subscribes to the session and
//! connectivity monitors, and applies the surface policy (expired modal
//! suppressed on the login route, reload on reconnect).

pub mod config;
pub mod fetch;
pub mod pages;
pub mod routes;
pub mod scope;
pub mod shell;
pub mod surface;

pub use config::AppConfig;
pub use fetch::Slot;
pub use routes::Route;
pub use scope::MountScope;
pub use shell::Shell;
pub use surface::{Surface, SurfaceLog};
