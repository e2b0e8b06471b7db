//! Headless page view models, one per routed screen.
//!
//! Every page follows the same mutation discipline: validate required fields
//! before submitting (blocking modal on failure, no call issued), submit, on
//! success re-fetch the affected collection and queue a success toast, on
//! failure log and leave prior state untouched. Deletion always goes through
//! an explicit confirmation step.

pub mod achievements;
pub mod class_page;
pub mod classes;
pub mod dashboard;
pub mod forum;
pub mod login;
pub mod not_found;
pub mod settings;

pub use achievements::AchievementsPage;
pub use class_page::{ClassPage, DeleteTarget};
pub use classes::ClassPortalPage;
pub use dashboard::DashboardPage;
pub use forum::{ForumPage, ForumThread};
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use settings::SettingsPage;
