//! User-facing side effects as data.
//!
//! Pages are headless: instead of rendering dialogs they append surface
//! requests to a log that the hosting front end drains and presents.

use std::collections::VecDeque;

/// Something a page or the shell wants shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// Blocking modal for a failed pre-submission validation. No network
    /// call was issued.
    ValidationModal(String),
    /// Dismissible dialog after a terminal fetch or mutation failure.
    ErrorDialog(String),
    /// Transient acknowledgment after a successful mutation.
    SuccessToast(String),
    /// A destructive action awaiting explicit confirmation.
    ConfirmDelete(String),
    /// Session expired; offer redirect to login.
    SessionExpiredModal,
    /// Persistent banner while the backend is unreachable.
    OfflineBanner,
    /// Transient notice when connectivity returns (followed by a reload).
    BackOnlineNotice,
}

/// Ordered log of surface requests for one page mount.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    entries: VecDeque<Surface>,
}

impl SurfaceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, surface: Surface) {
        self.entries.push_back(surface);
    }

    /// Hand everything queued so far to the presenter.
    pub fn drain(&mut self) -> Vec<Surface> {
        self.entries.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_validation_modal(&self) -> bool {
        self.iter().any(|s| matches!(s, Surface::ValidationModal(_)))
    }

    pub fn has_error_dialog(&self) -> bool {
        self.iter().any(|s| matches!(s, Surface::ErrorDialog(_)))
    }
}
