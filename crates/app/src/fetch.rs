//! Fetch slots: request-keyed state updates.

use aula_client::RequestId;

/// Holder for one fetched snapshot plus the id of the newest request issued
/// for it.
///
/// Concurrent independent fetches may resolve in any order; a response is
/// applied only if it carries the newest request id for its slot, so a late
/// response from a superseded request can never clobber newer data.
#[derive(Debug)]
pub struct Slot<T> {
    value: Option<T>,
    newest: Option<RequestId>,
}

impl<T> Slot<T> {
    pub fn empty() -> Self {
        Self {
            value: None,
            newest: None,
        }
    }

    /// Register a new in-flight request for this slot, superseding any
    /// previous one.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId::new();
        self.newest = Some(id);
        id
    }

    /// Apply a response if `id` is still the newest request. Returns whether
    /// it was applied.
    pub fn resolve(&mut self, id: RequestId, value: T) -> bool {
        if self.newest == Some(id) {
            self.value = Some(value);
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}
