use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::models::{LatLng, Marker, Notice, NoticeLevel, PopupHandle};
use crate::domain::ports::MapSurface;

/// A popup currently shown on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPopup {
    pub marker_id: String,
    pub position: LatLng,
    pub html: String,
}

#[derive(Debug, Default)]
struct SurfaceState {
    markers: Vec<Marker>,
    popups: BTreeMap<PopupHandle, OpenPopup>,
    notices: Vec<Notice>,
}

/// Headless map surface that records what would be drawn.
///
/// Backs the command-line front end and lets the presenter run without a
/// rendering toolkit. Notices are also forwarded to the log.
#[derive(Debug, Default)]
pub struct InMemoryMapSurface {
    state: Mutex<SurfaceState>,
    next_handle: AtomicU64,
}

impl InMemoryMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SurfaceState) -> R) -> R {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.with_state(|s| s.markers.clone())
    }

    pub fn marker_ids(&self) -> Vec<String> {
        self.with_state(|s| s.markers.iter().map(|m| m.id.clone()).collect())
    }

    /// Popups still open, in the order they were opened.
    pub fn popups(&self) -> Vec<OpenPopup> {
        self.with_state(|s| s.popups.values().cloned().collect())
    }

    pub fn popup(&self, handle: PopupHandle) -> Option<OpenPopup> {
        self.with_state(|s| s.popups.get(&handle).cloned())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.with_state(|s| s.notices.clone())
    }
}

impl MapSurface for InMemoryMapSurface {
    fn set_markers(&self, markers: &[Marker]) {
        debug!(count = markers.len(), "markers replaced");
        self.with_state(|s| s.markers = markers.to_vec());
    }

    fn open_popup(&self, marker_id: &str, position: LatLng, html: &str) -> PopupHandle {
        let handle = PopupHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        debug!(%marker_id, %handle, "popup opened");
        self.with_state(|s| {
            s.popups.insert(
                handle,
                OpenPopup {
                    marker_id: marker_id.to_string(),
                    position,
                    html: html.to_string(),
                },
            );
        });
        handle
    }

    fn close_popup(&self, handle: PopupHandle) {
        debug!(%handle, "popup closed");
        self.with_state(|s| {
            s.popups.remove(&handle);
        });
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!(message = %notice.message, "notice"),
            NoticeLevel::Warning => warn!(message = %notice.message, "notice"),
            NoticeLevel::Error => error!(message = %notice.message, "notice"),
        }
        self.with_state(|s| s.notices.push(notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_lifecycle() {
        let surface = InMemoryMapSurface::new();
        let position = LatLng { lat: 1.0, lng: 2.0 };

        let first = surface.open_popup("42", position, "<p>a</p>");
        let second = surface.open_popup("43", position, "<p>b</p>");
        assert_ne!(first, second);
        assert_eq!(surface.popups().len(), 2);

        surface.close_popup(first);
        assert!(surface.popup(first).is_none());
        assert_eq!(surface.popup(second).unwrap().marker_id, "43");

        // Closing twice is harmless
        surface.close_popup(first);
        assert_eq!(surface.popups().len(), 1);
    }

    #[test]
    fn test_notices_are_recorded() {
        let surface = InMemoryMapSurface::new();
        surface.notify(Notice::warning("feed unavailable"));
        assert_eq!(surface.notices(), vec![Notice::warning("feed unavailable")]);
    }
}
