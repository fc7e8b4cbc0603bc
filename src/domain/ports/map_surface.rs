use crate::domain::models::{LatLng, Marker, Notice, PopupHandle};

/// The map widget markers and popups are drawn on.
///
/// Calls are synchronous UI operations; implementations must not block
/// on I/O.
pub trait MapSurface: Send + Sync {
    /// Replace every marker currently on the map.
    fn set_markers(&self, markers: &[Marker]);

    /// Open a popup showing `html`, anchored at `position`.
    fn open_popup(&self, marker_id: &str, position: LatLng, html: &str) -> PopupHandle;

    /// Close and discard a popup. Unknown handles are ignored.
    fn close_popup(&self, handle: PopupHandle);

    /// Show a non-blocking message to the user.
    fn notify(&self, notice: Notice);
}
