use crate::core::geo::PlotPoint;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers as the host backend reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// Events the host GUI dispatches into the controller.
///
/// One handler per event kind; there is no event bus. The controller's
/// named methods are exactly these handlers, and `handle_event` is a thin
/// dispatcher over them for hosts that prefer a single entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// Pointer motion over the plot, in plot coordinates.
    PointerMove { at: PlotPoint },
    /// Button released over the plot.
    ButtonRelease {
        at: PlotPoint,
        button: PointerButton,
        inside_axes: bool,
    },
    /// The surface's axis limits changed (pan, zoom, or history jump).
    ViewLimitsChanged,
    /// The surface was resized.
    Resize,
}

impl ViewEvent {
    /// The plot position carried by this event, if any.
    pub fn position(&self) -> Option<PlotPoint> {
        match self {
            ViewEvent::PointerMove { at } | ViewEvent::ButtonRelease { at, .. } => Some(*at),
            _ => None,
        }
    }

    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            ViewEvent::PointerMove { .. } | ViewEvent::ButtonRelease { .. }
        )
    }
}
