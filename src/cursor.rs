//! Live cursor-position readout.

use crate::core::geo::{PlotPoint, Viewport};
use crate::core::projection::Projection;
use crate::overlay::labels::format_cursor_readout;
use crate::overlay::manager::{OverlayCategory, OverlayManager};
use crate::surface::RenderSurface;

/// Readout visibility after a pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    #[default]
    Hidden,
    Visible,
}

/// Tracks the geographic position under the pointer and keeps the readout
/// overlay in sync.
///
/// A two-state machine driven by every pointer-move event: the readout is
/// created on the hidden→visible edge, its text is updated in place while
/// visible, and it is removed with exactly one clear on the visible→hidden
/// edge. Anything that disqualifies the position — feature off, inverse
/// lookup failure, a projection without coordinate lookup, or a position
/// outside the viewport∩domain box — hides it.
#[derive(Debug)]
pub struct CursorTracker {
    state: CursorState,
    enabled: bool,
}

impl Default for CursorTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorTracker {
    pub fn new() -> Self {
        Self {
            state: CursorState::Hidden,
            enabled: true,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the readout. Disabling takes effect immediately:
    /// a visible readout is removed without waiting for the next move event.
    pub fn set_enabled(
        &mut self,
        surface: &mut dyn RenderSurface,
        overlays: &mut OverlayManager,
        enabled: bool,
    ) {
        self.enabled = enabled;
        if !enabled {
            self.hide(surface, overlays);
        }
    }

    /// Handles one pointer-move event at a plot-coordinate position.
    pub fn on_pointer_move(
        &mut self,
        surface: &mut dyn RenderSurface,
        overlays: &mut OverlayManager,
        projection: &Projection,
        viewport: &Viewport,
        at: PlotPoint,
    ) -> CursorState {
        let geo = match projection.to_geo(at) {
            Ok(pos) => pos,
            Err(_) => {
                self.hide(surface, overlays);
                return self.state;
            }
        };

        let bounds = viewport.clamped_to(&projection.domain());
        let qualifies = self.enabled && projection.supports_live_grid() && bounds.contains(&geo);
        if !qualifies {
            self.hide(surface, overlays);
            return self.state;
        }

        let text = format_cursor_readout(geo.lon, geo.lat);
        match overlays.upsert_cursor_readout(surface, &text) {
            Ok(()) => self.state = CursorState::Visible,
            Err(e) => {
                log::warn!("cursor readout dropped: {e}");
                self.hide(surface, overlays);
            }
        }
        self.state
    }

    /// Forces the hidden state without touching the surface; used when the
    /// whole overlay set has already been cleared (plot rebuild).
    pub fn reset(&mut self) {
        self.state = CursorState::Hidden;
    }

    fn hide(&mut self, surface: &mut dyn RenderSurface, overlays: &mut OverlayManager) {
        if self.state == CursorState::Visible {
            overlays.clear(surface, OverlayCategory::CursorReadout);
            surface.request_redraw();
        }
        self.state = CursorState::Hidden;
    }
}
