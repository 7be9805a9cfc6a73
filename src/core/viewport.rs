use crate::core::geo::Viewport;
use crate::core::projection::Projection;
use crate::surface::RenderSurface;
use crate::{PlotError, Result};

/// Derives the visible geographic bounding box from the surface's native
/// axis limits.
///
/// Stateless: the viewport is recomputed fresh on every pan/zoom event and
/// never persisted. Invalid limits surface as `InvalidViewport`, which
/// callers treat as "skip this redraw cycle", never as a user-facing error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportTracker;

impl ViewportTracker {
    pub fn new() -> Self {
        Self
    }

    /// Reads the surface's axis limits and inverse-projects the corners into
    /// an ordered geographic viewport.
    pub fn current_viewport(
        &self,
        surface: &dyn RenderSurface,
        projection: &Projection,
    ) -> Result<Viewport> {
        let limits = surface.view_limits();
        let ll = projection
            .to_geo(limits.lower_left())
            .map_err(|e| PlotError::InvalidViewport(format!("lower-left corner: {e}")))?;
        let ur = projection
            .to_geo(limits.upper_right())
            .map_err(|e| PlotError::InvalidViewport(format!("upper-right corner: {e}")))?;

        let viewport = Viewport::from_corners(ll, ur);
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport(format!(
                "degenerate bounds lon [{}, {}] lat [{}, {}]",
                viewport.lon_min, viewport.lon_max, viewport.lat_min, viewport.lat_max
            )));
        }
        Ok(viewport)
    }
}
