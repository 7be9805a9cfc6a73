//! The map-view controller: the orchestration layer between the property
//! panel, the toolbar, and the render surface.

use crate::core::geo::{GeoPos, PlotPoint, Viewport};
use crate::core::params::{ParamMap, PlotParams};
use crate::core::projection::Projection;
use crate::core::viewport::ViewportTracker;
use crate::cursor::{CursorState, CursorTracker};
use crate::grid::config::GridConfig;
use crate::grid::planner::{GridPlanner, GridSpec};
use crate::input::events::{PointerButton, ViewEvent};
use crate::overlay::manager::{Annotation, OverlayManager};
use crate::surface::{BaseImagery, BaseMapStyle, MarkerStyle, RenderSurface};
use crate::Result;

/// Emitted when a secondary-button release should open the host's context
/// menu (e.g. "Add Point Here") at a plot position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuRequest {
    pub at: PlotPoint,
}

/// Navigation callbacks the render backend invokes instead of subclassing
/// a toolbar. The backend performs its native pan/zoom/history transform
/// first, then calls the matching method here.
pub trait NavigationHandler {
    fn on_pan_start(&mut self, surface: &mut dyn RenderSurface, button: PointerButton);
    fn on_pan_drag(&mut self, surface: &mut dyn RenderSurface, button: PointerButton);
    fn on_pan_end(&mut self, surface: &mut dyn RenderSurface, button: PointerButton);
    fn on_zoom_start(&mut self, surface: &mut dyn RenderSurface);
    /// A zoom region was selected and applied.
    fn on_zoom_end(&mut self, surface: &mut dyn RenderSurface);
    fn on_home(&mut self, surface: &mut dyn RenderSurface);
    fn on_history_back(&mut self, surface: &mut dyn RenderSurface);
    fn on_history_forward(&mut self, surface: &mut dyn RenderSurface);
}

/// Owns the projection and every piece of render state derived from it.
///
/// All methods run on the host's event thread; each redraw cycle fully
/// clears and fully rebuilds the overlays it touches before returning, so
/// no partial overlay state is ever observable between events.
pub struct MapViewController {
    projection: Option<Projection>,
    planner: GridPlanner,
    overlays: OverlayManager,
    cursor: CursorTracker,
    tracker: ViewportTracker,
    /// Last viewport the grid was planned for; cursor bounds use it too.
    viewport: Viewport,
    grid_enabled: bool,
    grid_labels_enabled: bool,
    /// One-shot flag: the drag in progress was a right-button zoom, so the
    /// next button-release must not open the context menu.
    right_click_zoomed: bool,
}

impl MapViewController {
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    pub fn with_config(config: GridConfig) -> Self {
        Self {
            projection: None,
            planner: GridPlanner::new(config),
            overlays: OverlayManager::new(),
            cursor: CursorTracker::new(),
            tracker: ViewportTracker::new(),
            viewport: Viewport::world(),
            grid_enabled: true,
            grid_labels_enabled: true,
            right_click_zoomed: false,
        }
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn overlays(&self) -> &OverlayManager {
        &self.overlays
    }

    pub fn cursor_state(&self) -> CursorState {
        self.cursor.state()
    }

    /// The plot-update entry point the property panel calls.
    ///
    /// An empty mapping is the startup/empty state: placeholder background,
    /// no projection, no overlays.
    pub fn update_plot(&mut self, surface: &mut dyn RenderSurface, attrs: &ParamMap) -> Result<()> {
        if attrs.is_empty() {
            log::debug!("empty parameter set, drawing placeholder");
            self.teardown(surface);
            surface.draw_base_map(&BaseMapStyle::placeholder())?;
            surface.request_redraw();
            return Ok(());
        }
        self.rebuild(surface, &PlotParams::from_value_map(attrs))
    }

    /// Rebuilds the plot from typed parameters: tears down the projection
    /// and all overlays, then redraws base imagery, range ring, and grid.
    pub fn rebuild(&mut self, surface: &mut dyn RenderSurface, params: &PlotParams) -> Result<()> {
        log::debug!(
            "rebuilding plot: projection={:?} center=({}, {})",
            params.projection,
            params.longitude,
            params.geodetic_latitude
        );
        self.teardown(surface);

        let projection = params.projection();
        surface.draw_base_map(&base_map_style(params))?;
        self.projection = Some(projection);
        self.viewport = projection.domain();

        self.overlays
            .draw_range_ring(surface, &projection, params.center(), params.range);
        self.refresh_grid(surface);
        surface.request_redraw();
        Ok(())
    }

    /// Clears everything that references the current projection. The old
    /// projection is dropped only after no overlay can reference it.
    fn teardown(&mut self, surface: &mut dyn RenderSurface) {
        self.overlays.clear_all(surface);
        self.cursor.reset();
        surface.clear_base();
        self.projection = None;
    }

    /// Handles a view-limits change from pan, zoom, resize, or history
    /// navigation: recomputes the viewport and replans the grid.
    ///
    /// An invalid viewport skips the cycle and keeps the previous grid on
    /// screen; the grid is never cleared without a replacement ready.
    pub fn on_viewport_changed(&mut self, surface: &mut dyn RenderSurface) {
        if self.projection.is_none() {
            return;
        }
        self.refresh_grid(surface);
    }

    fn refresh_grid(&mut self, surface: &mut dyn RenderSurface) {
        let Some(projection) = self.projection else {
            return;
        };

        // Both features off: wipe lines and labels, draw nothing.
        if !self.grid_enabled && !self.grid_labels_enabled {
            self.overlays.clear_grid(surface);
            self.overlays.draw_labels(
                surface,
                &projection,
                &GridSpec::empty(),
                &self.viewport,
                false,
            );
            return;
        }

        // The live adaptive path only works where the inverse projection
        // is degree-linear; everything else gets the fixed fallback grid.
        if !projection.supports_live_grid() {
            let spec = GridSpec::static_fallback();
            let domain = projection.domain();
            self.overlays.clear_grid(surface);
            if self.grid_enabled {
                self.overlays.draw_grid(surface, &projection, &spec);
            }
            self.overlays.draw_labels(
                surface,
                &projection,
                &spec,
                &domain,
                self.grid_labels_enabled,
            );
            return;
        }

        match self.tracker.current_viewport(surface, &projection) {
            Ok(viewport) => self.viewport = viewport,
            Err(e) => {
                log::trace!("viewport unavailable, keeping previous grid: {e}");
                return;
            }
        }

        let spec = self.planner.plan(&self.viewport);
        self.overlays.clear_grid(surface);
        if self.grid_enabled {
            self.overlays.draw_grid(surface, &projection, &spec);
        }
        self.overlays.draw_labels(
            surface,
            &projection,
            &spec,
            &self.viewport,
            self.grid_labels_enabled,
        );
    }

    /// Pointer motion over the plot.
    pub fn on_pointer_move(&mut self, surface: &mut dyn RenderSurface, at: PlotPoint) -> CursorState {
        let Some(projection) = self.projection else {
            return self.cursor.state();
        };
        self.cursor
            .on_pointer_move(surface, &mut self.overlays, &projection, &self.viewport, at)
    }

    /// Button release over the plot. A secondary-button release inside the
    /// axes asks the host to open its context menu, unless this release
    /// ends a right-button zoom drag (the one-shot flag eats that one).
    pub fn on_button_release(
        &mut self,
        at: PlotPoint,
        button: PointerButton,
        inside_axes: bool,
    ) -> Option<ContextMenuRequest> {
        if button != PointerButton::Secondary || !inside_axes {
            return None;
        }
        if self.right_click_zoomed {
            self.right_click_zoomed = false;
            return None;
        }
        Some(ContextMenuRequest { at })
    }

    /// Thin dispatcher for hosts that forward a single event stream.
    pub fn handle_event(
        &mut self,
        surface: &mut dyn RenderSurface,
        event: ViewEvent,
    ) -> Option<ContextMenuRequest> {
        match event {
            ViewEvent::PointerMove { at } => {
                self.on_pointer_move(surface, at);
                None
            }
            ViewEvent::ButtonRelease {
                at,
                button,
                inside_axes,
            } => self.on_button_release(at, button, inside_axes),
            ViewEvent::ViewLimitsChanged | ViewEvent::Resize => {
                self.on_viewport_changed(surface);
                None
            }
        }
    }

    /// Drops a small point marker where the user clicked ("Add Point Here").
    pub fn add_point_annotation(
        &mut self,
        surface: &mut dyn RenderSurface,
        at: PlotPoint,
    ) -> Result<()> {
        let Some(projection) = self.projection else {
            return Ok(());
        };
        let geo = projection.to_geo(at)?;
        self.overlays.draw_annotation(
            surface,
            &projection,
            &Annotation::Point {
                at: geo,
                style: MarkerStyle::default(),
            },
        )
    }

    /// Adds an arbitrary annotation (text, image, point) at a geographic
    /// position, outside the grid lifecycle.
    pub fn add_annotation(
        &mut self,
        surface: &mut dyn RenderSurface,
        annotation: &Annotation,
    ) -> Result<()> {
        let Some(projection) = self.projection else {
            return Ok(());
        };
        self.overlays.draw_annotation(surface, &projection, annotation)
    }

    /// Draws the great-circle arc between two geographic positions.
    pub fn draw_great_circle(&mut self, surface: &mut dyn RenderSurface, a: GeoPos, b: GeoPos) {
        let Some(projection) = self.projection else {
            return;
        };
        self.overlays.draw_great_circle(surface, &projection, a, b);
    }

    /// Marks the drag in progress as a right-button zoom, so the release
    /// that ends it does not open a context menu.
    pub fn set_right_click_zoomed(&mut self) {
        self.right_click_zoomed = true;
    }

    pub fn cursor_readout_enabled(&self) -> bool {
        self.cursor.is_enabled()
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    pub fn grid_labels_enabled(&self) -> bool {
        self.grid_labels_enabled
    }

    /// Toolbar toggle: cursor coordinate readout. Disabling removes a
    /// visible readout immediately.
    pub fn set_cursor_readout_enabled(&mut self, surface: &mut dyn RenderSurface, enabled: bool) {
        self.cursor.set_enabled(surface, &mut self.overlays, enabled);
    }

    /// Toolbar toggle: coordinate grid. Triggers a grid-only redraw.
    pub fn set_grid_enabled(&mut self, surface: &mut dyn RenderSurface, enabled: bool) {
        self.grid_enabled = enabled;
        self.on_viewport_changed(surface);
    }

    /// Toolbar toggle: grid labels. Triggers a grid-only redraw.
    pub fn set_grid_labels_enabled(&mut self, surface: &mut dyn RenderSurface, enabled: bool) {
        self.grid_labels_enabled = enabled;
        self.on_viewport_changed(surface);
    }
}

impl Default for MapViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationHandler for MapViewController {
    fn on_pan_start(&mut self, _surface: &mut dyn RenderSurface, _button: PointerButton) {}

    fn on_pan_drag(&mut self, surface: &mut dyn RenderSurface, button: PointerButton) {
        if button == PointerButton::Secondary {
            // Right-drag in pan mode zooms; arm the context-menu suppressor.
            self.set_right_click_zoomed();
        }
        self.on_viewport_changed(surface);
    }

    fn on_pan_end(&mut self, surface: &mut dyn RenderSurface, _button: PointerButton) {
        self.on_viewport_changed(surface);
    }

    fn on_zoom_start(&mut self, _surface: &mut dyn RenderSurface) {}

    fn on_zoom_end(&mut self, surface: &mut dyn RenderSurface) {
        self.on_viewport_changed(surface);
    }

    fn on_home(&mut self, surface: &mut dyn RenderSurface) {
        self.on_viewport_changed(surface);
    }

    fn on_history_back(&mut self, surface: &mut dyn RenderSurface) {
        self.on_viewport_changed(surface);
    }

    fn on_history_forward(&mut self, surface: &mut dyn RenderSurface) {
        self.on_viewport_changed(surface);
    }
}

fn base_map_style(params: &PlotParams) -> BaseMapStyle {
    BaseMapStyle {
        imagery: if params.blue_marble {
            BaseImagery::BlueMarble
        } else {
            BaseImagery::FilledContinents
        },
        coastlines: params.coastlines,
        state_borders: params.state_borders,
        country_borders: params.country_borders,
        area_threshold: params.area_threshold,
        resolution: params.resolution,
    }
}
