//! # graticule
//!
//! Adaptive coordinate-grid planning and interactive map-view control for
//! 2-D geographic plots.
//!
//! The crate is the core of a geodetic plotting tool: it tracks the visible
//! geographic viewport, chooses how many parallels and meridians keep the
//! grid readable at the current zoom, converts between plot and geographic
//! coordinates across the antimeridian, keeps a live cursor readout in sync
//! with pointer motion, and owns the add/remove lifecycle of every drawn
//! overlay so pan/zoom/redraw cycles never leak stale artifacts.
//!
//! The host GUI and the drawing backend stay outside: the backend plugs in
//! through [`surface::RenderSurface`], and the host drives
//! [`controller::MapViewController`] from its event loop.

pub mod controller;
pub mod core;
pub mod cursor;
pub mod grid;
pub mod input;
pub mod overlay;
pub mod prelude;
pub mod surface;

// Re-export public API
pub use crate::core::{
    geo::{wrap_longitude, GeoPos, PlotPoint, PlotRect, Viewport},
    params::{ParamCheck, ParamMap, PlotParams},
    projection::{Projection, ProjectionKind},
    viewport::ViewportTracker,
};

pub use crate::controller::{ContextMenuRequest, MapViewController, NavigationHandler};

pub use crate::cursor::{CursorState, CursorTracker};

pub use crate::grid::{
    config::GridConfig,
    planner::{GridPlanner, GridSpec},
};

pub use crate::input::events::{PointerButton, ViewEvent};

pub use crate::overlay::manager::{Annotation, OverlayCategory, OverlayManager};

pub use crate::surface::{OverlayHandle, RenderSurface};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, PlotError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("geographic position ({lon}, {lat}) outside projection domain")]
    ProjectionDomain { lon: f64, lat: f64 },

    #[error("plot position ({x}, {y}) has no geographic inverse")]
    PlotDomain { x: f64, y: f64 },

    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("surface error: {0}")]
    Surface(String),
}
