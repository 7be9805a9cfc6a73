//! Prelude module for common graticule types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use graticule::prelude::*;`

pub use crate::core::{
    geo::{wrap_longitude, Dms, GeoPos, PlotPoint, PlotRect, Viewport},
    params::{ParamCheck, ParamMap, PlotParams, ProjectionChoice, Resolution},
    projection::{Projection, ProjectionKind},
    viewport::ViewportTracker,
};

pub use crate::controller::{ContextMenuRequest, MapViewController, NavigationHandler};

pub use crate::cursor::{CursorState, CursorTracker};

pub use crate::grid::{
    config::{GridConfig, BASE_GRID_LINES},
    planner::{GridPlanner, GridSpec},
};

pub use crate::input::events::{PointerButton, ViewEvent};

pub use crate::overlay::{
    labels::{format_cursor_readout, format_lat_label, format_lon_label},
    manager::{Annotation, OverlayCategory, OverlayManager},
};

pub use crate::surface::{
    BaseImagery, BaseMapStyle, Color, HAlign, LineStyle, MarkerStyle, OverlayHandle,
    RenderSurface, TextAnchor, TextRotation, TextStyle, VAlign,
};

pub use crate::{PlotError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
