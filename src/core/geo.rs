use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPos {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPos {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// True when both components are finite and the latitude is on the globe.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite() && self.lat >= -90.0 && self.lat <= 90.0
    }

    /// Returns the same position with the longitude wrapped into [-180, 180].
    pub fn wrapped(&self) -> GeoPos {
        GeoPos::new(wrap_longitude(self.lon), self.lat)
    }
}

impl Default for GeoPos {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Maps any finite longitude into [-180, 180] by repeated ±360° shifts.
///
/// Applied wherever a longitude crosses the antimeridian before display, so
/// a cursor readout or grid label never shows e.g. 190° where the user
/// expects -170°.
pub fn wrap_longitude(lon: f64) -> f64 {
    let mut wrapped = lon;
    while wrapped < -180.0 {
        wrapped += 360.0;
    }
    while wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// A point in the plot coordinate system of the active projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for PlotPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Axis limits of the render surface, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PlotRect {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn lower_left(&self) -> PlotPoint {
        PlotPoint::new(self.x_min, self.y_min)
    }

    pub fn upper_right(&self) -> PlotPoint {
        PlotPoint::new(self.x_max, self.y_max)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// The geographic bounding box currently visible on the map surface.
///
/// Values may exceed ±180 / ±90 transiently (a view panned across the
/// antimeridian keeps monotonic longitudes); wrapping happens only at
/// display time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Viewport {
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    /// Builds a viewport from two unordered corner positions.
    pub fn from_corners(a: GeoPos, b: GeoPos) -> Self {
        Self {
            lon_min: a.lon.min(b.lon),
            lon_max: a.lon.max(b.lon),
            lat_min: a.lat.min(b.lat),
            lat_max: a.lat.max(b.lat),
        }
    }

    /// The whole globe.
    pub fn world() -> Self {
        Self::new(-180.0, 180.0, -90.0, 90.0)
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Inclusive containment test, matching the grid-value filter.
    pub fn contains(&self, pos: &GeoPos) -> bool {
        pos.lon >= self.lon_min
            && pos.lon <= self.lon_max
            && pos.lat >= self.lat_min
            && pos.lat <= self.lat_max
    }

    /// Pegs this viewport to another box (typically the projection domain).
    pub fn clamped_to(&self, other: &Viewport) -> Viewport {
        Viewport {
            lon_min: self.lon_min.max(other.lon_min),
            lon_max: self.lon_max.min(other.lon_max),
            lat_min: self.lat_min.max(other.lat_min),
            lat_max: self.lat_max.min(other.lat_max),
        }
    }

    /// Ordered, finite, and non-empty on both axes.
    pub fn is_valid(&self) -> bool {
        self.lon_min.is_finite()
            && self.lon_max.is_finite()
            && self.lat_min.is_finite()
            && self.lat_max.is_finite()
            && self.lon_span() > 0.0
            && self.lat_span() > 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::world()
    }
}

/// Degrees-minutes-seconds decomposition for grid labels.
///
/// Degrees truncate toward zero; the sign stays on the degree component and
/// the hemisphere suffix is chosen by the caller from the original sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: i32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    pub fn from_degrees(deg: f64) -> Self {
        let d = deg.trunc() as i32;
        let md = (deg - d as f64).abs() * 60.0;
        let m = md.trunc() as u32;
        let sd = (md - m as f64) * 60.0;
        Self {
            degrees: d,
            minutes: m,
            seconds: sd,
        }
    }
}
