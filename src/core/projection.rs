use crate::core::geo::{GeoPos, PlotPoint, Viewport};
use crate::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// WGS84 sphere radius in meters, the reference frame for Mercator plots.
const EARTH_RADIUS: f64 = 6378137.0;
/// Latitude where the Mercator ordinate diverges; the domain stops here.
const MAX_LATITUDE: f64 = 85.0511287798;

/// The supported projection families.
///
/// Equirectangular is the cylindrical workhorse: degrees map linearly to
/// plot units, so it is the only kind carrying the live adaptive grid and
/// the cursor readout. Mercator is conformal on the WGS84 sphere; its poles
/// are out of domain and it falls back to the static grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectionKind {
    Equirectangular { central_meridian: f64 },
    Mercator,
}

/// The active map projection: reference frame plus forward/inverse
/// transforms between geographic and plot coordinates.
///
/// Replaced atomically when the controller rebuilds the map; overlays are
/// cleared first so nothing holds plot coordinates from the old frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    kind: ProjectionKind,
}

impl Projection {
    pub fn equirectangular(central_meridian: f64) -> Self {
        Self {
            kind: ProjectionKind::Equirectangular { central_meridian },
        }
    }

    pub fn mercator() -> Self {
        Self {
            kind: ProjectionKind::Mercator,
        }
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            ProjectionKind::Equirectangular { .. } => "equirectangular",
            ProjectionKind::Mercator => "mercator",
        }
    }

    /// Whether the adaptive per-viewport grid (and the cursor readout) can
    /// run on this projection. Only cylindrical equirectangular plots keep a
    /// usable degree-linear inverse at every zoom.
    pub fn supports_live_grid(&self) -> bool {
        matches!(self.kind, ProjectionKind::Equirectangular { .. })
    }

    /// The geographic domain this projection can represent.
    pub fn domain(&self) -> Viewport {
        match self.kind {
            ProjectionKind::Equirectangular { central_meridian } => Viewport::new(
                central_meridian - 180.0,
                central_meridian + 180.0,
                -90.0,
                90.0,
            ),
            ProjectionKind::Mercator => Viewport::new(-180.0, 180.0, -MAX_LATITUDE, MAX_LATITUDE),
        }
    }

    /// Forward transform: geographic position to plot coordinates.
    ///
    /// Longitudes outside [-180, 180] are accepted on cylindrical plots so
    /// grid lines tiled across the antimeridian land where a panned view
    /// expects them.
    pub fn to_plot(&self, pos: GeoPos) -> Result<PlotPoint> {
        if !pos.lon.is_finite() || !pos.lat.is_finite() {
            return Err(PlotError::ProjectionDomain {
                lon: pos.lon,
                lat: pos.lat,
            });
        }
        match self.kind {
            ProjectionKind::Equirectangular { central_meridian } => {
                if pos.lat.abs() > 90.0 {
                    return Err(PlotError::ProjectionDomain {
                        lon: pos.lon,
                        lat: pos.lat,
                    });
                }
                Ok(PlotPoint::new(pos.lon - central_meridian, pos.lat))
            }
            ProjectionKind::Mercator => {
                if pos.lat.abs() > MAX_LATITUDE {
                    return Err(PlotError::ProjectionDomain {
                        lon: pos.lon,
                        lat: pos.lat,
                    });
                }
                let x = pos.lon.to_radians() * EARTH_RADIUS;
                let y = (PI / 4.0 + pos.lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;
                Ok(PlotPoint::new(x, y))
            }
        }
    }

    /// Inverse transform: plot coordinates back to a geographic position.
    pub fn to_geo(&self, point: PlotPoint) -> Result<GeoPos> {
        if !point.is_finite() {
            return Err(PlotError::PlotDomain {
                x: point.x,
                y: point.y,
            });
        }
        match self.kind {
            ProjectionKind::Equirectangular { central_meridian } => {
                Ok(GeoPos::new(point.x + central_meridian, point.y))
            }
            ProjectionKind::Mercator => {
                let lon = (point.x / EARTH_RADIUS).to_degrees();
                let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
                Ok(GeoPos::new(lon, lat))
            }
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::equirectangular(0.0)
    }
}
