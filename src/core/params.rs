use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::geo::GeoPos;
use crate::core::projection::Projection;

/// The key-value mapping the property panel hands to the controller.
pub type ParamMap = serde_json::Map<String, Value>;

/// Validation outcome for a single parameter, for the host UI to flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamCheck {
    Ok,
    Warning,
    Error,
}

/// Base-map detail hint forwarded to the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Crude,
    Low,
    Intermediate,
    High,
}

/// Projection selection as it appears in the parameter document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionChoice {
    #[default]
    Equirectangular,
    Mercator,
}

/// The recognized plot parameters.
///
/// Unrecognized keys in the incoming mapping are ignored; missing keys take
/// the defaults below (the property panel ships the same ones).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotParams {
    pub geodetic_latitude: f64,
    pub longitude: f64,
    /// Range ring radius in kilometers.
    pub range: f64,
    pub blue_marble: bool,
    pub coastlines: bool,
    pub state_borders: bool,
    pub country_borders: bool,
    /// Minimum feature area (km²) the base map bothers to draw.
    pub area_threshold: f64,
    pub projection: ProjectionChoice,
    pub resolution: Resolution,
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            geodetic_latitude: -28.54585,
            longitude: 45.607865,
            range: 800.0,
            blue_marble: true,
            coastlines: false,
            state_borders: false,
            country_borders: false,
            area_threshold: 10000.0,
            projection: ProjectionChoice::default(),
            resolution: Resolution::default(),
        }
    }
}

impl PlotParams {
    /// Reads parameters out of the property panel's generic mapping.
    ///
    /// Unknown keys are ignored and missing keys default. A mapping that
    /// fails to deserialize (wrong-typed value) falls back to the full
    /// defaults rather than failing the update; the host validates
    /// documents before they reach the core.
    pub fn from_value_map(map: &ParamMap) -> Self {
        serde_json::from_value(Value::Object(map.clone())).unwrap_or_else(|e| {
            log::warn!("malformed parameter mapping ({e}), using defaults");
            PlotParams::default()
        })
    }

    /// The range-ring center.
    pub fn center(&self) -> GeoPos {
        GeoPos::new(self.longitude, self.geodetic_latitude)
    }

    pub fn projection(&self) -> Projection {
        match self.projection {
            ProjectionChoice::Equirectangular => Projection::equirectangular(0.0),
            ProjectionChoice::Mercator => Projection::mercator(),
        }
    }

    /// UI validation level for the range value: warn above 1000 km, error
    /// outside [0, 10000].
    pub fn check_range(range_km: f64) -> ParamCheck {
        if !(0.0..=10000.0).contains(&range_km) {
            ParamCheck::Error
        } else if range_km > 1000.0 {
            ParamCheck::Warning
        } else {
            ParamCheck::Ok
        }
    }
}
