use crate::core::geo::Viewport;
use crate::grid::config::GridConfig;

/// The meridians and parallels chosen for one redraw cycle.
///
/// Counts are the nominal full-sphere line counts (odd, ≥ 3) or zero when
/// an axis degenerates; the value lists are already filtered to the
/// viewport with inclusive boundary tests. Recomputed on every viewport
/// change and discarded on the next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridSpec {
    pub meridians: Vec<f64>,
    pub parallels: Vec<f64>,
    pub n_meridians: usize,
    pub n_parallels: usize,
}

impl GridSpec {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixed grid used on projections the live path does not support:
    /// ten evenly spaced lines per axis over the whole sphere.
    pub fn static_fallback() -> Self {
        let meridians = linspace(-180.0, 180.0, 10);
        let parallels = linspace(-90.0, 90.0, 10);
        Self {
            n_meridians: meridians.len(),
            n_parallels: parallels.len(),
            meridians,
            parallels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meridians.is_empty() && self.parallels.is_empty()
    }
}

/// Chooses grid density for the current viewport.
///
/// Common zoom bands hit the breakpoint table directly. Past the table the
/// planner scales the *previous* count by powers of two until it brackets
/// the target: recomputing from scratch every event would visibly flip
/// between adjacent counts while panning along a zoom boundary, so the
/// previous count is the anchor (hysteresis).
#[derive(Debug, Clone)]
pub struct GridPlanner {
    config: GridConfig,
    n_meridians: i64,
    n_parallels: i64,
}

impl GridPlanner {
    pub fn new(config: GridConfig) -> Self {
        let initial = config.base_lines.round() as i64;
        Self {
            config,
            n_meridians: initial,
            n_parallels: initial,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Current hysteresis anchors (the counts of the last plan).
    pub fn counts(&self) -> (i64, i64) {
        (self.n_meridians, self.n_parallels)
    }

    /// Plans the grid for a viewport.
    ///
    /// A non-finite or empty span yields an empty spec; the caller keeps
    /// whatever grid is already on screen.
    pub fn plan(&mut self, viewport: &Viewport) -> GridSpec {
        let lon_span = viewport.lon_span();
        let lat_span = viewport.lat_span();
        if !(lon_span > 0.0) || !(lat_span > 0.0) || !lon_span.is_finite() || !lat_span.is_finite()
        {
            log::trace!("degenerate viewport spans {lon_span} x {lat_span}, keeping grid");
            return GridSpec::empty();
        }

        // Estimated full-sphere line counts that would put base_lines lines
        // across the visible span.
        let target_lon = (self.config.base_lines * 360.0 / lon_span).round() as i64;
        let target_lat = (self.config.base_lines * 180.0 / lat_span).round() as i64;

        self.n_meridians = GridConfig::lookup(&self.config.lon_table, target_lon)
            .unwrap_or_else(|| scale_by_twos(target_lon, self.n_meridians));
        self.n_parallels = GridConfig::lookup(&self.config.lat_table, target_lat)
            .unwrap_or_else(|| scale_by_twos(target_lat, self.n_parallels));

        log::debug!(
            "grid plan: targets ({target_lon}, {target_lat}) -> counts ({}, {})",
            self.n_meridians,
            self.n_parallels
        );

        let meridians = if self.n_meridians > 1 {
            meridian_values(self.n_meridians as usize, viewport)
        } else {
            Vec::new()
        };
        let parallels = if self.n_parallels > 1 {
            parallel_values(self.n_parallels as usize, viewport)
        } else {
            Vec::new()
        };

        GridSpec {
            n_meridians: if self.n_meridians > 1 {
                self.n_meridians as usize
            } else {
                0
            },
            n_parallels: if self.n_parallels > 1 {
                self.n_parallels as usize
            } else {
                0
            },
            meridians,
            parallels,
        }
    }
}

impl Default for GridPlanner {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

/// Power-of-two count scaling, anchored on the previous count.
///
/// Halving uses `n/2 + 1` and doubling `2n - 1` so an odd count stays odd
/// across steps; the final parity check catches counts injected from a
/// custom table.
fn scale_by_twos(target: i64, mut current: i64) -> i64 {
    let mut half = current / 2 + 1;
    let mut twice = current * 2 - 1;
    if target < current && target > 1 {
        while target < current {
            current = half;
            half = current / 2 + 1;
            if current < 3 {
                break;
            }
        }
    } else {
        while target >= twice {
            current = twice;
            twice = current * 2 - 1;
        }
    }

    if current % 2 == 0 {
        current += 1;
    }
    current
}

/// `n` evenly spaced values from `a` to `b`, endpoints included.
fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n).map(|i| a + step * i as f64).collect()
        }
    }
}

/// Meridian candidates: one nominal period plus a wrapped copy on either
/// side, so a viewport panned across the antimeridian still sees a
/// continuous grid; then filtered to the viewport inclusively.
fn meridian_values(n: usize, viewport: &Viewport) -> Vec<f64> {
    let nominal = linspace(-180.0, 180.0, n);
    let mut values: Vec<f64> = nominal
        .iter()
        .map(|&lon| lon - 360.0)
        .chain(nominal.iter().copied())
        .chain(nominal.iter().map(|&lon| lon + 360.0))
        .filter(|&lon| lon >= viewport.lon_min && lon <= viewport.lon_max)
        .collect();
    // The tiled periods meet exactly at ±180; one line per longitude.
    values.dedup();
    values
}

/// Parallel candidates over [-90, 90], filtered to the viewport inclusively.
fn parallel_values(n: usize, viewport: &Viewport) -> Vec<f64> {
    linspace(-90.0, 90.0, n)
        .into_iter()
        .filter(|&lat| lat >= viewport.lat_min && lat <= viewport.lat_max)
        .collect()
}
