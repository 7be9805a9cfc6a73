//! Grid density configuration.
//!
//! Breakpoint tables are data, not behavior: the planner walks whatever
//! table it was constructed with, so hosts can retune zoom bands without
//! touching the scaling fallback.

use serde::{Deserialize, Serialize};

/// Nominal number of grid lines across an all-sky view.
pub const BASE_GRID_LINES: f64 = 5.0;

/// Ascending breakpoint rows: the first row whose `max_target` is at or
/// above the computed target density supplies the line count.
pub type BreakpointTable = Vec<(u32, u32)>;

/// Immutable planner configuration, passed in at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Target lines across the viewport before snapping.
    pub base_lines: f64,
    pub lon_table: BreakpointTable,
    pub lat_table: BreakpointTable,
}

impl Default for GridConfig {
    fn default() -> Self {
        // The 2^k + 1 ladder: every count is odd, and the ladder is closed
        // under the fallback's halve (n/2 + 1) and double (2n - 1) steps.
        let ladder: BreakpointTable = [5u32, 9, 17, 33, 65, 129]
            .iter()
            .map(|&n| (n, n))
            .collect();
        Self {
            base_lines: BASE_GRID_LINES,
            lon_table: ladder.clone(),
            lat_table: ladder,
        }
    }
}

impl GridConfig {
    /// Looks a target density up in a breakpoint table.
    pub(crate) fn lookup(table: &[(u32, u32)], target: i64) -> Option<i64> {
        table
            .iter()
            .find(|&&(max_target, _)| target <= max_target as i64)
            .map(|&(_, count)| count as i64)
    }
}
