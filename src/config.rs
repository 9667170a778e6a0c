//! Planner configuration.
//!
//! Every cap, tolerance and threshold the planner uses lives here so the
//! corrective rules can be exercised with alternative values. The defaults
//! are the tuned production values.
//!
//! # Example
//!
//! ```
//! use tileplan::{PlannerConfig, TilePlanner};
//!
//! let planner = TilePlanner::new(
//!     PlannerConfig::default()
//!         .edge_caps(1024, 1152)
//!         .tolerance(64),
//! );
//! let result = planner.plan_dims(&[1, 2000, 3000, 3], 0.0).unwrap();
//! assert_eq!((result.columns, result.rows), (3, 2));
//! ```

/// Caps, tolerances and thresholds for grid derivation and correction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Short-edge hard cap for a tile in automatic mode.
    pub short_edge_max: u32,
    /// Long-edge hard cap for a tile in automatic mode.
    pub long_edge_max: u32,
    /// Slack added to both caps so ceiling rounding does not cost an extra split.
    pub tolerance: u32,
    /// Split a 1×1 grid along the longer image edge.
    pub forbid_single_tile: bool,
    /// Lower bound of the aspect band that counts as near-square (inclusive).
    pub near_square_low: f64,
    /// Upper bound of the aspect band that counts as near-square (inclusive).
    pub near_square_high: f64,
    /// Trailing/regular tile ratio below which an axis gets one more division.
    pub uniformity_min_ratio: f64,
    /// Overlap rate selection.
    pub overlap: OverlapConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            short_edge_max: 2048,
            long_edge_max: 2304,
            tolerance: 128,
            forbid_single_tile: true,
            near_square_low: 0.85,
            near_square_high: 1.18,
            uniformity_min_ratio: 0.80,
            overlap: OverlapConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Set the short-edge and long-edge caps used by automatic mode.
    pub fn edge_caps(mut self, short_edge_max: u32, long_edge_max: u32) -> Self {
        self.short_edge_max = short_edge_max;
        self.long_edge_max = long_edge_max;
        self
    }

    /// Set the tolerance added to both edge caps.
    pub fn tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Allow or forbid a 1×1 grid.
    pub fn forbid_single_tile(mut self, forbid: bool) -> Self {
        self.forbid_single_tile = forbid;
        self
    }

    /// Set the inclusive aspect band treated as near-square.
    pub fn near_square(mut self, low: f64, high: f64) -> Self {
        self.near_square_low = low;
        self.near_square_high = high;
        self
    }

    /// Set the minimum trailing/regular ratio before an axis is re-split.
    pub fn uniformity_min_ratio(mut self, ratio: f64) -> Self {
        self.uniformity_min_ratio = ratio;
        self
    }

    /// Replace the overlap settings.
    pub fn overlap(mut self, overlap: OverlapConfig) -> Self {
        self.overlap = overlap;
        self
    }

    /// Divisor for the initial automatic split: short cap + tolerance, at least 1.
    pub fn short_edge_limit(&self) -> u32 {
        self.short_edge_max.saturating_add(self.tolerance).max(1)
    }

    /// Largest tile edge automatic mode accepts: long cap + tolerance.
    pub fn long_edge_limit(&self) -> u32 {
        self.long_edge_max.saturating_add(self.tolerance).max(1)
    }

    /// Whether `aspect` falls in the near-square band.
    pub fn is_near_square(&self, aspect: f64) -> bool {
        self.near_square_low <= aspect && aspect <= self.near_square_high
    }
}

/// Overlap rate tiers.
///
/// Large or few tiles get the most overlap; a poorly balanced trailing tile
/// adds a small boost. The result is always clamped to `[min_rate, max_rate]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlapConfig {
    /// Tile short edge at or above which `large_rate` applies.
    pub large_tile_edge: u32,
    /// Tile short edge at or above which `medium_rate` applies.
    pub medium_tile_edge: u32,
    /// Tile count at or below which `large_rate` applies regardless of size.
    pub few_tiles: u64,
    /// Rate for large tiles or few tiles.
    pub large_rate: f64,
    /// Rate for medium tiles.
    pub medium_rate: f64,
    /// Rate for everything else.
    pub small_rate: f64,
    /// Uniformity below which `uneven_boost` is added.
    pub uneven_threshold: f64,
    /// Extra overlap for unevenly divided grids.
    pub uneven_boost: f64,
    /// Lower clamp.
    pub min_rate: f64,
    /// Upper clamp.
    pub max_rate: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            large_tile_edge: 1800,
            medium_tile_edge: 1400,
            few_tiles: 4,
            large_rate: 0.05,
            medium_rate: 0.045,
            small_rate: 0.04,
            uneven_threshold: 0.9,
            uneven_boost: 0.005,
            min_rate: 0.03,
            max_rate: 0.06,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let c = PlannerConfig::default();
        assert_eq!(c.short_edge_limit(), 2176);
        assert_eq!(c.long_edge_limit(), 2432);
    }

    #[test]
    fn zero_limits_floor_to_one() {
        let c = PlannerConfig::default().edge_caps(0, 0).tolerance(0);
        assert_eq!(c.short_edge_limit(), 1);
        assert_eq!(c.long_edge_limit(), 1);
    }

    #[test]
    fn limits_saturate() {
        let c = PlannerConfig::default().edge_caps(u32::MAX, u32::MAX);
        assert_eq!(c.short_edge_limit(), u32::MAX);
    }

    #[test]
    fn near_square_band_is_inclusive() {
        let c = PlannerConfig::default();
        assert!(c.is_near_square(0.85));
        assert!(c.is_near_square(1.0));
        assert!(c.is_near_square(1.18));
        assert!(!c.is_near_square(0.849));
        assert!(!c.is_near_square(1.181));
    }

    #[test]
    fn builder_setters() {
        let c = PlannerConfig::default()
            .forbid_single_tile(false)
            .near_square(0.9, 1.1)
            .uniformity_min_ratio(0.5);
        assert!(!c.forbid_single_tile);
        assert_eq!((c.near_square_low, c.near_square_high), (0.9, 1.1));
        assert_eq!(c.uniformity_min_ratio, 0.5);
        assert_eq!(c.overlap, OverlapConfig::default());
    }
}
