//! Initial grid derivation: automatic vs target-size.
//!
//! The caller's target is resolved into a [`PlanningMode`] exactly once. Each
//! mode derives the initial grid through [`GridStrategy`]; the corrective
//! rules in [`crate::rules`] run afterwards regardless of mode.

use num_traits::Float;

use crate::config::PlannerConfig;
use crate::grid::{Axis, TileGrid};
use crate::rules::Adjustments;
use crate::shape::ImageShape;

/// Pixels per caller-facing target unit ("wan", ten thousand pixels).
pub const WAN: f64 = 10_000.0;

/// Upper end of the documented target range, in wan. Larger values are
/// still honoured.
pub const TARGET_WAN_MAX: f64 = 1000.0;

/// Derives the initial column/row split for an image.
pub trait GridStrategy {
    /// Compute the grid before corrective rules. Long-edge splits performed
    /// along the way are recorded in `adjustments`.
    fn derive_grid(
        &self,
        shape: &ImageShape,
        config: &PlannerConfig,
        adjustments: &mut Adjustments,
    ) -> TileGrid;
}

/// How the initial grid is chosen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlanningMode {
    /// Fewest tiles that keep every tile edge within the configured caps.
    Automatic,
    /// Tiles sized as close as possible to a pixel budget. Edge caps are not
    /// applied.
    TargetSize {
        /// Desired pixels per tile. Always positive.
        pixels_per_tile: f64,
    },
}

impl PlanningMode {
    /// Resolve a target given in pixels per tile. Zero, negative and NaN
    /// targets select [`Automatic`](Self::Automatic).
    pub fn from_target_pixels(pixels_per_tile: f64) -> Self {
        if pixels_per_tile > 0.0 {
            Self::TargetSize { pixels_per_tile }
        } else {
            Self::Automatic
        }
    }

    /// Resolve a target given in wan (units of [`WAN`] pixels).
    ///
    /// ```
    /// use tileplan::PlanningMode;
    ///
    /// assert_eq!(PlanningMode::from_target_wan(0.0), PlanningMode::Automatic);
    /// assert_eq!(
    ///     PlanningMode::from_target_wan(50.0),
    ///     PlanningMode::TargetSize { pixels_per_tile: 500_000.0 },
    /// );
    /// ```
    pub fn from_target_wan(target_wan: f64) -> Self {
        if target_wan > 0.0 {
            Self::from_target_pixels(target_wan * WAN)
        } else {
            Self::Automatic
        }
    }
}

impl GridStrategy for PlanningMode {
    fn derive_grid(
        &self,
        shape: &ImageShape,
        config: &PlannerConfig,
        adjustments: &mut Adjustments,
    ) -> TileGrid {
        match *self {
            Self::Automatic => AutomaticGrid.derive_grid(shape, config, adjustments),
            Self::TargetSize { pixels_per_tile } => {
                TargetSizeGrid { pixels_per_tile }.derive_grid(shape, config, adjustments)
            }
        }
    }
}

/// Minimum tile count under the short-edge cap, then re-split any axis whose
/// tiles still exceed the long-edge cap.
///
/// The short-edge cap only picks the starting counts; it is not re-checked
/// after long-edge splits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AutomaticGrid;

impl GridStrategy for AutomaticGrid {
    fn derive_grid(
        &self,
        shape: &ImageShape,
        config: &PlannerConfig,
        adjustments: &mut Adjustments,
    ) -> TileGrid {
        let denom = config.short_edge_limit();
        let mut grid = TileGrid::new(shape.width.div_ceil(denom), shape.height.div_ceil(denom));

        let long_cap = config.long_edge_limit();
        for axis in [Axis::X, Axis::Y] {
            let mut splits = 0u32;
            // ceil(L / n) reaches 1 before n saturates, and long_cap >= 1.
            while grid.tile_length(axis, shape) > long_cap {
                grid.split_once(axis);
                splits += 1;
            }
            if splits > 0 {
                tracing::trace!(?axis, splits, long_cap, "long-edge cap forced extra splits");
                adjustments.record_long_edge_splits(axis, splits);
            }
        }
        grid
    }
}

/// Apportion `W·H / pixels_per_tile` tiles between the axes in proportion to
/// the aspect ratio, so tiles come out roughly square.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetSizeGrid {
    /// Desired pixels per tile.
    pub pixels_per_tile: f64,
}

impl GridStrategy for TargetSizeGrid {
    fn derive_grid(
        &self,
        shape: &ImageShape,
        _config: &PlannerConfig,
        _adjustments: &mut Adjustments,
    ) -> TileGrid {
        let total_tiles = shape.total_pixels() as f64 / self.pixels_per_tile;
        let aspect = shape.aspect();
        if aspect >= 1.0 {
            let columns = round_count(Float::sqrt(total_tiles * aspect));
            let rows = round_count(total_tiles / columns as f64);
            TileGrid::new(columns, rows)
        } else {
            let rows = round_count(Float::sqrt(total_tiles / aspect));
            let columns = round_count(total_tiles / rows as f64);
            TileGrid::new(columns, rows)
        }
    }
}

/// Round half to even, then clamp to a count of at least 1.
fn round_count(x: f64) -> u32 {
    // NaN casts to 0; +inf saturates to u32::MAX.
    (round_half_even(x) as u32).max(1)
}

/// Banker's rounding: ties go to the nearest even integer.
fn round_half_even(x: f64) -> f64 {
    let r = Float::round(x);
    if Float::abs(r - x) == 0.5 {
        2.0 * Float::round(x / 2.0)
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(mode: PlanningMode, w: u32, h: u32, config: &PlannerConfig) -> TileGrid {
        mode.derive_grid(&ImageShape::new(w, h), config, &mut Adjustments::default())
    }

    // ── mode resolution ─────────────────────────────────────────────────

    #[test]
    fn non_positive_targets_are_automatic() {
        assert_eq!(PlanningMode::from_target_wan(0.0), PlanningMode::Automatic);
        assert_eq!(PlanningMode::from_target_wan(-5.0), PlanningMode::Automatic);
        assert_eq!(PlanningMode::from_target_wan(f64::NAN), PlanningMode::Automatic);
        assert_eq!(PlanningMode::from_target_pixels(0.0), PlanningMode::Automatic);
    }

    #[test]
    fn wan_scale() {
        assert_eq!(
            PlanningMode::from_target_wan(1.5),
            PlanningMode::TargetSize {
                pixels_per_tile: 15_000.0
            }
        );
    }

    // ── rounding ────────────────────────────────────────────────────────

    #[test]
    fn round_half_even_ties() {
        assert_eq!(round_half_even(0.5), 0.0);
        assert_eq!(round_half_even(1.5), 2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(3.5), 4.0);
        assert_eq!(round_half_even(2.4), 2.0);
        assert_eq!(round_half_even(2.6), 3.0);
    }

    #[test]
    fn round_count_floors_to_one() {
        assert_eq!(round_count(0.0), 1);
        assert_eq!(round_count(0.5), 1);
        assert_eq!(round_count(f64::NAN), 1);
        assert_eq!(round_count(f64::INFINITY), u32::MAX);
    }

    // ── automatic ───────────────────────────────────────────────────────

    #[test]
    fn automatic_minimum_split() {
        let c = PlannerConfig::default();
        // denom = 2176
        assert_eq!(derive(PlanningMode::Automatic, 4096, 2048, &c), TileGrid::new(2, 1));
        assert_eq!(derive(PlanningMode::Automatic, 2000, 2000, &c), TileGrid::new(1, 1));
        assert_eq!(derive(PlanningMode::Automatic, 2176, 2177, &c), TileGrid::new(1, 2));
        assert_eq!(derive(PlanningMode::Automatic, 8000, 6000, &c), TileGrid::new(4, 3));
    }

    #[test]
    fn automatic_long_edge_enforcement() {
        // Short cap above long cap so the long-edge loop has work to do.
        let c = PlannerConfig::default().edge_caps(4000, 1000).tolerance(0);
        let shape = ImageShape::new(3000, 2500);
        let mut adj = Adjustments::default();
        let grid = AutomaticGrid.derive_grid(&shape, &c, &mut adj);
        assert_eq!(grid, TileGrid::new(3, 3));
        assert_eq!(adj.long_edge_splits_x, 2);
        assert_eq!(adj.long_edge_splits_y, 2);
        assert!(grid.tile_width(&shape) <= 1000);
        assert!(grid.tile_height(&shape) <= 1000);
    }

    #[test]
    fn automatic_default_caps_never_need_long_edge_splits() {
        let c = PlannerConfig::default();
        for w in (1..20_000).step_by(997) {
            let mut adj = Adjustments::default();
            let shape = ImageShape::new(w, 1000);
            let grid = AutomaticGrid.derive_grid(&shape, &c, &mut adj);
            assert_eq!(adj.long_edge_splits_x, 0, "w={w}");
            assert!(grid.tile_width(&shape) <= c.long_edge_limit(), "w={w}");
        }
    }

    // ── target size ─────────────────────────────────────────────────────

    #[test]
    fn target_size_landscape() {
        let c = PlannerConfig::default();
        // 8M px / 500k = 16 tiles, aspect 2 → sqrt(32) ≈ 5.66 → 6, 16/6 ≈ 2.67 → 3
        let mode = PlanningMode::from_target_wan(50.0);
        assert_eq!(derive(mode, 4000, 2000, &c), TileGrid::new(6, 3));
    }

    #[test]
    fn target_size_portrait() {
        let c = PlannerConfig::default();
        let mode = PlanningMode::from_target_wan(50.0);
        assert_eq!(derive(mode, 2000, 4000, &c), TileGrid::new(3, 6));
    }

    #[test]
    fn target_size_ties_round_to_even() {
        let c = PlannerConfig::default();
        // 1M px / 160k = 6.25 tiles, sqrt = 2.5 → 2, 6.25 / 2 = 3.125 → 3
        let mode = PlanningMode::from_target_wan(16.0);
        assert_eq!(derive(mode, 1000, 1000, &c), TileGrid::new(2, 3));
    }

    #[test]
    fn target_size_ignores_edge_caps() {
        let c = PlannerConfig::default();
        // One tile's worth of budget for a 10k × 10k image.
        let mode = PlanningMode::from_target_wan(10_000.0);
        let grid = derive(mode, 10_000, 10_000, &c);
        assert_eq!(grid, TileGrid::new(1, 1));
    }

    #[test]
    fn target_size_huge_budget_gives_single_tile() {
        let c = PlannerConfig::default();
        let mode = PlanningMode::from_target_pixels(f64::INFINITY);
        assert_eq!(derive(mode, 640, 480, &c), TileGrid::new(1, 1));
    }
}
