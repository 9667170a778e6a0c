//! Corrective rules applied after the initial grid, in order:
//!
//! 1. [`forbid_single_tile`] — a 1×1 grid is split along the longer edge.
//! 2. [`promote_near_square`] — a 2×1 or 1×2 grid over a near-square image
//!    becomes 2×2.
//! 3. [`uniformity_backstop`] — an axis whose trailing tile is much narrower
//!    than the rest gets exactly one more division (not iterated).
//!
//! Each rule is a pure function of the grid, the shape and the config.

use crate::config::PlannerConfig;
use crate::grid::{Axis, TileGrid};
use crate::shape::ImageShape;

/// Record of which adjustments fired while planning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Adjustments {
    /// Columns added by automatic mode's long-edge cap.
    pub long_edge_splits_x: u32,
    /// Rows added by automatic mode's long-edge cap.
    pub long_edge_splits_y: u32,
    /// Axis split because the grid was 1×1.
    pub single_tile_split: Option<Axis>,
    /// 2×1 / 1×2 promoted to 2×2.
    pub near_square_promoted: bool,
    /// One column added for a narrow trailing column.
    pub uniformity_split_x: bool,
    /// One row added for a short trailing row.
    pub uniformity_split_y: bool,
}

impl Adjustments {
    pub(crate) fn record_long_edge_splits(&mut self, axis: Axis, splits: u32) {
        match axis {
            Axis::X => self.long_edge_splits_x = splits,
            Axis::Y => self.long_edge_splits_y = splits,
        }
    }

    fn record_uniformity_split(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.uniformity_split_x = true,
            Axis::Y => self.uniformity_split_y = true,
        }
    }

    /// Whether any rule changed the grid.
    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

/// Apply all corrective rules in order.
pub fn apply_all(
    grid: TileGrid,
    shape: &ImageShape,
    config: &PlannerConfig,
    adjustments: &mut Adjustments,
) -> TileGrid {
    let grid = forbid_single_tile(grid, shape, config, adjustments);
    let grid = promote_near_square(grid, shape, config, adjustments);
    uniformity_backstop(grid, shape, config, adjustments)
}

/// Split a 1×1 grid in two along the longer image edge (width wins ties).
pub fn forbid_single_tile(
    mut grid: TileGrid,
    shape: &ImageShape,
    config: &PlannerConfig,
    adjustments: &mut Adjustments,
) -> TileGrid {
    if !config.forbid_single_tile || !grid.is_single() {
        return grid;
    }
    let axis = if shape.is_landscape_or_square() {
        Axis::X
    } else {
        Axis::Y
    };
    grid.set_divisions(axis, 2);
    tracing::trace!(?axis, "split single-tile grid");
    adjustments.single_tile_split = Some(axis);
    grid
}

/// Turn a 2×1 or 1×2 grid into 2×2 when the image aspect is near-square.
pub fn promote_near_square(
    grid: TileGrid,
    shape: &ImageShape,
    config: &PlannerConfig,
    adjustments: &mut Adjustments,
) -> TileGrid {
    if !grid.is_two_tile_strip() {
        return grid;
    }
    let aspect = shape.aspect();
    if !config.is_near_square(aspect) {
        return grid;
    }
    tracing::trace!(aspect, from = ?grid, "promoted two-tile strip to 2x2");
    adjustments.near_square_promoted = true;
    TileGrid::new(2, 2)
}

/// Add one division to each axis whose trailing tile is below the
/// configured fraction of a regular tile. Axes are checked independently.
pub fn uniformity_backstop(
    mut grid: TileGrid,
    shape: &ImageShape,
    config: &PlannerConfig,
    adjustments: &mut Adjustments,
) -> TileGrid {
    for axis in [Axis::X, Axis::Y] {
        let u = grid.uniformity(axis, shape);
        if u.ratio < config.uniformity_min_ratio {
            grid.split_once(axis);
            tracing::trace!(
                ?axis,
                ratio = u.ratio,
                regular = u.regular,
                trailing = u.trailing,
                "trailing tile too small, added one division"
            );
            adjustments.record_uniformity_split(axis);
        }
    }
    grid
}
