//! Tile grids and per-axis uniformity.
//!
//! A [`TileGrid`] stores only division counts. Tile dimensions are always
//! derived from the image shape on demand, so they can never drift from the
//! counts after a rule changes them.

use crate::shape::ImageShape;

/// One of the two image axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (width, columns).
    X,
    /// Vertical axis (height, rows).
    Y,
}

impl Axis {
    /// Image length along this axis.
    pub fn length(self, shape: &ImageShape) -> u32 {
        match self {
            Self::X => shape.width,
            Self::Y => shape.height,
        }
    }
}

/// Column and row counts for splitting an image into tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileGrid {
    /// Number of columns (divisions along the width). Always ≥ 1.
    pub columns: u32,
    /// Number of rows (divisions along the height). Always ≥ 1.
    pub rows: u32,
}

impl TileGrid {
    /// Create a grid, raising either count to at least 1.
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: if columns == 0 { 1 } else { columns },
            rows: if rows == 0 { 1 } else { rows },
        }
    }

    /// Division count along `axis`.
    pub fn divisions(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.columns,
            Axis::Y => self.rows,
        }
    }

    /// Add one division along `axis`.
    pub fn split_once(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.columns = self.columns.saturating_add(1),
            Axis::Y => self.rows = self.rows.saturating_add(1),
        }
    }

    /// Set the division count along `axis` (floored to 1).
    pub fn set_divisions(&mut self, axis: Axis, n: u32) {
        let n = n.max(1);
        match axis {
            Axis::X => self.columns = n,
            Axis::Y => self.rows = n,
        }
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Whether the grid is a single tile.
    pub fn is_single(&self) -> bool {
        self.columns == 1 && self.rows == 1
    }

    /// Whether the grid is 2×1 or 1×2.
    pub fn is_two_tile_strip(&self) -> bool {
        matches!((self.columns, self.rows), (2, 1) | (1, 2))
    }

    /// Regular tile length along `axis`: `ceil(length / n)`.
    pub fn tile_length(&self, axis: Axis, shape: &ImageShape) -> u32 {
        axis.length(shape).div_ceil(self.divisions(axis))
    }

    /// Regular tile width: `ceil(W / columns)`.
    pub fn tile_width(&self, shape: &ImageShape) -> u32 {
        self.tile_length(Axis::X, shape)
    }

    /// Regular tile height: `ceil(H / rows)`.
    pub fn tile_height(&self, shape: &ImageShape) -> u32 {
        self.tile_length(Axis::Y, shape)
    }

    /// Shorter edge of a regular tile.
    pub fn tile_short_edge(&self, shape: &ImageShape) -> u32 {
        self.tile_width(shape).min(self.tile_height(shape))
    }

    /// Uniformity of the division along `axis`.
    pub fn uniformity(&self, axis: Axis, shape: &ImageShape) -> AxisUniformity {
        AxisUniformity::of(axis.length(shape), self.divisions(axis))
    }
}

/// How evenly an axis of length `L` divides into `n` parts.
///
/// The first `n - 1` tiles are `ceil(L / n)` long; the trailing tile takes
/// whatever remains (never less than 1).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisUniformity {
    /// Length of every tile but the last.
    pub regular: u32,
    /// Length of the last tile.
    pub trailing: u32,
    /// `trailing / regular`; `1.0` when the axis is not divided.
    pub ratio: f64,
}

impl AxisUniformity {
    /// Measure an axis of `total` pixels split into `n` parts.
    ///
    /// ```
    /// use tileplan::AxisUniformity;
    ///
    /// let u = AxisUniformity::of(10, 4);
    /// assert_eq!((u.regular, u.trailing), (3, 1));
    /// assert!(u.ratio < 0.34);
    /// ```
    pub fn of(total: u32, n: u32) -> Self {
        if n <= 1 {
            return Self {
                regular: total,
                trailing: total,
                ratio: 1.0,
            };
        }
        let regular = total.div_ceil(n);
        // regular * (n - 1) can exceed total (and u32) when n approaches total.
        let covered = regular as u64 * (n - 1) as u64;
        let trailing = (total as u64).saturating_sub(covered).max(1) as u32;
        let ratio = if regular == 0 {
            1.0
        } else {
            trailing as f64 / regular as f64
        };
        Self {
            regular,
            trailing,
            ratio,
        }
    }
}
