//! The planning pipeline: mode → initial grid → corrective rules → overlap.

use core::fmt;

use crate::config::PlannerConfig;
use crate::grid::{Axis, AxisUniformity, TileGrid};
use crate::mode::{GridStrategy, PlanningMode, TARGET_WAN_MAX};
use crate::overlap::overlap_rate;
use crate::rules::{self, Adjustments};
use crate::shape::{ImageShape, InvalidInput, PixelBuffer};

/// Planner output: how to split the image and how much tiles overlap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanResult {
    /// Number of columns (width factor). Always ≥ 1.
    pub columns: u32,
    /// Number of rows (height factor). Always ≥ 1.
    pub rows: u32,
    /// Fraction of a tile edge shared with its neighbour, in `[0.03, 0.06]`
    /// with the default configuration.
    pub overlap_rate: f64,
}

impl PlanResult {
    /// `(columns, rows, overlap_rate)`.
    pub fn into_tuple(self) -> (u32, u32, f64) {
        (self.columns, self.rows, self.overlap_rate)
    }

    /// The column/row grid.
    pub fn grid(&self) -> TileGrid {
        TileGrid::new(self.columns, self.rows)
    }
}

impl fmt::Display for PlanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}×{} tiles, overlap {:.3}",
            self.columns, self.rows, self.overlap_rate
        )
    }
}

/// Everything the planner decided, for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanReport {
    /// Image dimensions.
    pub shape: ImageShape,
    /// Resolved mode.
    pub mode: PlanningMode,
    /// Grid produced by the mode, before corrective rules.
    pub initial_grid: TileGrid,
    /// Grid after all corrective rules.
    pub grid: TileGrid,
    /// Width-axis uniformity of the final grid.
    pub uniformity_x: AxisUniformity,
    /// Height-axis uniformity of the final grid.
    pub uniformity_y: AxisUniformity,
    /// Which rules fired.
    pub adjustments: Adjustments,
    /// Final output.
    pub result: PlanResult,
}

impl PlanReport {
    /// Regular tile dimensions of the final grid.
    pub fn tile_size(&self) -> (u32, u32) {
        (
            self.grid.tile_width(&self.shape),
            self.grid.tile_height(&self.shape),
        )
    }
}

/// Planning error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// The image shape could not be extracted.
    InvalidInput(InvalidInput),
}

impl From<InvalidInput> for PlanError {
    fn from(e: InvalidInput) -> Self {
        Self::InvalidInput(e)
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {e}"),
        }
    }
}

impl core::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) => Some(e),
        }
    }
}

/// Tile planner with injected configuration.
///
/// Stateless between calls; a shared `&TilePlanner` can be used from any
/// number of threads.
///
/// # Example
///
/// ```
/// use tileplan::{ImageShape, TilePlanner};
///
/// let planner = TilePlanner::default();
/// let result = planner.plan(ImageShape::new(4000, 2000), 50.0);
/// assert_eq!((result.columns, result.rows), (6, 3));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TilePlanner {
    config: PlannerConfig,
}

impl TilePlanner {
    /// Create a planner with the given configuration.
    pub const fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan for an optional pixel buffer and a target in wan (10,000 px)
    /// per tile. A target of 0 or less selects automatic mode.
    pub fn plan_image<B: PixelBuffer + ?Sized>(
        &self,
        image: Option<&B>,
        target_tile_pixels_wan: f64,
    ) -> Result<PlanResult, PlanError> {
        let shape = ImageShape::extract(image)?;
        Ok(self.plan(shape, target_tile_pixels_wan))
    }

    /// Plan for a dimension list (`[..., H, W, C]`).
    pub fn plan_dims(
        &self,
        dims: &[usize],
        target_tile_pixels_wan: f64,
    ) -> Result<PlanResult, PlanError> {
        let shape = ImageShape::from_dims(dims)?;
        Ok(self.plan(shape, target_tile_pixels_wan))
    }

    /// Plan for known dimensions and a target in wan per tile.
    pub fn plan(&self, shape: ImageShape, target_tile_pixels_wan: f64) -> PlanResult {
        if target_tile_pixels_wan > TARGET_WAN_MAX {
            tracing::debug!(
                target_tile_pixels_wan,
                max = TARGET_WAN_MAX,
                "target above documented range, using as given"
            );
        }
        self.plan_report(shape, PlanningMode::from_target_wan(target_tile_pixels_wan))
            .result
    }

    /// Plan with an already-resolved mode and return the full report.
    pub fn plan_report(&self, shape: ImageShape, mode: PlanningMode) -> PlanReport {
        let config = &self.config;
        tracing::debug!(
            width = shape.width,
            height = shape.height,
            ?mode,
            "planning tiles"
        );

        let mut adjustments = Adjustments::default();
        let initial_grid = mode.derive_grid(&shape, config, &mut adjustments);
        let grid = rules::apply_all(initial_grid, &shape, config, &mut adjustments);

        let uniformity_x = grid.uniformity(Axis::X, &shape);
        let uniformity_y = grid.uniformity(Axis::Y, &shape);
        let overlap = overlap_rate(
            grid.tile_short_edge(&shape),
            grid.tile_count(),
            uniformity_x.ratio.min(uniformity_y.ratio),
            &config.overlap,
        );

        let result = PlanResult {
            columns: grid.columns,
            rows: grid.rows,
            overlap_rate: overlap,
        };
        tracing::debug!(
            columns = result.columns,
            rows = result.rows,
            overlap_rate = result.overlap_rate,
            initial = ?initial_grid,
            "tile plan ready"
        );

        PlanReport {
            shape,
            mode,
            initial_grid,
            grid,
            uniformity_x,
            uniformity_y,
            adjustments,
            result,
        }
    }
}

/// Plan with the default configuration.
///
/// `image` is any buffer exposing `[..., H, W, C]` dimensions; `None` is an
/// [`InvalidInput`] error. `target_tile_pixels_wan` is the desired tile size
/// in units of 10,000 pixels; 0 or less means automatic.
pub fn plan<B: PixelBuffer + ?Sized>(
    image: Option<&B>,
    target_tile_pixels_wan: f64,
) -> Result<PlanResult, PlanError> {
    TilePlanner::default().plan_image(image, target_tile_pixels_wan)
}

/// Plan known dimensions with the default configuration.
pub fn plan_shape(width: u32, height: u32, target_tile_pixels_wan: f64) -> PlanResult {
    TilePlanner::default().plan(ImageShape::new(width, height), target_tile_pixels_wan)
}
