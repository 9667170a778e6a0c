//! Adaptive tile-grid planning for tiled image processing.
//!
//! Given an image's width and height (and optionally a target pixel budget
//! per tile), decides how many columns and rows to split it into and how much
//! adjacent tiles should overlap.
//!
//! Pure arithmetic — no pixel operations, no allocations, `no_std` compatible.
//!
//! # Modules
//!
//! - [`shape`] — Image dimensions and extraction from tensor-like buffers
//! - [`config`] — Caps, tolerances and thresholds injected into the planner
//! - [`grid`] — Tile grids and per-axis uniformity
//! - [`mode`] — Automatic vs target-size grid derivation
//! - [`rules`] — Corrective rules applied after either mode
//! - [`overlap`] — Overlap rate from tile size, count and uniformity
//! - [`planner`] — The planning pipeline and its results
//!
//! # Example
//!
//! ```
//! use tileplan::plan;
//!
//! // [batch, height, width, channel]
//! let result = plan(Some(&[1usize, 2048, 4096, 3]), 0.0).unwrap();
//! assert_eq!((result.columns, result.rows), (2, 1));
//! assert_eq!(result.overlap_rate, 0.05);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod config;
pub mod grid;
pub mod mode;
pub mod overlap;
pub mod planner;
pub mod rules;
pub mod shape;

pub use config::{OverlapConfig, PlannerConfig};
pub use grid::{Axis, AxisUniformity, TileGrid};
pub use mode::{GridStrategy, PlanningMode, TARGET_WAN_MAX, WAN};
pub use planner::{PlanError, PlanReport, PlanResult, TilePlanner, plan, plan_shape};
pub use rules::Adjustments;
pub use shape::{ImageShape, InvalidInput, PixelBuffer};
