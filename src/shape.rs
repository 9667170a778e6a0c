//! Image dimensions and their extraction from tensor-like pixel buffers.
//!
//! Buffers are read with a fixed axis convention: the third-from-last axis is
//! height and the second-from-last is width, i.e. `[batch, height, width,
//! channel]` or any shape ending in `[height, width, channel]`. Leading axes
//! are ignored.

use core::fmt;

/// Width × height of the image being tiled, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageShape {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageShape {
    /// Create a new shape.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height. A zero height yields `1.0` rather than dividing by zero.
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f64 / self.height as f64
    }

    /// Total pixel count.
    pub fn total_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether the width is at least the height.
    pub fn is_landscape_or_square(&self) -> bool {
        self.width >= self.height
    }

    /// Read height and width from a dimension list (`[..., H, W, C]`).
    ///
    /// ```
    /// use tileplan::ImageShape;
    ///
    /// let shape = ImageShape::from_dims(&[1, 600, 800, 3]).unwrap();
    /// assert_eq!(shape, ImageShape::new(800, 600));
    /// ```
    pub fn from_dims(dims: &[usize]) -> Result<Self, InvalidInput> {
        let n = dims.len();
        if n < 3 {
            return Err(InvalidInput::TooFewDimensions { found: n });
        }
        let height = dim_to_u32(dims[n - 3])?;
        let width = dim_to_u32(dims[n - 2])?;
        if width == 0 || height == 0 {
            return Err(InvalidInput::ZeroDimension);
        }
        Ok(Self { width, height })
    }

    /// Extract the shape from an optional pixel buffer.
    pub fn extract<B: PixelBuffer + ?Sized>(image: Option<&B>) -> Result<Self, InvalidInput> {
        let image = image.ok_or(InvalidInput::MissingImage)?;
        Self::from_dims(image.dims())
    }
}

fn dim_to_u32(d: usize) -> Result<u32, InvalidInput> {
    u32::try_from(d).map_err(|_| InvalidInput::DimensionOverflow)
}

/// Anything that behaves like a multi-dimensional pixel buffer.
///
/// Only the dimension list is consulted; pixel data is never touched.
pub trait PixelBuffer {
    /// Sizes of each axis, outermost first.
    fn dims(&self) -> &[usize];
}

impl PixelBuffer for [usize] {
    fn dims(&self) -> &[usize] {
        self
    }
}

impl<const N: usize> PixelBuffer for [usize; N] {
    fn dims(&self) -> &[usize] {
        self
    }
}

impl<T: PixelBuffer + ?Sized> PixelBuffer for &T {
    fn dims(&self) -> &[usize] {
        (**self).dims()
    }
}

#[cfg(feature = "std")]
impl PixelBuffer for Vec<usize> {
    fn dims(&self) -> &[usize] {
        self
    }
}

/// Why an image shape could not be extracted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidInput {
    /// No image was supplied.
    MissingImage,
    /// The buffer has fewer than three axes.
    TooFewDimensions {
        /// Number of axes actually present.
        found: usize,
    },
    /// Width or height is zero.
    ZeroDimension,
    /// Width or height does not fit in a `u32`.
    DimensionOverflow,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingImage => f.write_str("image is missing"),
            Self::TooFewDimensions { found } => write!(
                f,
                "image has {found} dimension(s), expected at least 3 ([..., H, W, C])"
            ),
            Self::ZeroDimension => f.write_str("image width or height is zero"),
            Self::DimensionOverflow => f.write_str("image width or height exceeds u32::MAX"),
        }
    }
}

impl core::error::Error for InvalidInput {}
