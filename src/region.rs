//! Image dimensions and crop rectangles.
//!
//! Pure geometry. Every rectangle handed out by this crate passes through
//! [`Rect::clamp_within`], so containment in the source image is checked in
//! one place rather than once per strategy.

use crate::error::CropError;

/// Width × height dimensions in pixels. Both are always non-zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a size from dimensions reported by a decoder.
    ///
    /// Fails with [`CropError::InvalidDimensions`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CropError> {
        Self::from_signed(i64::from(width), i64::from(height))
    }

    /// Create a size from signed dimensions.
    ///
    /// Zero, negative, and values that do not fit in `u32` are rejected.
    pub fn from_signed(width: i64, height: i64) -> Result<Self, CropError> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(CropError::InvalidDimensions { width, height }),
        }
    }

    /// Whether `rect` lies entirely inside an image of this size and has
    /// positive area.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.width > 0
            && rect.height > 0
            && u64::from(rect.x) + u64::from(rect.width) <= u64::from(self.width)
            && u64::from(rect.y) + u64::from(rect.height) <= u64::from(self.height)
    }
}

/// Axis-aligned crop rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamp a proposed placement so it fits inside `size`.
    ///
    /// Extents are clamped to `1..=dimension` first, then the origin is
    /// clamped to `0..=dimension - extent`. The result always has positive
    /// area and never extends past an edge.
    pub fn clamp_within(proposal: Proposal, size: Size) -> Self {
        let (x, width) = clamp_axis(proposal.x, proposal.width, size.width);
        let (y, height) = clamp_axis(proposal.y, proposal.height, size.height);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// Fraction of the source area kept by this crop.
    pub fn area_fraction(&self, size: Size) -> f64 {
        (f64::from(self.width) * f64::from(self.height))
            / (f64::from(size.width) * f64::from(size.height))
    }
}

impl core::fmt::Display for Rect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Unclamped placement produced by a strategy, in signed pixel units.
///
/// Strategies may overshoot in either direction on small images;
/// [`Rect::clamp_within`] turns this into a valid [`Rect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

fn clamp_axis(origin: i64, extent: i64, bound: u32) -> (u32, u32) {
    let bound = i64::from(bound.max(1));
    let extent = num_traits::clamp(extent, 1, bound);
    let origin = num_traits::clamp(origin, 0, bound - extent);
    // Both values are within 0..=bound, and bound came from a u32.
    (origin as u32, extent as u32)
}

/// Inclusive integer range whose lower bound never exceeds its upper bound.
///
/// If the requested upper bound falls below the lower bound the range
/// collapses to the single value `lo`.
pub(crate) fn collapse_range(lo: i64, hi: i64) -> (i64, i64) {
    if hi < lo { (lo, lo) } else { (lo, hi) }
}
