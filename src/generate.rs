//! Strategy selection and region generation.
//!
//! # Example
//!
//! ```
//! use badcrop::{generate_bad_crop_region, Size};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let crop = generate_bad_crop_region(800, 600, &mut rng).unwrap();
//!
//! assert!(Size::new(800, 600).unwrap().contains(&crop.rect));
//! ```

use crate::error::CropError;
use crate::random::CropRandom;
use crate::region::{Rect, Size};
use crate::strategy::CropStrategy;

/// A generated bad crop: which heuristic ran and the region it picked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BadCrop {
    pub strategy: CropStrategy,
    pub rect: Rect,
}

/// Pick a strategy uniformly at random and compute its crop region.
///
/// Fails only when `width` or `height` is not a positive `u32`.
pub fn generate_bad_crop_region<R: CropRandom + ?Sized>(
    width: i64,
    height: i64,
    rng: &mut R,
) -> Result<BadCrop, CropError> {
    let size = Size::from_signed(width, height)?;
    Ok(bad_crop_for(size, None, rng))
}

/// Compute a bad crop for an already validated size.
///
/// `forced` skips the random strategy selection.
pub fn bad_crop_for<R: CropRandom + ?Sized>(
    size: Size,
    forced: Option<CropStrategy>,
    rng: &mut R,
) -> BadCrop {
    let strategy = forced.unwrap_or_else(|| CropStrategy::choose(rng));
    BadCrop {
        strategy,
        rect: strategy.region(size, rng),
    }
}
