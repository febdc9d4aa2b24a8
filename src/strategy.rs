//! The five bad-crop heuristics.
//!
//! Each strategy keeps most of the image but places the crop so the
//! composition is slightly wrong: off center, missing the bottom or top,
//! missing one side, or awkwardly inset. None of them look at pixels.
//!
//! ```text
//!     slightly_off_center   cut_bottom      cut_top         cut_side
//!     ┌─────────────┐       ┌──█████████─┐  ┌────────────┐  ┌──────────┐
//!     │   ┌──────┐  │       │  █████████ │  │            │  █████     │
//!     │   │██████│  │       │  █████████ │  │  █████████ │  █████     │
//!     │   └──────┘  │       │            │  │  █████████ │  █████     │
//!     └─────────────┘       └────────────┘  └──█████████─┘  └──────────┘
//! ```

use num_traits::Float;

use crate::random::CropRandom;
use crate::region::{Proposal, Rect, Size, collapse_range};

/// A bad-crop heuristic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CropStrategy {
    /// 65-80% of each axis, centered with a ±10% jitter.
    SlightlyOffCenter,
    /// Wide crop anchored to the top edge, losing the bottom.
    CutBottom,
    /// Wide crop anchored to the bottom edge, losing the top.
    CutTop,
    /// Tall crop anchored to the left or right edge.
    CutSide,
    /// 60-80% of each axis, inset at least 5% from the top-left.
    AwkwardButNotExtreme,
}

/// Ratio ranges `(low, high)` for the crop width and height.
struct Ratios {
    width: (f64, f64),
    height: (f64, f64),
}

impl CropStrategy {
    /// Every strategy, in selection order.
    pub const ALL: [Self; 5] = [
        Self::SlightlyOffCenter,
        Self::CutBottom,
        Self::CutTop,
        Self::CutSide,
        Self::AwkwardButNotExtreme,
    ];

    /// Pick a strategy uniformly at random.
    pub fn choose<R: CropRandom + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Stable snake_case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SlightlyOffCenter => "slightly_off_center",
            Self::CutBottom => "cut_bottom",
            Self::CutTop => "cut_top",
            Self::CutSide => "cut_side",
            Self::AwkwardButNotExtreme => "awkward_but_not_extreme",
        }
    }

    const fn ratios(self) -> Ratios {
        match self {
            Self::SlightlyOffCenter => Ratios {
                width: (0.65, 0.80),
                height: (0.65, 0.80),
            },
            Self::CutBottom | Self::CutTop => Ratios {
                width: (0.75, 0.90),
                height: (0.60, 0.75),
            },
            Self::CutSide => Ratios {
                width: (0.60, 0.75),
                height: (0.75, 0.90),
            },
            Self::AwkwardButNotExtreme => Ratios {
                width: (0.60, 0.80),
                height: (0.60, 0.80),
            },
        }
    }

    /// Compute this strategy's crop for an image of `size`.
    ///
    /// Draw order: width ratio, height ratio, then the position draws.
    pub fn region<R: CropRandom + ?Sized>(self, size: Size, rng: &mut R) -> Rect {
        let w = i64::from(size.width);
        let h = i64::from(size.height);
        let ratios = self.ratios();
        let cw = extent(w, rng.uniform(ratios.width.0, ratios.width.1));
        let ch = extent(h, rng.uniform(ratios.height.0, ratios.height.1));

        let (x, y) = match self {
            Self::SlightlyOffCenter => {
                let dx = fraction(w, 0.10);
                let dy = fraction(h, 0.10);
                let offset_x = rng.int_inclusive(-dx, dx);
                let offset_y = rng.int_inclusive(-dy, dy);
                (w / 2 - cw / 2 + offset_x, h / 2 - ch / 2 + offset_y)
            }
            Self::CutBottom => (draw(rng, 0, w - cw), 0),
            Self::CutTop => (draw(rng, 0, w - cw), h - ch),
            Self::CutSide => {
                let y = draw(rng, 0, h - ch);
                let x = if rng.coin() { 0 } else { w - cw };
                (x, y)
            }
            Self::AwkwardButNotExtreme => {
                let mx = fraction(w, 0.05);
                let my = fraction(h, 0.05);
                let x = draw(rng, mx, w - cw - mx);
                let y = draw(rng, my, h - ch - my);
                (x, y)
            }
        };

        Rect::clamp_within(
            Proposal {
                x,
                y,
                width: cw,
                height: ch,
            },
            size,
        )
    }
}

impl core::fmt::Display for CropStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized strategy name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown crop strategy, expected one of: slightly_off_center, cut_bottom, cut_top, \
     cut_side, awkward_but_not_extreme"
)]
pub struct UnknownStrategy;

impl core::str::FromStr for CropStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s.trim())
            .ok_or(UnknownStrategy)
    }
}

/// Pixel extent for a ratio of `total`, truncated and kept in `1..=total`.
fn extent(total: i64, ratio: f64) -> i64 {
    num_traits::clamp(fraction(total, ratio), 1, total)
}

/// `total * ratio`, truncated toward zero.
fn fraction(total: i64, ratio: f64) -> i64 {
    Float::trunc(total as f64 * ratio) as i64
}

fn draw<R: CropRandom + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> i64 {
    let (lo, hi) = collapse_range(lo, hi);
    rng.int_inclusive(lo, hi)
}
