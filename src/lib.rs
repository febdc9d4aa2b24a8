//! Randomized "bad crop" generation for composition classifier datasets.
//!
//! The core picks one of five heuristics and computes a crop rectangle that
//! keeps most of the image but frames it poorly. Pure geometry, no pixel
//! operations, `no_std` compatible.
//!
//! # Modules
//!
//! - [`region`] — Image sizes, crop rectangles, and the shared bounds clamp
//! - [`strategy`] — The five crop heuristics
//! - [`generate`] — Uniform strategy selection and region generation
//! - [`random`] — The randomness seam, implemented for every `rand::Rng`
//! - `dataset` (feature `dataset`) — Local image copying and placeholder download
//! - `pipeline` (feature `pipeline`) — Decode, crop, and save a directory of images

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod error;
pub mod generate;
pub mod random;
pub mod region;
pub mod strategy;

#[cfg(feature = "dataset")]
pub mod dataset;
#[cfg(feature = "pipeline")]
pub mod pipeline;

pub use error::CropError;
#[cfg(feature = "dataset")]
pub use error::PipelineError;
pub use generate::{BadCrop, bad_crop_for, generate_bad_crop_region};
pub use random::CropRandom;
pub use region::{Proposal, Rect, Size};
pub use strategy::{CropStrategy, UnknownStrategy};
