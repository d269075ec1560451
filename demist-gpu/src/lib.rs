//! Common structs and algorithms shared by demist's shaders and renderer.

#![cfg_attr(target_arch = "spirv", no_std)]
#![allow(clippy::manual_range_contains)]

mod camera;
mod moments;
mod normal;
mod passes;
mod reprojection;
mod surface;
mod tiles;
mod upsample;
mod utils;
mod wavelet;

pub use self::camera::*;
pub use self::moments::*;
pub use self::normal::*;
pub use self::passes::*;
pub use self::reprojection::*;
pub use self::surface::*;
pub use self::tiles::*;
pub use self::upsample::*;
pub use self::utils::*;
pub use self::wavelet::*;

pub mod prelude {
    pub use spirv_std::glam::*;
    #[cfg(target_arch = "spirv")]
    pub use spirv_std::num_traits::Float;
    pub use spirv_std::{spirv, Image, Sampler};

    pub use crate::*;
}

pub const DEMIST_EPSILON: f32 = 1.0e-6;

/// How many accumulated frames a pixel's history can claim at most; bounds
/// the effective blending factor and hence the temporal lag.
pub const MAX_HISTORY_LEN: f32 = 32.0;
