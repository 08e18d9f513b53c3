//! Common structs, algorithms etc. used by Glimmer's kernels and engine.

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod brdf;
mod frame;
mod gbuffer;
mod light;
mod lights;
mod modes;
mod noise;
mod normal;
mod passes;
mod photon;
mod photon_buffer;
mod photon_map;
mod ray;
mod reprojection;
mod reservoir;
mod scene;
mod surface;
mod utils;
mod viewport;

pub use self::brdf::*;
pub use self::frame::*;
pub use self::gbuffer::*;
pub use self::light::*;
pub use self::lights::*;
pub use self::modes::*;
pub use self::noise::*;
pub use self::normal::*;
pub use self::passes::*;
pub use self::photon::*;
pub use self::photon_buffer::*;
pub use self::photon_map::*;
pub use self::ray::*;
pub use self::reprojection::*;
pub use self::reservoir::*;
pub use self::scene::*;
pub use self::surface::*;
pub use self::utils::*;
pub use self::viewport::*;

pub mod prelude {
    pub use core::f32::consts::PI;

    pub use glam::*;

    pub use crate::*;
}

/// Golden angle, used for spatial filters.
pub const GOLDEN_ANGLE: f32 = 2.39996;

/// Distance by which rays get pushed away from the surfaces they start at,
/// so that they don't immediately hit them again.
pub const GLIMMER_EPSILON: f32 = 0.0001;
