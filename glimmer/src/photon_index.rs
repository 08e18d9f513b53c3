//! CPU implementations of [`PhotonIndex`](glimmer_gpu::PhotonIndex).

mod bvh;
mod grid;

pub use self::bvh::*;
pub use self::grid::*;
