//! Glimmer: indirect lighting through photon mapping, with final gather
//! driven by spatio-temporal reservoir resampling.
//!
//! The surrounding renderer provides a [`Scene`], a list of [`Lights`] and a
//! GBuffer of the current frame; [`Engine`] turns them into two radiance
//! images (diffuse indirect and caustics), ready to be denoised and
//! composited.

mod buffers;
mod config;
mod engine;
mod frame_context;
mod passes;
mod photon_index;
mod utils;

pub use glimmer_gpu as gpu;
pub use glimmer_gpu::{
    BiasCorrection, CausticMode, Frame, GBufferEntry, Light, Lights,
    Material, MaterialKind, Photon, PhotonIndex, PhotonStream, Primitive,
    Primitives, Ray, ResamplingMode, Scene, SceneHit,
};

pub(crate) use self::buffers::*;
pub use self::buffers::Image;
pub use self::config::*;
pub use self::engine::*;
pub(crate) use self::frame_context::*;
pub(crate) use self::passes::*;
pub use self::photon_index::*;
pub(crate) use self::utils::*;
