//! Per-work-item entry points of Glimmer's passes.
//!
//! Each module exposes a `main()` function that processes a single photon or
//! a single pixel; dispatching them over the whole frame is the engine's job.

pub mod final_shading;
pub mod photon_collection;
pub mod photon_tracing;
pub mod spatial_resampling;
pub mod temporal_resampling;
