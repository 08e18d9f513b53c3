use glimmer_gpu::Frame;

/// State shared by all passes of a single frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    pub frame: Frame,

    /// Random seed of this frame
    pub seed: u32,

    /// Whether the previous generation of buffers holds valid data; when
    /// it doesn't (e.g. right after startup), the resampling is skipped
    pub has_history: bool,
}

impl FrameContext {
    /// Derives a seed for a particular pass, so that passes don't end up
    /// sharing their noise.
    pub fn seed_for(&self, salt: &str) -> u32 {
        fxhash::hash32(&(self.seed, self.frame.get(), salt))
    }
}
