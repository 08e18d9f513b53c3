use bytemuck::{Pod, Zeroable};

/// Number of the frame being rendered.
///
/// Frame's parity selects which generation of double-buffered resources
/// (reservoirs, surfaces) is the current one.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Pod, Zeroable,
)]
pub struct Frame(u32);

impl Frame {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns whether this frame writes into the alternate (`b`) generation
    /// of double-buffered resources.
    pub fn is_alternate(self) -> bool {
        self.0 % 2 == 1
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
