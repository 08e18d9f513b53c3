use glam::{uvec2, IVec2, UVec2};

/// Screen-space extent of the frame being rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    size: UVec2,
}

impl Viewport {
    pub const fn new(size: UVec2) -> Self {
        Self { size }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn len(&self) -> usize {
        (self.size.x as usize) * (self.size.y as usize)
    }

    pub fn screen_to_idx(&self, pos: UVec2) -> usize {
        (pos.y as usize) * (self.size.x as usize) + (pos.x as usize)
    }

    pub fn idx_to_screen(&self, idx: usize) -> UVec2 {
        let width = self.size.x.max(1) as usize;

        uvec2((idx % width) as u32, (idx / width) as u32)
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        let size = self.size.as_ivec2();

        pos.x >= 0 && pos.y >= 0 && pos.x < size.x && pos.y < size.y
    }

    /// Brings given position back into the screen by mirroring it along the
    /// edges it has crossed.
    pub fn contain(&self, mut pos: IVec2) -> UVec2 {
        let size = self.size.as_ivec2();

        if pos.x < 0 {
            pos.x = -pos.x;
        }

        if pos.y < 0 {
            pos.y = -pos.y;
        }

        if pos.x >= size.x {
            pos.x = 2 * size.x - pos.x - 1;
        }

        if pos.y >= size.y {
            pos.y = 2 * size.y - pos.y - 1;
        }

        pos.clamp(IVec2::ZERO, (size - 1).max(IVec2::ZERO)).as_uvec2()
    }
}
