use glam::{UVec2, Vec2};

use crate::Viewport;

/// Location of a pixel in the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reprojection {
    prev_pos: Option<UVec2>,
}

impl Reprojection {
    /// Reprojects given pixel using its motion vector, which is expressed in
    /// pixels and points from the current position to the previous one.
    pub fn new(viewport: Viewport, screen_pos: UVec2, motion: Vec2) -> Self {
        let prev_pos = (screen_pos.as_vec2() + 0.5 + motion).floor();

        let prev_pos = (prev_pos.is_finite()
            && viewport.contains(prev_pos.as_ivec2()))
        .then(|| prev_pos.as_uvec2());

        Self { prev_pos }
    }

    pub fn is_some(&self) -> bool {
        self.prev_pos.is_some()
    }

    pub fn prev_pos(&self) -> Option<UVec2> {
        self.prev_pos
    }
}

#[cfg(test)]
mod tests {
    use glam::{uvec2, vec2};

    use super::*;

    #[test]
    fn reprojection() {
        let viewport = Viewport::new(uvec2(8, 8));

        let target = Reprojection::new(viewport, uvec2(3, 4), Vec2::ZERO);

        assert_eq!(Some(uvec2(3, 4)), target.prev_pos());

        let target = Reprojection::new(viewport, uvec2(3, 4), vec2(1.6, -2.2));

        assert_eq!(Some(uvec2(5, 2)), target.prev_pos());

        let target = Reprojection::new(viewport, uvec2(0, 4), vec2(-1.0, 0.0));

        assert!(!target.is_some());

        let target = Reprojection::new(viewport, uvec2(0, 4), vec2(f32::NAN, 0.0));

        assert!(!target.is_some());
    }
}
