use crate::FrameContext;

/// Two generations of the same buffer, used interchangeably as the current
/// and the previous one depending on the frame's parity.
#[derive(Debug)]
pub struct DoubleBuffered<T> {
    a: T,
    b: T,
}

impl<T> DoubleBuffered<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn from_fn(mut f: impl FnMut() -> T) -> Self {
        Self { a: f(), b: f() }
    }

    pub fn get(&self, alternate: bool) -> &T {
        if alternate {
            &self.b
        } else {
            &self.a
        }
    }

    pub fn get_mut(&mut self, alternate: bool) -> &mut T {
        if alternate {
            &mut self.b
        } else {
            &mut self.a
        }
    }

    pub fn curr(&self, ctx: &FrameContext) -> &T {
        self.get(ctx.frame.is_alternate())
    }

    pub fn prev(&self, ctx: &FrameContext) -> &T {
        self.get(!ctx.frame.is_alternate())
    }

    pub fn curr_mut(&mut self, ctx: &FrameContext) -> &mut T {
        self.get_mut(ctx.frame.is_alternate())
    }

    /// Returns the current generation for writing, together with the
    /// previous one for reading.
    pub fn split_mut(&mut self, ctx: &FrameContext) -> (&mut T, &T) {
        if ctx.frame.is_alternate() {
            (&mut self.b, &self.a)
        } else {
            (&mut self.a, &self.b)
        }
    }
}

#[cfg(test)]
mod tests {
    use glimmer_gpu::Frame;

    use super::*;

    fn ctx(frame: u32) -> FrameContext {
        FrameContext {
            frame: Frame::new(frame),
            seed: 0,
            has_history: true,
        }
    }

    #[test]
    fn parity() {
        let mut target = DoubleBuffered::new(1, 2);

        assert_eq!(1, *target.curr(&ctx(0)));
        assert_eq!(2, *target.prev(&ctx(0)));
        assert_eq!(2, *target.curr(&ctx(1)));
        assert_eq!(1, *target.prev(&ctx(1)));

        // Whatever gets written in one frame becomes the previous generation
        // in the next one
        *target.curr_mut(&ctx(4)) = 10;

        assert_eq!(10, *target.prev(&ctx(5)));

        let (curr, prev) = target.split_mut(&ctx(5));

        assert_eq!(2, *curr);
        assert_eq!(10, *prev);
    }
}
