use std::fmt;

use bytemuck::Pod;
use glam::UVec2;
use glimmer_gpu::Viewport;
use rayon::prelude::*;

/// Screen-sized, row-major grid of per-pixel values.
#[derive(Clone)]
pub struct Image<T> {
    size: UVec2,
    data: Vec<T>,
}

impl<T> Image<T>
where
    T: Clone + Default,
{
    pub fn new(size: UVec2) -> Self {
        let len = Viewport::new(size).len();

        Self {
            size,
            data: vec![T::default(); len],
        }
    }

    /// Resets all pixels to their default value.
    pub fn clear(&mut self)
    where
        T: Send + Sync,
    {
        self.data.par_iter_mut().for_each(|pixel| *pixel = T::default());
    }
}

impl<T> Image<T> {
    pub fn from_fn(size: UVec2, mut f: impl FnMut(UVec2) -> T) -> Self {
        let viewport = Viewport::new(size);

        Self {
            size,
            data: (0..viewport.len())
                .map(|idx| f(viewport.idx_to_screen(idx)))
                .collect(),
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.size)
    }

    pub fn get(&self, pos: UVec2) -> &T {
        &self.data[self.viewport().screen_to_idx(pos)]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }
}

impl<T> Image<T>
where
    T: Pod,
{
    /// Returns raw pixels, e.g. for uploading them into a texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl<T> fmt::Debug for Image<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use glam::{uvec2, vec3, Vec3};

    use super::*;

    #[test]
    fn smoke() {
        let mut target = Image::<Vec3>::new(uvec2(3, 2));

        assert_eq!(6, target.as_slice().len());
        assert_eq!(6 * 12, target.as_bytes().len());

        target.as_mut_slice()[4] = vec3(1.0, 2.0, 3.0);

        assert_eq!(vec3(1.0, 2.0, 3.0), *target.get(uvec2(1, 1)));

        target.clear();

        assert!(target.iter().all(|&pixel| pixel == Vec3::ZERO));
    }

    #[test]
    fn from_fn() {
        let target = Image::from_fn(uvec2(3, 2), |pos| pos.x + 10 * pos.y);

        assert_eq!(&[0, 1, 2, 10, 11, 12], target.as_slice());
    }
}
