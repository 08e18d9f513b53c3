use core::f32::consts::PI;

use glam::Vec3;

use crate::{F32Ext, Surface};

/// Burley's diffuse lobe.
#[derive(Clone, Copy)]
pub struct DiffuseBrdf<'a> {
    surface: &'a Surface,
}

impl<'a> DiffuseBrdf<'a> {
    pub fn new(surface: &'a Surface) -> Self {
        Self { surface }
    }

    /// Evaluates the lobe for light arriving from direction `l`.
    pub fn eval(self, l: Vec3) -> Vec3 {
        let n = self.surface.normal;
        let v = self.surface.view_dir;
        let h = (l + v).normalize_or_zero();
        let n_o_v = n.dot(v).max(0.0001);
        let n_o_l = n.dot(l).saturate();
        let l_o_h = l.dot(h).saturate();

        self.surface.albedo
            * fd_burley(self.surface.roughness, n_o_v, n_o_l, l_o_h)
    }
}

/// Returns the fraction of light reflected by a dielectric with given index
/// of refraction, using Schlick's approximation.
pub fn fresnel_dielectric(cos_i: f32, ior: f32) -> f32 {
    let f0 = ((1.0 - ior) / (1.0 + ior)).sqr();

    f_schlick(f0, 1.0, cos_i.saturate())
}

fn fd_burley(roughness: f32, n_o_v: f32, n_o_l: f32, l_o_h: f32) -> f32 {
    let f90 = 0.5 + 2.0 * roughness * l_o_h * l_o_h;
    let light_scatter = f_schlick(1.0, f90, n_o_l);
    let view_scatter = f_schlick(1.0, f90, n_o_v);

    light_scatter * view_scatter * (1.0 / PI)
}

fn f_schlick(f0: f32, f90: f32, v_o_h: f32) -> f32 {
    f0 + (f90 - f0) * (1.0 - v_o_h).max(0.0).powf(5.0)
}
