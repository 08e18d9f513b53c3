use glimmer_gpu::prelude::*;

/// Emits a single photon and traces it through the scene, depositing it into
/// `global_photons` or `caustic_photons` wherever it lands on a surface that
/// gathers photons.
pub fn main<S>(
    global_id: u32,
    params: &PhotonTracingPassParams,
    scene: &S,
    lights: &Lights,
    global_photons: &PhotonBuffer,
    caustic_photons: &PhotonBuffer,
) where
    S: Scene + ?Sized,
{
    let mut wnoise = WhiteNoise::new(params.seed, uvec2(global_id, 0));

    let Some((light, light_probability)) = lights.sample(&mut wnoise) else {
        return;
    };

    let mut flux =
        light.power() / (light_probability * params.photon_count as f32);

    let mut ray = light.emit(&mut wnoise);
    let mut diffuse_bounces = 0;
    let mut is_specular_path = false;

    for _ in 0..params.max_bounces {
        let Some(hit) = scene.intersect(ray) else {
            break;
        };

        let is_front_face = hit.normal.dot(ray.direction()) < 0.0;

        let normal = if is_front_face {
            hit.normal
        } else {
            -hit.normal
        };

        match hit.material.kind {
            MaterialKind::Diffuse => {
                if hit.material.accepts_photons(params.roughness_threshold) {
                    let deposit = Deposit {
                        params,
                        position: hit.point,
                        direction: ray.direction(),
                        flux,
                    };

                    if is_specular_path && diffuse_bounces == 0 {
                        if params.has_caustics() {
                            deposit.store(
                                &mut wnoise,
                                caustic_photons,
                                PhotonStream::Caustic,
                                params.caustic_radius,
                            );
                        }
                    } else if diffuse_bounces < params.max_gather_bounces {
                        deposit.store_global(&mut wnoise, global_photons);
                    }
                }

                diffuse_bounces += 1;

                let survival_probability =
                    hit.material.albedo.max_element().min(1.0);

                if wnoise.sample() >= survival_probability {
                    break;
                }

                flux *= hit.material.albedo / survival_probability;

                ray = Ray::from_surface(
                    hit.point,
                    normal,
                    wnoise.sample_cosine_hemisphere(normal),
                );
            }

            MaterialKind::Mirror => {
                flux *= hit.material.albedo;
                is_specular_path = true;

                ray = Ray::from_surface(
                    hit.point,
                    normal,
                    ray.direction().reflect(normal),
                );
            }

            MaterialKind::Glass { ior } => {
                let eta = if is_front_face { 1.0 / ior } else { ior };
                let cos_i = -normal.dot(ray.direction());
                let reflectance = fresnel_dielectric(cos_i, ior);

                let direction = match ray.direction().refract(normal, eta) {
                    Some(dir) if wnoise.sample() >= reflectance => dir,
                    _ => ray.direction().reflect(normal),
                };

                flux *= hit.material.albedo;
                is_specular_path = true;
                ray = Ray::from_surface(hit.point, normal, direction);
            }
        }

        if flux.max_element() <= 0.0 {
            break;
        }
    }
}

struct Deposit<'a> {
    params: &'a PhotonTracingPassParams,
    position: Vec3,
    direction: Vec3,
    flux: Vec3,
}

impl Deposit<'_> {
    /// Stores a global photon, unless it gets rejected to make room for the
    /// caustic ones.
    fn store_global(mut self, wnoise: &mut WhiteNoise, buffer: &PhotonBuffer) {
        let rejection_probability = self.params.rejection_probability;

        if rejection_probability > 0.0 {
            if wnoise.sample() < rejection_probability {
                return;
            }

            self.flux /= 1.0 - rejection_probability;
        }

        let radius = self.params.photon_radius;

        self.store(wnoise, buffer, PhotonStream::Global, radius);
    }

    fn store(
        self,
        wnoise: &mut WhiteNoise,
        buffer: &PhotonBuffer,
        stream: PhotonStream,
        radius: f32,
    ) {
        let mut flux = self.flux;

        // Photons too dim to matter are culled russian-roulette style, which
        // keeps the photon map equivalent in expectation
        if self.params.has_culling() && self.params.min_contribution > 0.0 {
            let contribution = flux.luma() / (PI * radius * radius);

            if contribution < self.params.min_contribution {
                let survival_probability =
                    contribution / self.params.min_contribution;

                if wnoise.sample() >= survival_probability {
                    return;
                }

                flux /= survival_probability;
            }
        }

        buffer.push(Photon::new(self.position, self.direction, flux, stream));
    }
}
