use crate::{
    BiasCorrection, Reservoir, ReservoirSample, ResamplerParams, Surface,
    WhiteNoise,
};

/// Firefly and noise-floor clamps applied to everything streamed into a
/// reservoir.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamps {
    pub max_luminance: f32,
    pub min_contribution: f32,
}

impl Clamps {
    /// Clamps the weight of a candidate that stands for `m` candidates.
    pub fn apply(self, weight: f32, m: f32) -> f32 {
        let m = m.max(1.0);

        if weight < self.min_contribution * m {
            0.0
        } else {
            weight.min(self.max_luminance * m)
        }
    }

    /// Scales candidate down, so that its luminance at given surface doesn't
    /// exceed `max_luminance`; returns the candidate together with its target
    /// function, zeroed if it falls below `min_contribution`.
    pub fn candidate<T>(self, sample: T, surface: &Surface) -> (T, f32)
    where
        T: ReservoirSample,
    {
        let luma = sample.target(surface);

        let sample = if luma > self.max_luminance {
            sample.scaled(self.max_luminance / luma)
        } else {
            sample
        };

        let p_hat = sample.target(surface);

        if p_hat < self.min_contribution {
            (sample, 0.0)
        } else {
            (sample, p_hat)
        }
    }
}

/// Reservoir borrowed from another pixel (or from the previous frame).
#[derive(Clone, Copy, Debug)]
pub struct Neighbour<T> {
    pub reservoir: Reservoir<T>,

    /// Surface of the pixel owning `reservoir`
    pub surface: Surface,

    /// Whether the neighbour's sample is visible from the receiving surface;
    /// consulted only by [`BiasCorrection::Raytraced`]
    pub visible: bool,
}

/// Merges neighbouring reservoirs into a canonical one, using given bias
/// correction.
#[derive(Clone, Copy, Debug)]
pub struct Resampler {
    pub mode: BiasCorrection,

    /// Share of the canonical sample in pairwise MIS
    pub central_weight: f32,

    pub clamps: Clamps,
}

impl Resampler {
    pub fn new(params: ResamplerParams) -> Self {
        Self {
            mode: params.bias_correction(),
            central_weight: params.central_weight.clamp(0.0, 1.0),
            clamps: Clamps {
                max_luminance: params.max_luminance,
                min_contribution: params.min_contribution,
            },
        }
    }

    pub fn resample<T>(
        &self,
        wnoise: &mut WhiteNoise,
        canonical: &Reservoir<T>,
        surface: &Surface,
        neighbours: &[Neighbour<T>],
    ) -> Reservoir<T>
    where
        T: ReservoirSample,
    {
        if self.mode == BiasCorrection::Pairwise {
            self.resample_pairwise(wnoise, canonical, surface, neighbours)
        } else {
            self.resample_streaming(wnoise, canonical, surface, neighbours)
        }
    }

    /// Streams neighbours into the canonical reservoir one by one, then
    /// (unless bias correction is disabled) renormalizes the result by the
    /// number of candidates that could have produced the selected sample.
    fn resample_streaming<T>(
        &self,
        wnoise: &mut WhiteNoise,
        canonical: &Reservoir<T>,
        surface: &Surface,
        neighbours: &[Neighbour<T>],
    ) -> Reservoir<T>
    where
        T: ReservoirSample,
    {
        let raytraced = self.mode == BiasCorrection::Raytraced;
        let mut out = *canonical;

        for nb in neighbours {
            if nb.reservoir.is_empty() {
                continue;
            }

            let p_here = if raytraced && !nb.visible {
                0.0
            } else {
                nb.reservoir.sample.target(surface)
            };

            let weight = if nb.reservoir.p_hat > 0.0 {
                nb.reservoir.w_sum * p_here / nb.reservoir.p_hat
            } else {
                0.0
            };

            let weight = self.clamps.apply(weight, nb.reservoir.m);

            out.merge(wnoise, &nb.reservoir, p_here, weight);
        }

        if self.mode == BiasCorrection::None {
            return out;
        }

        let mut z = if out.p_hat > 0.0 && !canonical.is_empty() {
            canonical.m
        } else {
            0.0
        };

        for nb in neighbours {
            if nb.reservoir.is_empty() || (raytraced && !nb.visible) {
                continue;
            }

            if out.sample.target(&nb.surface) > 0.0 {
                z += nb.reservoir.m;
            }
        }

        if z > 0.0 {
            out.w_sum *= out.m / z;
        } else {
            out.w_sum = 0.0;
        }

        out
    }

    /// Defensive pairwise MIS: each neighbour is weighed only against the
    /// canonical sample, which keeps the cost linear in the number of
    /// neighbours.
    fn resample_pairwise<T>(
        &self,
        wnoise: &mut WhiteNoise,
        canonical: &Reservoir<T>,
        surface: &Surface,
        neighbours: &[Neighbour<T>],
    ) -> Reservoir<T>
    where
        T: ReservoirSample,
    {
        fn balance(a: f32, b: f32) -> f32 {
            let sum = a + b;

            if sum > 0.0 {
                a / sum
            } else {
                0.0
            }
        }

        let k = neighbours
            .iter()
            .filter(|nb| !nb.reservoir.is_empty())
            .count();

        if k == 0 {
            return *canonical;
        }

        // An empty canonical reservoir has nothing to be weighed against,
        // so the neighbours take the entire share
        let alpha = if canonical.is_empty() {
            0.0
        } else {
            self.central_weight
        };

        let share = (1.0 - alpha) / (k as f32);
        let c = canonical;
        let c_w = c.contribution_weight();

        let mut out = Reservoir {
            sample: c.sample,
            w_sum: 0.0,
            p_hat: c.p_hat,
            m: c.m,
            age: c.age,
        };

        let mut m_c = alpha;

        for nb in neighbours {
            if nb.reservoir.is_empty() {
                continue;
            }

            let p_there = c.sample.target(&nb.surface);

            m_c += share
                * (1.0 - balance(nb.reservoir.m * p_there, c.m * c.p_hat));
        }

        let c_weight = self.clamps.apply(m_c * c.p_hat * c_w, 1.0);

        out.select(wnoise, c.sample, c.p_hat, c_weight);

        for nb in neighbours {
            if nb.reservoir.is_empty() {
                continue;
            }

            let p_here = nb.reservoir.sample.target(surface);

            let m_i = share
                * balance(nb.reservoir.m * nb.reservoir.p_hat, c.m * p_here);

            let weight = self.clamps.apply(
                m_i * p_here * nb.reservoir.contribution_weight(),
                1.0,
            );

            out.select(wnoise, nb.reservoir.sample, p_here, weight);
            out.m += nb.reservoir.m;
        }

        // `w_sum` holds the sum of MIS-weighted candidates, for which the
        // contribution weight is `w_sum / p_hat`; rescale it to the `M`-based
        // convention used by the rest of the pipeline
        out.w_sum *= out.m.max(1.0);

        if out.p_hat <= 0.0 {
            out.w_sum = 0.0;
        }

        out
    }
}
