use crate::{Light, Vec3Ext, WhiteNoise};

/// Lights active in the current frame, along with a distribution that picks
/// them proportionally to their power.
#[derive(Clone, Debug, Default)]
pub struct Lights {
    items: Vec<Light>,
    cdf: Vec<f32>,
}

impl Lights {
    pub fn new(items: Vec<Light>) -> Self {
        let mut total = 0.0;

        let mut cdf: Vec<_> = items
            .iter()
            .map(|light| {
                total += light.power().luma().max(0.0);
                total
            })
            .collect();

        if total > 0.0 {
            for value in &mut cdf {
                *value /= total;
            }
        } else {
            cdf.clear();
        }

        Self { items, cdf }
    }

    /// Picks a light, returning it together with the probability of picking
    /// it; returns `None` if there are no lights emitting anything.
    pub fn sample(&self, wnoise: &mut WhiteNoise) -> Option<(Light, f32)> {
        let last = self.cdf.len().checked_sub(1)?;
        let sample = wnoise.sample();
        let idx = self.cdf.partition_point(|&cdf| cdf <= sample).min(last);

        let prev = if idx == 0 { 0.0 } else { self.cdf[idx - 1] };
        let probability = self.cdf[idx] - prev;

        if probability > 0.0 {
            Some((self.items[idx], probability))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Light> for Lights {
    fn from_iter<T: IntoIterator<Item = Light>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
