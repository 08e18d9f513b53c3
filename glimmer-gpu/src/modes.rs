/// Which steps of the final-gather reservoir resampling get executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResamplingMode {
    Temporal,
    Spatial,
    #[default]
    SpatioTemporal,
}

impl ResamplingMode {
    pub fn has_temporal(self) -> bool {
        matches!(self, Self::Temporal | Self::SpatioTemporal)
    }

    pub fn has_spatial(self) -> bool {
        matches!(self, Self::Spatial | Self::SpatioTemporal)
    }
}

/// How far caustic photons travel through the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CausticMode {
    /// Caustic photons are neither stored nor gathered.
    None,

    /// Caustic reservoirs are shaded straight after collection.
    Direct,

    /// Caustic reservoirs get temporal reuse only.
    #[default]
    Temporal,

    /// Caustic reservoirs get temporal and (tightly bounded) spatial reuse.
    Reservoir,
}

impl CausticMode {
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }

    pub fn has_temporal(self) -> bool {
        matches!(self, Self::Temporal | Self::Reservoir)
    }

    pub fn has_spatial(self) -> bool {
        self == Self::Reservoir
    }
}

/// Policy used to keep the bias of merged reservoirs in check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BiasCorrection {
    /// Merge weights use only the receiving pixel's target function.
    None,

    /// Normalizes by the number of reservoirs that could have produced the
    /// selected sample.
    Basic,

    /// Like [`Self::Basic`], but spatial candidates occluded from the
    /// receiving surface get zero weight.
    Raytraced,

    /// Defensive pairwise MIS between the central pixel and each neighbour.
    #[default]
    Pairwise,
}

impl BiasCorrection {
    pub fn encode(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Basic => 1,
            Self::Raytraced => 2,
            Self::Pairwise => 3,
        }
    }

    pub fn decode(value: u32) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Basic,
            2 => Self::Raytraced,
            _ => Self::Pairwise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_correction_encoding() {
        for mode in [
            BiasCorrection::None,
            BiasCorrection::Basic,
            BiasCorrection::Raytraced,
            BiasCorrection::Pairwise,
        ] {
            assert_eq!(mode, BiasCorrection::decode(mode.encode()));
        }
    }

    #[test]
    fn steps() {
        assert!(ResamplingMode::Temporal.has_temporal());
        assert!(!ResamplingMode::Temporal.has_spatial());
        assert!(!ResamplingMode::Spatial.has_temporal());
        assert!(ResamplingMode::SpatioTemporal.has_spatial());

        assert!(!CausticMode::None.is_enabled());
        assert!(!CausticMode::Direct.has_temporal());
        assert!(CausticMode::Temporal.has_temporal());
        assert!(!CausticMode::Temporal.has_spatial());
        assert!(CausticMode::Reservoir.has_spatial());
    }
}
