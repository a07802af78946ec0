//! Uniform time grid shared by excitation synthesis and integration.

use crate::error::{EmError, EmResult};
use crate::numeric::{Real, ensure_finite};
use crate::units::{Frequency, Time, as_hertz, as_seconds};

/// Sampling rate used when the caller does not pick one (1 kHz).
pub const DEFAULT_SAMPLE_RATE_HZ: Real = 1000.0;

/// Largest grid that will be allocated (100 million samples).
pub const MAX_SAMPLES: usize = 100_000_000;

/// Ordered, evenly spaced time samples starting at zero.
///
/// The grid spans the closed interval `[0, duration]` with
/// `n = floor(duration * rate)` samples, so the spacing is
/// `duration / (n - 1)`, which is the nominal `1 / rate` up to the
/// endpoint correction. Always holds at least two samples.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    t: Vec<Real>,
    dt: Real,
}

impl TimeGrid {
    /// Number of samples produced for a duration at a sampling rate.
    ///
    /// Saturates at `usize::MAX` for absurdly long spans.
    pub fn sample_count(duration_s: Real, sample_rate_hz: Real) -> usize {
        let n = (duration_s * sample_rate_hz).floor();
        if n.is_finite() && n > 0.0 {
            n as usize
        } else {
            0
        }
    }

    /// Build a grid covering `duration` sampled at `sample_rate`.
    pub fn new(duration: Time, sample_rate: Frequency) -> EmResult<Self> {
        Self::from_seconds(as_seconds(duration), as_hertz(sample_rate))
    }

    /// Same as [`TimeGrid::new`] with plain SI values.
    pub fn from_seconds(duration_s: Real, sample_rate_hz: Real) -> EmResult<Self> {
        ensure_finite(duration_s, "duration")?;
        ensure_finite(sample_rate_hz, "sample rate")?;
        if duration_s <= 0.0 {
            return Err(EmError::InvalidArg {
                what: "duration must be positive",
            });
        }
        if sample_rate_hz <= 0.0 {
            return Err(EmError::InvalidArg {
                what: "sample rate must be positive",
            });
        }

        let n = Self::sample_count(duration_s, sample_rate_hz);
        if n < 2 {
            return Err(EmError::InsufficientSamples {
                samples: n,
                duration_s,
            });
        }
        if n > MAX_SAMPLES {
            return Err(EmError::TooManySamples {
                samples: n,
                max: MAX_SAMPLES,
            });
        }

        let step = duration_s / (n - 1) as Real;
        let mut t: Vec<Real> = (0..n).map(|x| x as Real * step).collect();
        // Endpoint is exact, as with an inclusive linear space.
        t[n - 1] = duration_s;

        let dt = t[1] - t[0];
        Ok(Self { t, dt })
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Uniform spacing `t[1] - t[0]` (seconds).
    pub fn dt(&self) -> Real {
        self.dt
    }

    /// Last sample time (seconds).
    pub fn duration_s(&self) -> Real {
        self.t[self.t.len() - 1]
    }

    pub fn times(&self) -> &[Real] {
        &self.t
    }

    pub fn into_inner(self) -> Vec<Real> {
        self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{hz, s};

    #[test]
    fn default_grid_has_twenty_thousand_samples() {
        let grid = TimeGrid::new(s(20.0), hz(DEFAULT_SAMPLE_RATE_HZ)).unwrap();
        assert_eq!(grid.len(), 20_000);
        assert_eq!(grid.times()[0], 0.0);
        assert_eq!(grid.duration_s(), 20.0);
        assert!((grid.dt() - 1e-3).abs() < 1e-6);
    }

    #[test]
    fn sample_count_truncates() {
        assert_eq!(TimeGrid::sample_count(1.0, 1000.0), 1000);
        assert_eq!(TimeGrid::sample_count(0.0025, 1000.0), 2);
        assert_eq!(TimeGrid::sample_count(0.0019, 1000.0), 1);
        assert_eq!(TimeGrid::sample_count(-1.0, 1000.0), 0);
    }

    #[test]
    fn spacing_is_uniform() {
        let grid = TimeGrid::from_seconds(1.0, 1000.0).unwrap();
        let dt = grid.dt();
        for w in grid.times().windows(2) {
            assert!(((w[1] - w[0]) - dt).abs() < 1e-12);
        }
    }

    #[test]
    fn too_short_duration_is_rejected() {
        let err = TimeGrid::from_seconds(0.001, 1000.0).unwrap_err();
        assert!(matches!(err, EmError::InsufficientSamples { samples: 1, .. }));
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        assert!(TimeGrid::from_seconds(0.0, 1000.0).is_err());
        assert!(TimeGrid::from_seconds(1.0, 0.0).is_err());
        assert!(matches!(
            TimeGrid::from_seconds(Real::NAN, 1000.0),
            Err(EmError::NonFinite { what: "duration", .. })
        ));
    }

    #[test]
    fn oversized_grid_is_refused_before_allocating() {
        assert_eq!(TimeGrid::sample_count(1e300, 1000.0), usize::MAX);
        let err = TimeGrid::from_seconds(1e300, 1000.0).unwrap_err();
        assert_eq!(
            err,
            EmError::TooManySamples {
                samples: usize::MAX,
                max: MAX_SAMPLES
            }
        );
        assert!(matches!(
            TimeGrid::from_seconds(1e6, 1000.0),
            Err(EmError::TooManySamples { samples: 1_000_000_000, .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn grid_spans_duration_with_expected_count(duration in 0.0025f64..50.0) {
            let grid = TimeGrid::from_seconds(duration, DEFAULT_SAMPLE_RATE_HZ).unwrap();
            prop_assert_eq!(grid.len(), TimeGrid::sample_count(duration, DEFAULT_SAMPLE_RATE_HZ));
            prop_assert_eq!(grid.times()[0], 0.0);
            prop_assert_eq!(grid.duration_s(), duration);
            prop_assert!(grid.times().windows(2).all(|w| w[1] > w[0]));
        }
    }
}
