use crate::dataset::SampleSet;
use crate::mixture::config::ConvergenceCriterion;
use crate::mixture::N_COMPONENTS;
use std::fmt;

/// The three component means θ₁, θ₂, θ₃.
///
/// Replaced wholesale every round; there are no setters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterVector {
    means: [f64; N_COMPONENTS],
}

impl ParameterVector {
    pub fn new(means: [f64; N_COMPONENTS]) -> Self {
        Self { means }
    }

    /// Deterministic starting guess: the minimum, the element at
    /// `⌊N/2⌋ - 1` and the maximum of the ascending sample order.
    pub fn initial(samples: &SampleSet) -> Self {
        let sorted = samples.sorted();
        let n = sorted.len();

        Self {
            means: [sorted[0], sorted[n / 2 - 1], sorted[n - 1]],
        }
    }

    pub fn means(&self) -> &[f64; N_COMPONENTS] {
        &self.means
    }

    pub fn get(&self, component: usize) -> f64 {
        self.means[component]
    }

    /// `max(next - self)` over components. NaN in any component yields NaN.
    pub fn max_signed_delta(&self, next: &ParameterVector) -> f64 {
        self.fold_deltas(next, |d| d)
    }

    pub fn max_abs_delta(&self, next: &ParameterVector) -> f64 {
        self.fold_deltas(next, f64::abs)
    }

    pub fn delta(&self, next: &ParameterVector, criterion: ConvergenceCriterion) -> f64 {
        match criterion {
            ConvergenceCriterion::Signed => self.max_signed_delta(next),
            ConvergenceCriterion::Absolute => self.max_abs_delta(next),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.means.iter().all(|m| m.is_finite())
    }

    fn fold_deltas(&self, next: &ParameterVector, map: impl Fn(f64) -> f64) -> f64 {
        // f64::max drops NaN; a NaN mean must poison the delta instead.
        self.means
            .iter()
            .zip(next.means.iter())
            .map(|(current, updated)| map(updated - current))
            .fold(f64::NEG_INFINITY, |acc, d| {
                if acc.is_nan() || d.is_nan() {
                    f64::NAN
                } else {
                    acc.max(d)
                }
            })
    }
}

impl From<[f64; N_COMPONENTS]> for ParameterVector {
    fn from(means: [f64; N_COMPONENTS]) -> Self {
        Self::new(means)
    }
}

impl fmt::Display for ParameterVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.5}, {:.5}, {:.5}]",
            self.means[0], self.means[1], self.means[2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_picks_order_statistics() {
        let samples = SampleSet::from_slice(&[20.0, 1.0, 11.0, 3.0, 22.0, 2.0, 10.0, 12.0, 21.0]).unwrap();
        let theta = ParameterVector::initial(&samples);
        // N = 9, index 9 / 2 - 1 = 3 of [1, 2, 3, 10, ...]
        assert_eq!(theta.means(), &[1.0, 10.0, 22.0]);
    }

    #[test]
    fn test_initial_with_three_samples() {
        let samples = SampleSet::from_slice(&[4.0, -2.0, 9.0]).unwrap();
        let theta = ParameterVector::initial(&samples);
        assert_eq!(theta.means(), &[-2.0, -2.0, 9.0]);
    }

    #[test]
    fn test_initial_with_duplicates() {
        let samples = SampleSet::from_slice(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        let theta = ParameterVector::initial(&samples);
        assert_eq!(theta.means(), &[5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_signed_delta_ignores_decreases() {
        let current = ParameterVector::new([1.0, 10.0, 22.0]);
        let next = ParameterVector::new([0.5, 9.0, 21.0]);
        assert_eq!(current.max_signed_delta(&next), -0.5);
        assert_eq!(current.max_abs_delta(&next), 1.0);
    }

    #[test]
    fn test_delta_dispatch() {
        let current = ParameterVector::new([0.0, 0.0, 0.0]);
        let next = ParameterVector::new([0.25, -2.0, 0.0]);
        assert_eq!(current.delta(&next, ConvergenceCriterion::Signed), 0.25);
        assert_eq!(current.delta(&next, ConvergenceCriterion::Absolute), 2.0);
    }

    #[test]
    fn test_delta_propagates_nan() {
        let current = ParameterVector::new([0.0, 1.0, 2.0]);
        let next = ParameterVector::new([0.0, f64::NAN, 2.0]);
        assert!(current.max_signed_delta(&next).is_nan());
        assert!(current.max_abs_delta(&next).is_nan());
        assert!(!next.is_finite());
    }

    #[test]
    fn test_display() {
        let theta: ParameterVector = [1.0, 2.5, -3.123456].into();
        assert_eq!(theta.to_string(), "[1.00000, 2.50000, -3.12346]");
    }
}
