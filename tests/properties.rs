//! Property-based tests for the EM estimator.
//!
//! Samples are drawn from a bounded range so that no Gaussian kernel can
//! underflow and every run stays clear of degenerate denominators.

use mixem::{EmConfig, GaussianMixtureEm, ParameterVector, ResponsibilityTable, SampleSet};
use proptest::prelude::*;

/// Tolerance for row sums and range checks.
const TOL: f64 = 1e-9;

fn sample_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10.0..10.0f64, 3..40)
}

fn bounded_em() -> GaussianMixtureEm {
    GaussianMixtureEm::with_config(EmConfig::new().max_iter(200))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every responsibility row sums to one, for every set of means the run visits.
    #[test]
    fn responsibilities_are_row_stochastic(values in sample_values()) {
        let samples = SampleSet::from_slice(&values).unwrap();
        let config = EmConfig::default();
        let result = bounded_em().fit(&samples).unwrap();

        for record in &result.trace {
            let table = ResponsibilityTable::compute(&record.means, &samples, &config, record.index).unwrap();
            for (i, sum) in table.row_sums().iter().enumerate() {
                prop_assert!((sum - 1.0).abs() < TOL, "row {} sums to {}", i, sum);
            }
            for &r in table.matrix().iter() {
                prop_assert!(r > 0.0 && r <= 1.0, "responsibility {} out of (0, 1]", r);
            }
        }
    }

    /// Weighted means of bounded data stay bounded.
    #[test]
    fn means_stay_within_sample_range(values in sample_values()) {
        let samples = SampleSet::from_slice(&values).unwrap();
        let (lo, hi) = (samples.min(), samples.max());
        let result = bounded_em().fit(&samples).unwrap();

        for record in &result.trace {
            for &mean in record.means.means() {
                prop_assert!(mean >= lo - TOL && mean <= hi + TOL,
                    "record {}: mean {} outside [{}, {}]", record.index, mean, lo, hi);
            }
        }
    }

    /// Same input, same trace.
    #[test]
    fn runs_are_deterministic(values in sample_values()) {
        let samples = SampleSet::from_slice(&values).unwrap();
        let em = bounded_em();

        let first = em.fit(&samples).unwrap();
        let second = em.fit(&samples).unwrap();
        prop_assert_eq!(first.trace, second.trace);
        prop_assert_eq!(first.termination, second.termination);
    }

    /// The starting guess ignores input order and picks min, lower median, max.
    #[test]
    fn initial_guess_is_order_statistics(values in sample_values()) {
        let samples = SampleSet::from_slice(&values).unwrap();
        let mut reversed = values.clone();
        reversed.reverse();
        let shuffled = SampleSet::from_slice(&reversed).unwrap();

        let theta = ParameterVector::initial(&samples);
        prop_assert_eq!(theta, ParameterVector::initial(&shuffled));

        let sorted = samples.sorted();
        let n = sorted.len();
        prop_assert_eq!(theta.means(), &[sorted[0], sorted[n / 2 - 1], sorted[n - 1]]);
        prop_assert!(theta.get(0) <= theta.get(1) && theta.get(1) <= theta.get(2));
    }

    /// The first record is always the initial guess with a zero objective,
    /// and indices count up from one without gaps.
    #[test]
    fn trace_is_indexed_from_one(values in sample_values()) {
        let samples = SampleSet::from_slice(&values).unwrap();
        let result = bounded_em().fit(&samples).unwrap();

        prop_assert_eq!(result.trace[0].means, ParameterVector::initial(&samples));
        prop_assert_eq!(result.trace[0].objective, 0.0);
        for (position, record) in result.trace.iter().enumerate() {
            prop_assert_eq!(record.index, position + 1);
        }
        prop_assert!(result.n_rounds() >= 1 && result.n_rounds() <= 200);
    }
}
