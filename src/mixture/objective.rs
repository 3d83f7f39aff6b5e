use crate::dataset::SampleSet;
use crate::mixture::config::EmConfig;
use crate::mixture::params::ParameterVector;
use crate::mixture::responsibility::ResponsibilityTable;
use crate::mixture::N_COMPONENTS;
use std::f64::consts::PI;

/// Expected complete-data log-likelihood (the EM Q-function) reported per round:
///
/// `Q = N·ln(T) - ⌊N/2⌋·ln(2πσ²) - Σₖ Σᵢ (xᵢ - θ'ₖ)²·R[i][k] / 2σ²`
///
/// The constant term uses the integer half of N, matching the established
/// report format. This is not the marginal log-likelihood; see
/// [`marginal_log_likelihood`] for that.
pub fn expected_log_likelihood(
    responsibilities: &ResponsibilityTable,
    next: &ParameterVector,
    samples: &SampleSet,
    config: &EmConfig,
) -> f64 {
    let n = samples.len();
    let variance = config.get_variance();
    let table = responsibilities.matrix();

    let mut objective = n as f64 * config.get_mixing_weight().ln()
        - (n / 2) as f64 * (2.0 * PI * variance).ln();

    for k in 0..N_COMPONENTS {
        let mean = next.get(k);
        let spread: f64 = samples
            .values()
            .iter()
            .zip(table.column(k).iter())
            .map(|(&x, &r)| (x - mean).powi(2) * r / (2.0 * variance))
            .sum();
        objective -= spread;
    }

    objective
}

/// `Σᵢ ln Σₖ T·N(xᵢ; θₖ, σ²)`, evaluated with log-sum-exp.
pub fn marginal_log_likelihood(theta: &ParameterVector, samples: &SampleSet, config: &EmConfig) -> f64 {
    let variance = config.get_variance();
    let log_norm = config.get_mixing_weight().ln() - 0.5 * (2.0 * PI * variance).ln();

    samples
        .values()
        .iter()
        .map(|&x| {
            let terms = theta
                .means()
                .map(|mean| log_norm - (x - mean).powi(2) / (2.0 * variance));
            log_sum_exp(&terms)
        })
        .sum()
}

fn log_sum_exp(values: &[f64]) -> f64 {
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}
