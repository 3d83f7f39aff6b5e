use crate::dataset::SampleSet;
use crate::error::EmError;
use crate::mixture::config::{DegeneracyPolicy, EmConfig};
use crate::mixture::params::ParameterVector;
use crate::mixture::responsibility::ResponsibilityTable;
use crate::mixture::N_COMPONENTS;

/// M-step: each new mean is the responsibility-weighted mean of the data,
/// `θ'ₖ = Σᵢ R[i][k]·xᵢ / Σᵢ R[i][k]`.
pub fn update_means(
    responsibilities: &ResponsibilityTable,
    samples: &SampleSet,
    config: &EmConfig,
    iteration: usize,
) -> Result<ParameterVector, EmError> {
    let table = responsibilities.matrix();
    let weighted_sums = table.t().dot(samples.values());
    let totals = responsibilities.component_totals();

    let mut means = [0.0; N_COMPONENTS];
    for k in 0..N_COMPONENTS {
        let total = totals[k];
        if config.get_degeneracy() == DegeneracyPolicy::Fail && !(total > 0.0 && total.is_finite()) {
            return Err(EmError::CollapsedComponent {
                iteration,
                component: k,
                total,
            });
        }
        means[k] = weighted_sums[k] / total;
    }

    Ok(ParameterVector::new(means))
}
