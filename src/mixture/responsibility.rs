use crate::dataset::SampleSet;
use crate::error::EmError;
use crate::mixture::config::{DegeneracyPolicy, EmConfig};
use crate::mixture::params::ParameterVector;
use crate::mixture::N_COMPONENTS;
use crate::{ArrayView1, Matrix, Vector};
use ndarray::Axis;

/// Soft assignment of every sample to every component, N×3.
///
/// Each row sums to one. Built fresh from a `ParameterVector` every round.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsibilityTable {
    table: Matrix,
}

impl ResponsibilityTable {
    /// E-step over the stored samples.
    pub fn compute(
        theta: &ParameterVector,
        samples: &SampleSet,
        config: &EmConfig,
        iteration: usize,
    ) -> Result<Self, EmError> {
        Self::for_points(theta, samples.values().view(), config, iteration)
    }

    pub(crate) fn for_points(
        theta: &ParameterVector,
        points: ArrayView1<f64>,
        config: &EmConfig,
        iteration: usize,
    ) -> Result<Self, EmError> {
        let variance = config.get_variance();
        let means = *theta.means();
        let mut table = Matrix::zeros((points.len(), N_COMPONENTS));

        for (i, &x) in points.iter().enumerate() {
            let kernels = means.map(|mean| gaussian_kernel(x, mean, variance));
            let denominator: f64 = kernels.iter().sum();

            if config.get_degeneracy() == DegeneracyPolicy::Fail
                && !(denominator > 0.0 && denominator.is_finite())
            {
                return Err(EmError::DegenerateResponsibility {
                    iteration,
                    sample: i,
                    value: denominator,
                });
            }

            for (k, kernel) in kernels.iter().enumerate() {
                table[[i, k]] = kernel / denominator;
            }
        }

        Ok(Self { table })
    }

    #[cfg(test)]
    pub(crate) fn from_matrix(table: Matrix) -> Self {
        Self { table }
    }

    pub fn n_samples(&self) -> usize {
        self.table.nrows()
    }

    pub fn matrix(&self) -> &Matrix {
        &self.table
    }

    pub fn get(&self, sample: usize, component: usize) -> f64 {
        self.table[[sample, component]]
    }

    pub fn row_sums(&self) -> Vector {
        self.table.sum_axis(Axis(1))
    }

    /// Total responsibility carried by each component.
    pub fn component_totals(&self) -> Vector {
        self.table.sum_axis(Axis(0))
    }

    /// Index of the most responsible component per sample; ties go to the lower index.
    pub fn hard_assignments(&self) -> Vec<usize> {
        self.table
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for k in 1..N_COMPONENTS {
                    if row[k] > row[best] {
                        best = k;
                    }
                }
                best
            })
            .collect()
    }
}

/// Unnormalized Gaussian density `exp(-(x - mean)² / 2σ²)`.
pub(crate) fn gaussian_kernel(x: f64, mean: f64, variance: f64) -> f64 {
    let diff = x - mean;
    (-(diff * diff) / (2.0 * variance)).exp()
}
