use crate::error::EmError;

/// How the per-round parameter change is reduced to a single number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConvergenceCriterion {
    /// `max(θ'ₖ - θₖ)`: a round where every mean decreases counts as converged.
    #[default]
    Signed,
    /// `max(|θ'ₖ - θₖ|)`.
    Absolute,
}

/// What to do when a zero denominator shows up in the E-step or M-step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneracyPolicy {
    /// Stop with `EmError::DegenerateResponsibility` or `EmError::CollapsedComponent`.
    #[default]
    Fail,
    /// Let NaN flow into the means and the objective.
    Propagate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmConfig {
    mixing_weight: f64,
    variance: f64,
    epsilon: f64,
    max_iter: Option<usize>,
    criterion: ConvergenceCriterion,
    degeneracy: DegeneracyPolicy,
}

impl EmConfig {
    pub fn new() -> Self {
        Self {
            mixing_weight: 1.0 / 3.0,
            variance: 1.0,
            epsilon: 1e-3,
            max_iter: Some(10_000),
            criterion: ConvergenceCriterion::Signed,
            degeneracy: DegeneracyPolicy::Fail,
        }
    }

    pub fn mixing_weight(mut self, mixing_weight: f64) -> Self {
        self.mixing_weight = mixing_weight;
        self
    }

    pub fn variance(mut self, variance: f64) -> Self {
        self.variance = variance;
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Removes the round cap; the loop then ends only on convergence.
    pub fn unbounded(mut self) -> Self {
        self.max_iter = None;
        self
    }

    pub fn criterion(mut self, criterion: ConvergenceCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn degeneracy(mut self, degeneracy: DegeneracyPolicy) -> Self {
        self.degeneracy = degeneracy;
        self
    }

    pub fn get_mixing_weight(&self) -> f64 {
        self.mixing_weight
    }

    pub fn get_variance(&self) -> f64 {
        self.variance
    }

    pub fn get_epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn get_max_iter(&self) -> Option<usize> {
        self.max_iter
    }

    pub fn get_criterion(&self) -> ConvergenceCriterion {
        self.criterion
    }

    pub fn get_degeneracy(&self) -> DegeneracyPolicy {
        self.degeneracy
    }

    pub fn validate(&self) -> Result<(), EmError> {
        if !(self.mixing_weight > 0.0 && self.mixing_weight <= 1.0) {
            return Err(EmError::InvalidConfig {
                field: "mixing_weight",
                reason: format!("must be in (0, 1], got {}", self.mixing_weight),
            });
        }

        if !self.variance.is_finite() || self.variance <= 0.0 {
            return Err(EmError::InvalidConfig {
                field: "variance",
                reason: format!("must be finite and > 0, got {}", self.variance),
            });
        }

        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(EmError::InvalidConfig {
                field: "epsilon",
                reason: format!("must be finite and > 0, got {}", self.epsilon),
            });
        }

        if self.max_iter == Some(0) {
            return Err(EmError::InvalidConfig {
                field: "max_iter",
                reason: "must allow at least one round".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for EmConfig {
    fn default() -> Self {
        Self::new()
    }
}
