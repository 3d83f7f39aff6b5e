use crate::dataset::SampleSet;
use crate::error::EmError;
use crate::mixture::config::EmConfig;
use crate::mixture::objective::{expected_log_likelihood, marginal_log_likelihood};
use crate::mixture::params::ParameterVector;
use crate::mixture::responsibility::ResponsibilityTable;
use crate::mixture::update::update_means;
use crate::{Matrix, Vector};
use tracing::{debug, info, warn};

/// One row of the EM trace.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IterationRecord {
    /// 1 for the initial guess, then 2, 3, ... per EM round.
    pub index: usize,
    pub means: ParameterVector,
    /// Q-function after the round; `0.0` on the initial record.
    pub objective: f64,
}

/// Why the driver stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Converged,
    MaxIterationsReached,
}

#[derive(Clone, Debug)]
enum DriverState {
    Initializing,
    Iterating {
        theta: ParameterVector,
        next_index: usize,
        rounds: usize,
        previous_objective: Option<f64>,
    },
    Finished(Option<Termination>),
}

/// EM estimator for the means of a three-component, equal-weight,
/// fixed-variance univariate Gaussian mixture.
#[derive(Clone, Debug, Default)]
pub struct GaussianMixtureEm {
    config: EmConfig,
}

impl GaussianMixtureEm {
    pub fn new() -> Self {
        Self {
            config: EmConfig::default(),
        }
    }

    pub fn with_config(config: EmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmConfig {
        &self.config
    }

    /// Lazily runs the estimator, yielding one record per step.
    ///
    /// Rounds run over the samples in ascending order, so the trace does not
    /// depend on input order. The configuration is validated on the first
    /// call to `next`.
    pub fn iterations<'a>(&'a self, samples: &SampleSet) -> EmIterations<'a> {
        EmIterations {
            config: &self.config,
            samples: samples.to_sorted(),
            state: DriverState::Initializing,
            objective_drops: Vec::new(),
        }
    }

    /// Runs to termination and keeps the whole trace.
    pub fn fit(&self, samples: &SampleSet) -> Result<FitResult, EmError> {
        let mut iterations = self.iterations(samples);
        let mut trace = Vec::new();
        for record in iterations.by_ref() {
            trace.push(record?);
        }

        let termination = iterations.termination().unwrap_or(Termination::Converged);
        let means = trace
            .last()
            .map(|record| record.means)
            .unwrap_or_else(|| ParameterVector::initial(samples));

        Ok(FitResult {
            trace,
            means,
            termination,
            config: self.config.clone(),
        })
    }

    /// One E-step + M-step round from `theta`, over the samples in ascending order.
    pub fn step(
        &self,
        theta: &ParameterVector,
        samples: &SampleSet,
    ) -> Result<(ParameterVector, ResponsibilityTable, f64), EmError> {
        self.config.validate()?;
        round(&self.config, theta, &samples.to_sorted(), 0)
    }
}

fn round(
    config: &EmConfig,
    theta: &ParameterVector,
    samples: &SampleSet,
    index: usize,
) -> Result<(ParameterVector, ResponsibilityTable, f64), EmError> {
    let responsibilities = ResponsibilityTable::compute(theta, samples, config, index)?;
    let next = update_means(&responsibilities, samples, config, index)?;
    let objective = expected_log_likelihood(&responsibilities, &next, samples, config);
    Ok((next, responsibilities, objective))
}

/// Iterator over the EM trace; see [`GaussianMixtureEm::iterations`].
pub struct EmIterations<'a> {
    config: &'a EmConfig,
    samples: SampleSet,
    state: DriverState,
    objective_drops: Vec<usize>,
}

impl EmIterations<'_> {
    /// `Some` once the iterator is exhausted without error.
    pub fn termination(&self) -> Option<Termination> {
        match self.state {
            DriverState::Finished(termination) => termination,
            _ => None,
        }
    }

    /// Indices of the records so far whose objective fell below the
    /// previous round's. Each one is also logged with `warn!`.
    pub fn objective_drops(&self) -> &[usize] {
        &self.objective_drops
    }

    fn fail(&mut self, err: EmError) -> Option<Result<IterationRecord, EmError>> {
        self.state = DriverState::Finished(None);
        Some(Err(err))
    }
}

impl Iterator for EmIterations<'_> {
    type Item = Result<IterationRecord, EmError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            DriverState::Finished(_) => None,
            DriverState::Initializing => {
                if let Err(err) = self.config.validate() {
                    return self.fail(err);
                }

                let theta = ParameterVector::initial(&self.samples);
                debug!(n_samples = self.samples.len(), means = %theta, "initialized");
                self.state = DriverState::Iterating {
                    theta,
                    next_index: 2,
                    rounds: 0,
                    previous_objective: None,
                };

                Some(Ok(IterationRecord {
                    index: 1,
                    means: theta,
                    objective: 0.0,
                }))
            }
            DriverState::Iterating {
                theta,
                next_index,
                rounds,
                previous_objective,
            } => {
                let (next, _, objective) = match round(self.config, &theta, &self.samples, next_index) {
                    Ok(step) => step,
                    Err(err) => return self.fail(err),
                };

                if let Some(previous) = previous_objective {
                    if objective < previous {
                        warn!(index = next_index, previous, objective, "reported objective decreased");
                        self.objective_drops.push(next_index);
                    }
                }

                let delta = theta.delta(&next, self.config.get_criterion());
                let rounds = rounds + 1;
                debug!(index = next_index, means = %next, objective, delta, "em round");

                // A NaN delta compares false and ends the loop.
                if delta >= self.config.get_epsilon() {
                    match self.config.get_max_iter() {
                        Some(max_iter) if rounds >= max_iter => {
                            warn!(rounds, means = %next, delta, "iteration cap reached before convergence");
                            self.state = DriverState::Finished(Some(Termination::MaxIterationsReached));
                        }
                        _ => {
                            self.state = DriverState::Iterating {
                                theta: next,
                                next_index: next_index + 1,
                                rounds,
                                previous_objective: Some(objective),
                            };
                        }
                    }
                } else {
                    info!(rounds, means = %next, objective, "converged");
                    self.state = DriverState::Finished(Some(Termination::Converged));
                }

                Some(Ok(IterationRecord {
                    index: next_index,
                    means: next,
                    objective,
                }))
            }
        }
    }
}

/// Outcome of [`GaussianMixtureEm::fit`].
#[derive(Clone, Debug)]
pub struct FitResult {
    pub trace: Vec<IterationRecord>,
    pub means: ParameterVector,
    pub termination: Termination,
    config: EmConfig,
}

impl FitResult {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Number of EM rounds run, excluding the initial record.
    pub fn n_rounds(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    pub fn final_objective(&self) -> Option<f64> {
        self.trace.iter().skip(1).last().map(|record| record.objective)
    }

    /// Indices of records whose objective fell by more than `tolerance`
    /// relative to the previous computed record.
    ///
    /// The initial record's placeholder objective is not compared.
    pub fn objective_decreases(&self, tolerance: f64) -> Vec<usize> {
        self.trace
            .iter()
            .skip(1)
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|pair| pair[1].objective < pair[0].objective - tolerance)
            .map(|pair| pair[1].index)
            .collect()
    }

    pub fn marginal_log_likelihood(&self, samples: &SampleSet) -> f64 {
        marginal_log_likelihood(&self.means, samples, &self.config)
    }

    /// Responsibilities of arbitrary points under the fitted means, N×3.
    pub fn predict_proba(&self, x: &Vector) -> Result<Matrix, EmError> {
        let table = ResponsibilityTable::for_points(&self.means, x.view(), &self.config, 0)?;
        Ok(table.matrix().clone())
    }

    /// Most responsible component (0, 1 or 2) for each point.
    pub fn predict(&self, x: &Vector) -> Result<Vec<usize>, EmError> {
        let table = ResponsibilityTable::for_points(&self.means, x.view(), &self.config, 0)?;
        Ok(table.hard_assignments())
    }
}
