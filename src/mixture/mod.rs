//! Expectation-Maximization for a univariate three-component Gaussian mixture.
//!
//! Only the component means are estimated. The shared variance σ² and the
//! shared mixing weight T come from [`EmConfig`] and stay fixed for the run.
//!
//! A run is a chain of immutable values:
//! - [`ParameterVector::initial`]: min, lower median and max of the sorted samples
//! - [`ResponsibilityTable::compute`]: E-step, soft assignments that sum to one per sample
//! - [`update_means`]: M-step, responsibility-weighted means
//! - [`expected_log_likelihood`]: the Q-function reported for each round
//!
//! [`GaussianMixtureEm`] drives these until the change in means drops below ε.
//!
//! # Examples
//!
//! ```rust
//! use mixem::{GaussianMixtureEm, SampleSet};
//!
//! let samples = SampleSet::from_slice(&[1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 20.0, 21.0, 22.0]).unwrap();
//!
//! let result = GaussianMixtureEm::new().fit(&samples).unwrap();
//! assert!(result.converged());
//!
//! for record in &result.trace {
//!     println!("{} {} {:.5}", record.index, record.means, record.objective);
//! }
//! ```
//!
//! The same run as a stream of records:
//!
//! ```rust
//! use mixem::{ConvergenceCriterion, EmConfig, GaussianMixtureEm, SampleSet};
//!
//! let samples = SampleSet::parse("5 0.1 0.4 5.2 5.0 9.7").unwrap();
//! let em = GaussianMixtureEm::with_config(
//!     EmConfig::new().criterion(ConvergenceCriterion::Absolute).max_iter(200),
//! );
//!
//! for record in em.iterations(&samples) {
//!     let record = record.unwrap();
//!     println!("[{},] {}", record.index, record.means);
//! }
//! ```

mod config;
mod estimator;
mod objective;
mod params;
mod responsibility;
mod update;

/// The mixture always has exactly this many components.
pub const N_COMPONENTS: usize = 3;

pub use config::{ConvergenceCriterion, DegeneracyPolicy, EmConfig};
pub use estimator::{EmIterations, FitResult, GaussianMixtureEm, IterationRecord, Termination};
pub use objective::{expected_log_likelihood, marginal_log_likelihood};
pub use params::ParameterVector;
pub use responsibility::ResponsibilityTable;
pub use update::update_means;
