pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod logging;
pub mod mixture;
pub mod report;

pub use dataset::SampleSet;
pub use error::EmError;
pub use mixture::{
    ConvergenceCriterion, DegeneracyPolicy, EmConfig, EmIterations, FitResult,
    GaussianMixtureEm, IterationRecord, ParameterVector, ResponsibilityTable, Termination,
    N_COMPONENTS,
};
pub use report::TraceWriter;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
