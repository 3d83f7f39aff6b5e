use crate::error::EmError;
use crate::Vector;
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Read;

/// Smallest sample count the initializer can pick three order statistics from.
pub const MIN_SAMPLES: usize = 3;

/// An immutable, ordered set of univariate observations.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSet {
    values: Vector,
}

impl SampleSet {
    pub fn new(values: Vector) -> Result<Self, EmError> {
        if values.len() < MIN_SAMPLES {
            return Err(EmError::InsufficientSamples {
                found: values.len(),
            });
        }

        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(EmError::NonFiniteSample {
                position: index + 1,
                value,
            });
        }

        Ok(Self { values })
    }

    pub fn from_slice(values: &[f64]) -> Result<Self, EmError> {
        Self::new(Vector::from_vec(values.to_vec()))
    }

    /// Parses `N` followed by `N` whitespace-separated reals.
    ///
    /// Anything after the N-th value is ignored. Value positions in errors
    /// are 1-based; the leading `N` is position 0.
    pub fn parse(input: &str) -> Result<Self, EmError> {
        let mut tokens = input.split_whitespace();

        let count_token = tokens.next().ok_or(EmError::MissingCount)?;
        let expected: usize = count_token.parse().map_err(|_| EmError::InvalidCount {
            token: count_token.to_string(),
        })?;

        // N is untrusted until the tokens are actually there.
        let mut values = Vec::with_capacity(expected.min(input.len()));
        for position in 1..=expected {
            let token = tokens.next().ok_or(EmError::MissingSamples {
                expected,
                found: values.len(),
            })?;
            let value: f64 = token.parse().map_err(|_| EmError::InvalidToken {
                position,
                token: token.to_string(),
            })?;
            values.push(value);
        }

        Self::new(Vector::from_vec(values))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, EmError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// Draws `per_component` normal samples around each mean, in component order.
    pub fn synthetic(
        means: [f64; 3],
        per_component: usize,
        variance: f64,
        seed: u64,
    ) -> Result<Self, EmError> {
        if !variance.is_finite() || variance <= 0.0 {
            return Err(EmError::InvalidConfig {
                field: "variance",
                reason: format!("must be finite and > 0, got {}", variance),
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut values = Vec::with_capacity(per_component * means.len());
        for &mean in &means {
            let normal = Normal::new(mean, variance.sqrt()).map_err(|e| EmError::InvalidConfig {
                field: "means",
                reason: e.to_string(),
            })?;
            let draws = Vector::random_using(per_component, normal, &mut rng);
            values.extend(draws.iter());
        }

        Self::new(Vector::from_vec(values))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Vector {
        &self.values
    }

    /// Ascending copy; the stored order is left untouched.
    pub fn sorted(&self) -> Vector {
        let mut sorted = self.values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Vector::from_vec(sorted)
    }

    /// The same samples in ascending order.
    pub fn to_sorted(&self) -> SampleSet {
        Self {
            values: self.sorted(),
        }
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}
