//! Conversion of cumulative ("at least _X_") probabilities into an exact discrete distribution
//! over the statistic, and the expectation thereof.
//!
//! The posted lines only describe the distribution between the lowest and the highest threshold.
//! Below the lowest line, a synthetic boundary is assumed with a cumulative probability of 1; it
//! is extrapolated one or more gaps beneath the lowest posted threshold, according to the
//! [Config::assumption_factor]. Above the highest line, the topmost value absorbs the entire
//! remaining tail.
//!
//! For statistics whose realised value rarely lands exactly on a posted threshold (such as
//! yardage), a [Resolution::Continuous] distribution reassigns each posted probability to the
//! midpoint between its threshold and the next one up, and the topmost probability to half a gap
//! above the highest threshold.

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tracing::trace;

/// Tolerance applied when checking that cumulative probabilities do not rise with the threshold.
const MONOTONICITY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The statistic is a count and lands exactly on the posted thresholds.
    Discrete,

    /// The statistic is effectively continuous, so posted probabilities are moved to midpoints.
    Continuous,
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Discrete => write!(f, "discrete"),
            Resolution::Continuous => write!(f, "continuous"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How many gaps (between the two lowest posted thresholds) beneath the lowest threshold the
    /// synthetic lower boundary is placed.
    pub assumption_factor: f64,
    pub resolution: Resolution,
}
impl Config {
    pub const DEFAULT_ASSUMPTION_FACTOR: f64 = 1.0;

    pub fn with_resolution(resolution: Resolution) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.assumption_factor.is_finite() || self.assumption_factor <= 0.0 {
            return Err(ConfigError::AssumptionFactor(self.assumption_factor));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assumption_factor: Self::DEFAULT_ASSUMPTION_FACTOR,
            resolution: Resolution::Discrete,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("assumption factor ({0}) must be finite and positive")]
    AssumptionFactor(f64),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DistributionError {
    #[error("no thresholds posted")]
    NoThresholds,

    #[error("only one threshold ({0}) posted; at least two are required")]
    DegenerateMarket(f64),

    #[error("threshold {0} posted more than once")]
    DuplicateThreshold(f64),

    #[error("cumulative probability rises from {lower_prob} at {lower} to {upper_prob} at {upper}")]
    NonMonotonic {
        lower: f64,
        lower_prob: f64,
        upper: f64,
        upper_prob: f64,
    },
}

/// `(value, probability)` pairs in strictly ascending order of value, where each probability is
/// that of the statistic being at least the value.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeProbs(Vec<(f64, f64)>);
impl CumulativeProbs {
    /// Sorts the given pairs by value, rejecting any value that appears more than once.
    pub fn try_from_unordered(mut pairs: Vec<(f64, f64)>) -> Result<Self, DistributionError> {
        pairs.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        if let Some(pair) = pairs.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(DistributionError::DuplicateThreshold(pair[0].0));
        }
        Ok(Self(pairs))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(f64, f64)] {
        &self.0
    }

    pub fn probs(&self) -> Vec<f64> {
        self.0.iter().map(|&(_, prob)| prob).collect()
    }

    fn check_monotonic(&self) -> Result<(), DistributionError> {
        let offending = self
            .0
            .windows(2)
            .find(|pair| pair[1].1 > pair[0].1 + MONOTONICITY_TOLERANCE);
        match offending {
            Some(&[(lower, lower_prob), (upper, upper_prob)]) => Err(DistributionError::NonMonotonic {
                lower,
                lower_prob,
                upper,
                upper_prob,
            }),
            _ => Ok(()),
        }
    }
}

/// `(value, probability mass)` pairs in ascending order of value.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactProbs(Vec<(f64, f64)>);
impl ExactProbs {
    pub fn pairs(&self) -> &[(f64, f64)] {
        &self.0
    }

    pub fn booksum(&self) -> f64 {
        self.0.iter().map(|&(_, prob)| prob).sum()
    }

    pub fn expectation(&self) -> f64 {
        self.0.iter().map(|&(value, prob)| value * prob).sum()
    }
}

/// Extrapolates the synthetic lower boundary `assumption_factor` gaps beneath the lowest posted
/// threshold. The boundary may be zero or negative.
pub fn assumed_min(posted: &CumulativeProbs, assumption_factor: f64) -> Result<f64, DistributionError> {
    match posted.pairs() {
        [] => Err(DistributionError::NoThresholds),
        [(only, _)] => Err(DistributionError::DegenerateMarket(*only)),
        [(lowest, _), (next, _), ..] => Ok(lowest - assumption_factor * (next - lowest)),
    }
}

/// Moves each probability to the midpoint between its threshold and the next one up, and the
/// topmost probability to half a gap above the highest threshold. Preserves both the number of
/// entries and their probabilities.
pub fn adjust_midpoints(posted: &CumulativeProbs) -> Result<CumulativeProbs, DistributionError> {
    let pairs = posted.pairs();
    match pairs {
        [] => return Err(DistributionError::NoThresholds),
        [(only, _)] => return Err(DistributionError::DegenerateMarket(*only)),
        _ => {}
    }

    let mut adjusted = Vec::with_capacity(pairs.len());
    for pair in pairs.windows(2) {
        let ((value, prob), (next_value, _)) = (pair[0], pair[1]);
        adjusted.push(((value + next_value) / 2.0, prob));
    }
    let (highest, top_prob) = pairs[pairs.len() - 1];
    let (second_highest, _) = pairs[pairs.len() - 2];
    adjusted.push((highest + (highest - second_highest) / 2.0, top_prob));
    Ok(CumulativeProbs(adjusted))
}

/// Differences adjacent cumulative probabilities into exact masses. The topmost value keeps its
/// own cumulative probability, absorbing the tail above it.
pub fn cumulative_to_exact(cumulative: &CumulativeProbs) -> ExactProbs {
    let pairs = cumulative.pairs();
    let mut exact = Vec::with_capacity(pairs.len());
    for pair in pairs.windows(2) {
        let ((value, prob), (_, next_prob)) = (pair[0], pair[1]);
        exact.push((value, prob - next_prob));
    }
    if let Some(&top) = pairs.last() {
        exact.push(top);
    }
    ExactProbs(exact)
}

#[derive(Debug, Clone)]
pub struct DistributionBuilder {
    config: Config,
}
impl DistributionBuilder {
    /// A builder with the default assumption factor and the given resolution.
    pub fn with_resolution(resolution: Resolution) -> Self {
        Self {
            config: Config::with_resolution(resolution),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the exact distribution from the posted cumulative probabilities.
    pub fn build(&self, posted: &CumulativeProbs) -> Result<ExactProbs, DistributionError> {
        // the boundary is derived from the posted thresholds, before any midpoint adjustment
        let assumed_min = assumed_min(posted, self.config.assumption_factor)?;

        let adjusted = match self.config.resolution {
            Resolution::Discrete => posted.clone(),
            Resolution::Continuous => adjust_midpoints(posted)?,
        };

        let mut pairs = Vec::with_capacity(adjusted.len() + 1);
        pairs.push((assumed_min, 1.0));
        pairs.extend_from_slice(adjusted.pairs());
        let cumulative = CumulativeProbs::try_from_unordered(pairs)?;
        cumulative.check_monotonic()?;
        trace!("cumulative: {cumulative:?}");

        Ok(cumulative_to_exact(&cumulative))
    }

    pub fn expectation(&self, posted: &CumulativeProbs) -> Result<f64, DistributionError> {
        Ok(self.build(posted)?.expectation())
    }
}

impl TryFrom<Config> for DistributionBuilder {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Default for DistributionBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}
