//! Derives the expected output of American football players from sportsbook player props.
//! Cumulative ("at least _X_") lines are converted to implied probabilities, optionally
//! stripped of their margin, and differenced into an exact distribution whose expectation is
//! the player's projected statistic. Projections scale into fantasy points.

pub mod data;
pub mod distribution;
pub mod file;
pub mod line;
pub mod market;
pub mod odds;
pub mod predictor;
pub mod print;
pub mod probs;
pub mod snapshot;
pub mod statistic;
pub mod threshold;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
