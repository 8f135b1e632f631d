//! Expected statistics and fantasy points for players in a cumulative-lines market.
//!
//! Each player is priced independently: their lines are extracted from the snapshot, converted
//! to implied probabilities (optionally with the margin removed), turned into an exact
//! distribution, and reduced to its expectation.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::distribution::{CumulativeProbs, DistributionBuilder, DistributionError};
use crate::market::Market;
use crate::odds::{AmericanOdds, MalformedOdds};
use crate::snapshot::MarketSnapshot;
use crate::statistic::Statistic;
use crate::threshold::{parse_label, MalformedThreshold};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("player '{0}' does not appear in the market")]
    UnresolvablePlayer(String),

    #[error("player '{0}' has no posted line")]
    MissingLine(String),

    #[error("player '{player}' has no odds posted for '{label}'")]
    MissingOdds { player: String, label: String },

    #[error("{0}")]
    MalformedOdds(#[from] MalformedOdds),

    #[error("{0}")]
    MalformedThreshold(#[from] MalformedThreshold),

    #[error("{0}")]
    Distribution(#[from] DistributionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerFailure {
    pub player: String,
    pub error: PredictionError,
}

/// The outcome of pricing every player in a market: the values for those that could be priced,
/// and the reasons for those that could not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predictions {
    pub values: FxHashMap<String, f64>,
    pub failures: Vec<PlayerFailure>,
}
impl Predictions {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            values: self
                .values
                .into_iter()
                .map(|(player, value)| (player, value * factor))
                .collect(),
            failures: self.failures,
        }
    }
}

#[derive(Debug)]
pub struct CumulativePredictor<'a> {
    snapshot: &'a MarketSnapshot,
    fantasy_value: f64,
    builder: DistributionBuilder,
}
impl<'a> CumulativePredictor<'a> {
    pub fn new(snapshot: &'a MarketSnapshot, fantasy_value: f64, builder: DistributionBuilder) -> Self {
        Self {
            snapshot,
            fantasy_value,
            builder,
        }
    }

    /// A predictor using the resolution and standard fantasy scoring of the given statistic.
    pub fn for_statistic(snapshot: &'a MarketSnapshot, statistic: Statistic) -> Self {
        Self::new(
            snapshot,
            statistic.fantasy_value(),
            DistributionBuilder::with_resolution(statistic.resolution()),
        )
    }

    pub fn builder(&self) -> &DistributionBuilder {
        &self.builder
    }

    /// The posted cumulative probabilities for the given player, keyed by threshold.
    pub fn cumulative_probs(&self, player: &str, devig: bool) -> Result<CumulativeProbs, PredictionError> {
        let odds = self.snapshot.player_odds(player);
        if odds.is_empty() {
            return Err(PredictionError::UnresolvablePlayer(player.into()));
        }
        debug!("{player}: {odds:?}");

        // visited in label order
        let mut odds: Vec<_> = odds.into_iter().collect();
        odds.sort_unstable_by_key(|&(label, _)| label);
        let mut thresholds = Vec::with_capacity(odds.len());
        let mut prices = Vec::with_capacity(odds.len());
        for (label, price) in odds {
            thresholds.push(parse_label(label)?);
            let price = price.ok_or_else(|| PredictionError::MissingOdds {
                player: player.into(),
                label: label.into(),
            })?;
            prices.push(price.parse::<AmericanOdds>()?);
        }

        let market = Market::fit(&prices, devig);
        debug!("{player}: booksum {:.6}, overround {:?}", market.booksum(), market.overround);
        let pairs = thresholds.into_iter().zip(market.probs).collect();
        Ok(CumulativeProbs::try_from_unordered(pairs)?)
    }

    pub fn player_expectation(&self, player: &str, devig: bool) -> Result<f64, PredictionError> {
        let posted = self.cumulative_probs(player, devig)?;
        let expectation = self.builder.expectation(&posted)?;
        debug!("{player}: expectation {expectation:.6}");
        Ok(expectation)
    }

    pub fn player_fantasy_points(&self, player: &str, devig: bool) -> Result<f64, PredictionError> {
        Ok(self.player_expectation(player, devig)? * self.fantasy_value)
    }

    /// Prices every player named in the snapshot. A player is priced once, on first appearance;
    /// a player that cannot be priced is reported among the failures without affecting others.
    pub fn all_expectations(&self, devig: bool) -> Predictions {
        let mut predictions = Predictions::default();
        for player in self.snapshot.player_names() {
            match self.player_expectation(player, devig) {
                Ok(expectation) => {
                    predictions.values.insert(player.into(), expectation);
                }
                Err(error) => {
                    warn!("could not price {player}: {error}");
                    predictions.failures.push(PlayerFailure {
                        player: player.into(),
                        error,
                    });
                }
            }
        }
        predictions
    }

    pub fn all_fantasy_points(&self, devig: bool) -> Predictions {
        self.all_expectations(devig).scale(self.fantasy_value)
    }
}
