//! Single-line (Over/Under) markets, where each player has one posted points line and the line
//! itself is taken as the expectation.

use rustc_hash::FxHashMap;

use crate::market::Market;
use crate::odds::{AmericanOdds, MalformedOdds};
use crate::predictor::{PlayerFailure, PredictionError, Predictions};
use crate::snapshot::{MarketSnapshot, OutcomeType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverUnderLine {
    pub points: Option<f64>,
    pub over: Option<String>,
    pub under: Option<String>,
}
impl OverUnderLine {
    /// The probability of the Over, with the two-way margin removed. Undefined unless both sides
    /// are posted.
    pub fn fair_over_probability(&self) -> Result<Option<f64>, MalformedOdds> {
        match (&self.over, &self.under) {
            (Some(over), Some(under)) => {
                let prices = vec![over.parse::<AmericanOdds>()?, under.parse::<AmericanOdds>()?];
                let market = Market::fit_multiplicative(&prices, 1.0);
                Ok(Some(market.probs[0]))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinePredictor {
    fantasy_value: f64,
    lines: FxHashMap<String, OverUnderLine>,
}
impl LinePredictor {
    /// Collates the lines of every player in the snapshot. Where a player appears in more than
    /// one selection, the later points value replaces the earlier one, and the Over and Under
    /// odds are taken from the last selection of each outcome type, even where that selection
    /// is suspended.
    pub fn new(snapshot: &MarketSnapshot, fantasy_value: f64) -> Self {
        let mut lines: FxHashMap<String, OverUnderLine> = FxHashMap::default();
        for selection in &snapshot.selections {
            for participant in &selection.participants {
                let line = lines.entry(participant.name.clone()).or_default();
                if let Some(points) = selection.points {
                    line.points = Some(points);
                }
                match selection.outcome_type {
                    Some(OutcomeType::Over) => line.over = selection.american().map(String::from),
                    Some(OutcomeType::Under) => line.under = selection.american().map(String::from),
                    _ => {}
                }
            }
        }
        Self {
            fantasy_value,
            lines,
        }
    }

    pub fn player_lines(&self) -> &FxHashMap<String, OverUnderLine> {
        &self.lines
    }

    pub fn player_expectation(&self, player: &str) -> Result<f64, PredictionError> {
        let line = self
            .lines
            .get(player)
            .ok_or_else(|| PredictionError::UnresolvablePlayer(player.into()))?;
        line.points
            .ok_or_else(|| PredictionError::MissingLine(player.into()))
    }

    pub fn all_expectations(&self) -> Predictions {
        let mut predictions = Predictions::default();
        for player in self.lines.keys() {
            match self.player_expectation(player) {
                Ok(expectation) => {
                    predictions.values.insert(player.clone(), expectation);
                }
                Err(error) => predictions.failures.push(PlayerFailure {
                    player: player.clone(),
                    error,
                }),
            }
        }
        predictions
    }

    pub fn all_fantasy_points(&self) -> Predictions {
        self.all_expectations().scale(self.fantasy_value)
    }
}
