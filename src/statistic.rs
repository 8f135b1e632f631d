//! The closed set of player statistics for which cumulative lines are sourced.

use std::str::FromStr;

use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;

use crate::distribution::{Config, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumCount, EnumIter, Display)]
pub enum Statistic {
    #[strum(to_string = "PASS_TDS")]
    PassingTouchdowns,

    #[strum(to_string = "PASS_YDS")]
    PassingYards,

    #[strum(to_string = "RUSH_YDS")]
    RushingYards,

    #[strum(to_string = "REC_YDS")]
    ReceivingYards,
}
impl Statistic {
    /// Touchdowns are counted, whereas yardage rarely lands exactly on a posted line.
    pub fn resolution(&self) -> Resolution {
        match self {
            Statistic::PassingTouchdowns => Resolution::Discrete,
            Statistic::PassingYards | Statistic::RushingYards | Statistic::ReceivingYards => {
                Resolution::Continuous
            }
        }
    }

    /// Standard fantasy points awarded per unit of the statistic.
    pub fn fantasy_value(&self) -> f64 {
        match self {
            Statistic::PassingTouchdowns => 4.0,
            Statistic::PassingYards => 0.04,
            Statistic::RushingYards | Statistic::ReceivingYards => 0.1,
        }
    }

    pub fn config(&self) -> Config {
        Config::with_resolution(self.resolution())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Statistic::PassingTouchdowns => "passing touchdowns",
            Statistic::PassingYards => "passing yards",
            Statistic::RushingYards => "rushing yards",
            Statistic::ReceivingYards => "receiving yards",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown statistic '{0}'")]
pub struct UnknownStatistic(pub String);

impl FromStr for Statistic {
    type Err = UnknownStatistic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "PASS_TDS" | "PASSING_TDS" | "PASSING_TOUCHDOWNS" => Ok(Statistic::PassingTouchdowns),
            "PASS_YDS" | "PASSING_YDS" | "PASSING_YARDS" => Ok(Statistic::PassingYards),
            "RUSH_YDS" | "RUSHING_YDS" | "RUSHING_YARDS" => Ok(Statistic::RushingYards),
            "REC_YDS" | "RECEIVING_YDS" | "RECEIVING_YARDS" => Ok(Statistic::ReceivingYards),
            _ => Err(UnknownStatistic(s.into())),
        }
    }
}
