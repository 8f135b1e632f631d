//! Fitting of implied probabilities to a set of posted lines, optionally removing the
//! bookmaker's margin.

use tracing::debug;

use crate::odds::AmericanOdds;
use crate::probs::SliceExt;

#[derive(Debug, Clone, PartialEq)]
pub struct Overround {
    pub method: OverroundMethod,
    pub value: f64,
}
impl Overround {
    /// The overround of a book whose margin has been left in place.
    pub fn retained(booksum: f64, fair_sum: f64) -> Self {
        Self {
            method: OverroundMethod::Retained,
            value: booksum / fair_sum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverroundMethod {
    /// Implied probabilities are taken as-is.
    Retained,

    /// Implied probabilities are scaled in proportion so that they sum to the fair booksum.
    Multiplicative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub probs: Vec<f64>,
    pub overround: Overround,
}
impl Market {
    /// Takes the implied probabilities of the `prices` without removing any margin.
    pub fn implied(prices: &[AmericanOdds]) -> Self {
        let probs: Vec<_> = prices.iter().map(AmericanOdds::implied_probability).collect();
        let booksum = probs.sum();
        Self {
            probs,
            overround: Overround::retained(booksum, 1.0),
        }
    }

    /// Fits the `prices` using the multiplicative method, so that the resulting probabilities
    /// sum to `fair_sum` while preserving their relative ratios.
    ///
    /// Note that when the lines are cumulative rather than mutually exclusive, their fair sum is
    /// not really known, and scaling them to `fair_sum` is only an approximation.
    pub fn fit_multiplicative(prices: &[AmericanOdds], fair_sum: f64) -> Self {
        let mut probs: Vec<_> = prices.iter().map(AmericanOdds::implied_probability).collect();
        let overround = probs.normalise(fair_sum) / fair_sum;
        debug!("fitted {} prices with overround {overround:.6}", prices.len());
        Self {
            probs,
            overround: Overround {
                method: OverroundMethod::Multiplicative,
                value: overround,
            },
        }
    }

    /// Fits the market, removing the margin only if `devig` is set.
    pub fn fit(prices: &[AmericanOdds], devig: bool) -> Self {
        if devig {
            Self::fit_multiplicative(prices, 1.0)
        } else {
            Self::implied(prices)
        }
    }

    pub fn booksum(&self) -> f64 {
        self.probs.sum()
    }
}
