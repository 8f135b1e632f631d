//! American odds and their implied probabilities.
//!
//! A price of `+300` pays 300 for every 100 staked, implying a 25% chance. A price of `-150`
//! requires a stake of 150 to win 100, implying 60%.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// The Unicode minus sign, as emitted by some sportsbook feeds in place of `-`.
const UNICODE_MINUS: char = '\u{2212}';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed odds '{0}'")]
pub struct MalformedOdds(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmericanOdds {
    /// Underdog price: the payout per 100 staked.
    Plus(u32),

    /// Favourite price: the stake required to win 100.
    Minus(u32),
}
impl AmericanOdds {
    /// The probability implied by this price, before any margin is removed.
    pub fn implied_probability(&self) -> f64 {
        match self {
            AmericanOdds::Plus(magnitude) => 100.0 / (*magnitude as f64 + 100.0),
            AmericanOdds::Minus(magnitude) => *magnitude as f64 / (*magnitude as f64 + 100.0),
        }
    }
}

impl FromStr for AmericanOdds {
    type Err = MalformedOdds;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let (positive, digits) = match chars.next() {
            Some('+') => (true, chars.as_str()),
            Some('-') | Some(UNICODE_MINUS) => (false, chars.as_str()),
            Some(_) => (false, trimmed),
            None => return Err(MalformedOdds(s.into())),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MalformedOdds(s.into()));
        }
        let magnitude = digits.parse::<u32>().map_err(|_| MalformedOdds(s.into()))?;
        if positive {
            Ok(AmericanOdds::Plus(magnitude))
        } else {
            Ok(AmericanOdds::Minus(magnitude))
        }
    }
}

impl Display for AmericanOdds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AmericanOdds::Plus(magnitude) => write!(f, "+{magnitude}"),
            AmericanOdds::Minus(magnitude) => write!(f, "-{magnitude}"),
        }
    }
}

/// Parses an American odds string and converts it to an implied probability.
pub fn implied_probability(odds: &str) -> Result<f64, MalformedOdds> {
    Ok(AmericanOdds::from_str(odds)?.implied_probability())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;

    #[test]
    fn parse_signs() {
        assert_eq!(AmericanOdds::Plus(300), "+300".parse::<AmericanOdds>().unwrap());
        assert_eq!(AmericanOdds::Minus(150), "-150".parse::<AmericanOdds>().unwrap());
        assert_eq!(AmericanOdds::Minus(150), "\u{2212}150".parse::<AmericanOdds>().unwrap());
        assert_eq!(AmericanOdds::Minus(110), "110".parse::<AmericanOdds>().unwrap());
        assert_eq!(AmericanOdds::Plus(120), " +120 ".parse::<AmericanOdds>().unwrap());
    }

    #[test]
    fn parse_malformed() {
        for malformed in ["", "+", "-", "+abc", "-1.5", "++100", "+ 100", "even"] {
            assert_eq!(
                MalformedOdds(malformed.into()),
                AmericanOdds::from_str(malformed).unwrap_err(),
                "for '{malformed}'"
            );
        }
    }

    #[test]
    fn implied_probability_at_evens() {
        assert_eq!(0.5, implied_probability("+100").unwrap());
        assert_eq!(0.5, implied_probability("-100").unwrap());
    }

    #[test]
    fn implied_probability_known_prices() {
        assert_float_absolute_eq!(0.6, implied_probability("-150").unwrap(), 1e-12);
        assert_float_absolute_eq!(0.25, implied_probability("+300").unwrap(), 1e-12);
        assert_float_absolute_eq!(0.125, implied_probability("+700").unwrap(), 1e-12);
        assert_float_absolute_eq!(0.8, implied_probability("-400").unwrap(), 1e-12);
    }

    #[test]
    fn implied_probability_bounded_and_monotonic() {
        let mut previous = 0.5;
        for magnitude in (100..=10_000).step_by(50) {
            let prob = AmericanOdds::Plus(magnitude).implied_probability();
            assert!((0.0..=1.0).contains(&prob));
            assert!(prob <= previous, "+{magnitude} gave {prob} > {previous}");
            previous = prob;
        }

        let mut previous = 0.5;
        for magnitude in (100..=10_000).step_by(50) {
            let prob = AmericanOdds::Minus(magnitude).implied_probability();
            assert!((0.0..=1.0).contains(&prob));
            assert!(prob >= previous, "-{magnitude} gave {prob} < {previous}");
            previous = prob;
        }
    }

    #[test]
    fn display() {
        assert_eq!("+300", AmericanOdds::Plus(300).to_string());
        assert_eq!("-150", AmericanOdds::Minus(150).to_string());
    }
}
