//! Parsing of cumulative line labels, such as `2+` or `250+`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed threshold label '{0}'")]
pub struct MalformedThreshold(pub String);

/// Parses a label of the form `<number>+` into the threshold it denotes. The trailing `+` is
/// optional; the number must be finite and non-negative.
pub fn parse_label(label: &str) -> Result<f64, MalformedThreshold> {
    let trimmed = label.trim();
    let number = trimmed.strip_suffix('+').unwrap_or(trimmed).trim_end();
    let threshold = number
        .parse::<f64>()
        .map_err(|_| MalformedThreshold(label.into()))?;
    if !threshold.is_finite() || threshold < 0.0 || number.starts_with(&['+', '-'][..]) {
        return Err(MalformedThreshold(label.into()));
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole() {
        assert_eq!(2.0, parse_label("2+").unwrap());
        assert_eq!(250.0, parse_label("250+").unwrap());
        assert_eq!(0.0, parse_label("0+").unwrap());
        assert_eq!(3.0, parse_label(" 3+ ").unwrap());
    }

    #[test]
    fn parse_without_marker() {
        assert_eq!(4.0, parse_label("4").unwrap());
    }

    #[test]
    fn parse_fractional() {
        assert_eq!(150.5, parse_label("150.5+").unwrap());
    }

    #[test]
    fn parse_malformed() {
        for malformed in ["", "+", "two+", "-1+", "+2+", "2++", "NaN+", "inf+"] {
            assert_eq!(
                MalformedThreshold(malformed.into()),
                parse_label(malformed).unwrap_err(),
                "for '{malformed}'"
            );
        }
    }
}
