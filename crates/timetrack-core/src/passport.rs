//! Passport number parsing.
//!
//! Users are identified by a passport string of the form `"SERIES NUMBER"`.
//! The registry is keyed by the two integer components.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// The integer components of a `"SERIES NUMBER"` passport string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassportNumber {
  pub series: i64,
  pub number: i64,
}

impl PassportNumber {
  pub const fn new(series: i64, number: i64) -> Self { Self { series, number } }

  /// Build from separately supplied components, e.g. query parameters.
  pub fn from_parts(series: &str, number: &str) -> Result<Self> {
    Ok(Self {
      series: parse_component(series, "passport series")?,
      number: parse_component(number, "passport number")?,
    })
  }
}

impl FromStr for PassportNumber {
  type Err = Error;

  /// Split on a single space into exactly two integer tokens.
  fn from_str(raw: &str) -> Result<Self> {
    let tokens: Vec<&str> = raw.split(' ').collect();
    let [series, number] = tokens.as_slice() else {
      return Err(Error::Validation(format!(
        "invalid passport number format: {raw:?} (expected \"SERIES NUMBER\")"
      )));
    };
    Self::from_parts(series, number)
  }
}

impl fmt::Display for PassportNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.series, self.number)
  }
}

fn parse_component(token: &str, what: &str) -> Result<i64> {
  token
    .parse()
    .map_err(|_| Error::Validation(format!("invalid {what}: {token:?}")))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_series_and_number() {
    let p: PassportNumber = "1234 567890".parse().unwrap();
    assert_eq!(p, PassportNumber::new(1234, 567_890));
  }

  #[test]
  fn leading_zeros_are_dropped_from_components() {
    let p: PassportNumber = "0123 456789".parse().unwrap();
    assert_eq!(p.series, 123);
    assert_eq!(p.number, 456_789);
  }

  #[test]
  fn rejects_wrong_token_count() {
    for raw in ["", "1234", "1234 5678 90", "1234  567890", " 1234 567890"] {
      let err = raw.parse::<PassportNumber>().unwrap_err();
      assert!(matches!(err, Error::Validation(_)), "{raw:?} -> {err}");
    }
  }

  #[test]
  fn rejects_non_numeric_tokens() {
    for raw in ["abcd 567890", "1234 56789x", "12.4 567890"] {
      let err = raw.parse::<PassportNumber>().unwrap_err();
      assert!(matches!(err, Error::Validation(_)), "{raw:?} -> {err}");
    }
  }

  #[test]
  fn from_parts_validates_each_component() {
    assert!(PassportNumber::from_parts("1001", "100001").is_ok());
    assert!(matches!(
      PassportNumber::from_parts("", "100001"),
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      PassportNumber::from_parts("1001", "abc"),
      Err(Error::Validation(_))
    ));
  }
}
