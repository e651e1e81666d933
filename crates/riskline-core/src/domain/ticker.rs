use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::RiskError;

const MAX_TICKER_LEN: usize = 32;

/// Normalized exchange ticker (e.g. `SBER`, `SU26238RMFS4`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Trim, uppercase and validate a ticker.
    ///
    /// Case is folded so `sber` and `SBER` name the same instrument; anything
    /// built from the result (a [`PriceFact`](crate::PriceFact), a request URL)
    /// carries the uppercase form. Only ASCII alphanumerics, `.`, `-` and `_`
    /// are accepted so the value is safe in a URL path segment.
    pub fn parse(input: &str) -> Result<Self, RiskError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(RiskError::invalid_input("ticker cannot be empty"));
        }

        let normalized = raw
            .char_indices()
            .map(|(index, ch)| match ch {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => Ok(ch.to_ascii_uppercase()),
                _ => Err(RiskError::invalid_input(format!(
                    "ticker contains invalid character '{ch}' at index {index}"
                ))),
            })
            .collect::<Result<String, _>>()?;

        // Every accepted character is one byte.
        if normalized.len() > MAX_TICKER_LEN {
            return Err(RiskError::invalid_input(format!(
                "ticker '{normalized}' is longer than {MAX_TICKER_LEN} characters"
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = RiskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = RiskError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}
