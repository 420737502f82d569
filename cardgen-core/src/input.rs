//! Form input handling
//!
//! Every field arrives as optional raw text. Blank fields count as absent and
//! fall back to a randomized or default value independently of each other.

use crate::{Error, Result, DEFAULT_COUNT, MAX_COUNT, MAX_PREFIX_LEN, MIN_COUNT};
use serde::{Deserialize, Serialize};

/// Raw generation request as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationInput {
    /// Bank identification prefix (up to 6 digits)
    #[serde(default)]
    pub prefix: Option<String>,

    /// Expiry month (MM)
    #[serde(default)]
    pub month: Option<String>,

    /// Expiry year (YY)
    #[serde(default)]
    pub year: Option<String>,

    /// Card verification value
    #[serde(default)]
    pub cvv: Option<String>,

    /// Number of cards to generate, kept as entered
    #[serde(default)]
    pub count: Option<String>,
}

/// Validated per-card fields; `None` means "randomize"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardTemplate {
    pub prefix: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub cvv: Option<String>,
}

impl GenerationInput {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_cvv(mut self, cvv: impl Into<String>) -> Self {
        self.cvv = Some(cvv.into());
        self
    }

    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Requested batch size after defaulting and clamping
    pub fn count(&self) -> usize {
        parse_count(present(&self.count))
    }

    /// Validate the per-card fields against the form constraints
    pub fn template(&self) -> Result<CardTemplate> {
        Ok(CardTemplate {
            prefix: present(&self.prefix).map(validate_prefix).transpose()?,
            month: present(&self.month).map(normalize_month).transpose()?,
            year: present(&self.year).map(validate_year).transpose()?,
            cvv: present(&self.cvv).map(validate_cvv).transpose()?,
        })
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a requested count the way a lenient numeric form field would.
///
/// Leading whitespace and a sign are accepted and anything after the leading
/// digits is ignored. Text without leading digits, or no text at all, yields
/// the default of 10. The result is clamped to 1..=100.
pub fn parse_count(raw: Option<&str>) -> usize {
    let requested = raw.and_then(leading_integer).unwrap_or(DEFAULT_COUNT as i64);
    requested.clamp(MIN_COUNT as i64, MAX_COUNT as i64) as usize
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    // Overlong inputs saturate; they clamp to the maximum anyway.
    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn validate_prefix(prefix: &str) -> Result<String> {
    if !all_digits(prefix) {
        return Err(Error::field("prefix", "must contain only digits"));
    }
    if prefix.len() > MAX_PREFIX_LEN {
        return Err(Error::field(
            "prefix",
            format!("at most {} digits allowed", MAX_PREFIX_LEN),
        ));
    }
    Ok(prefix.to_string())
}

fn normalize_month(month: &str) -> Result<String> {
    if !all_digits(month) || month.len() > 2 {
        return Err(Error::field("month", "expected MM"));
    }
    match month.parse::<u8>() {
        Ok(m @ 1..=12) => Ok(format!("{:02}", m)),
        _ => Err(Error::field("month", format!("{} is not between 01 and 12", month))),
    }
}

fn validate_year(year: &str) -> Result<String> {
    if year.len() != 2 || !all_digits(year) {
        return Err(Error::field("year", "expected YY"));
    }
    Ok(year.to_string())
}

fn validate_cvv(cvv: &str) -> Result<String> {
    if !(3..=4).contains(&cvv.len()) || !all_digits(cvv) {
        return Err(Error::field("cvv", "must be 3-4 digits"));
    }
    Ok(cvv.to_string())
}
