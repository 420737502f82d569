//! Card number and card record generation
//!
//! The random source is always injected so callers decide between the thread
//! RNG and a seeded one.

use crate::{input::CardTemplate, luhn, Error, Result, DEFAULT_PREFIX};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A generated test card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Digit string including the check digit
    pub number: String,
    /// Expiry as `MM/YY`
    pub expiry: String,
    /// 3 or 4 digit verification value
    pub cvv: String,
}

impl CardRecord {
    /// Month half of the expiry (`MM`)
    pub fn expiry_month(&self) -> &str {
        self.expiry.split('/').next().unwrap_or_default()
    }

    /// Year half of the expiry (`YY`)
    pub fn expiry_year(&self) -> &str {
        self.expiry.split('/').nth(1).unwrap_or_default()
    }
}

/// Generate a Luhn-valid number of `length` digits starting with `prefix`.
///
/// An empty prefix defaults to `"4"`. Random digits fill the number up to
/// `length - 1` and the check digit completes it. A prefix that already
/// occupies `length` digits or more leaves no room for a check digit and is
/// rejected.
pub fn generate_number<R: Rng + ?Sized>(prefix: &str, length: usize, rng: &mut R) -> Result<String> {
    let prefix = if prefix.is_empty() { DEFAULT_PREFIX } else { prefix };

    if luhn::parse_digits(prefix).is_none() {
        return Err(Error::field("prefix", "must contain only digits"));
    }
    if prefix.len() >= length {
        return Err(Error::field(
            "prefix",
            format!("{} digits leaves no room for a check digit in a {}-digit number", prefix.len(), length),
        ));
    }

    let mut number = String::with_capacity(length);
    number.push_str(prefix);
    while number.len() < length - 1 {
        number.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }

    let check = luhn::check_digit(&number)
        .ok_or_else(|| Error::Validation(format!("non-digit payload: {}", number)))?;
    number.push(char::from(b'0' + check));
    Ok(number)
}

/// Generate one card record, randomizing every field the template leaves open.
///
/// `current_year` is the full calendar year; a random expiry lands 1 to 5
/// years after it.
pub fn generate_card<R: Rng + ?Sized>(
    template: &CardTemplate,
    length: usize,
    current_year: i32,
    rng: &mut R,
) -> Result<CardRecord> {
    let number = generate_number(template.prefix.as_deref().unwrap_or(DEFAULT_PREFIX), length, rng)?;

    let month = match &template.month {
        Some(m) => m.clone(),
        None => format!("{:02}", rng.gen_range(1..=12)),
    };

    let year = match &template.year {
        Some(y) => y.clone(),
        None => {
            let full = current_year + rng.gen_range(1..=5);
            format!("{:02}", full.rem_euclid(100))
        }
    };

    let cvv = match &template.cvv {
        Some(c) => c.clone(),
        None => rng.gen_range(100..=999).to_string(),
    };

    Ok(CardRecord {
        number,
        expiry: format!("{}/{}", month, year),
        cvv,
    })
}
