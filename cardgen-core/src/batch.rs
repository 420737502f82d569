//! Batch assembly
//!
//! Cards are generated one at a time and only kept once the validator accepts
//! them independently of the generator.

use crate::{
    generator::{generate_card, CardRecord},
    input::CardTemplate,
    luhn, Result,
};
use rand::Rng;
use tracing::{debug, info};

/// Outcome of one batch generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Accepted cards in generation order
    pub cards: Vec<CardRecord>,
    /// Candidates produced, accepted or not
    pub attempts: u64,
    /// Candidates the validator turned away
    pub rejected: u64,
}

/// Build `count` Luhn-valid cards from `template`.
///
/// Retries are unbounded: a candidate failing validation is dropped and a new
/// one generated in its place.
pub fn assemble<R: Rng + ?Sized>(
    template: &CardTemplate,
    count: usize,
    length: usize,
    current_year: i32,
    rng: &mut R,
) -> Result<BatchReport> {
    let mut report = BatchReport {
        cards: Vec::with_capacity(count),
        ..Default::default()
    };

    while report.cards.len() < count {
        let card = generate_card(template, length, current_year, rng)?;
        report.attempts += 1;

        if luhn::is_valid(&card.number) {
            report.cards.push(card);
        } else {
            report.rejected += 1;
            debug!("Rejected candidate {} (checksum mismatch)", card.number);
        }
    }

    info!(
        "Assembled {} cards in {} attempts ({} rejected)",
        report.cards.len(),
        report.attempts,
        report.rejected
    );

    Ok(report)
}
