//! Copy and export formats

use crate::{generator::CardRecord, Result};
use serde::{Deserialize, Serialize};

/// Name of the file produced by CSV export
pub const EXPORT_FILE_NAME: &str = "cards_export.csv";

/// MIME type of the CSV export
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Header row of the CSV export
pub const CSV_HEADER: [&str; 3] = ["Card Number", "Expiry", "CVV"];

/// Clipboard line for one card: `NUMBER|MM|20YY|CVV`
pub fn copy_line(card: &CardRecord) -> String {
    format!(
        "{}|{}|20{}|{}",
        card.number,
        card.expiry_month(),
        card.expiry_year(),
        card.cvv
    )
}

/// Clipboard text for a whole batch, one [`copy_line`] per card
pub fn copy_all(cards: &[CardRecord]) -> String {
    cards.iter().map(copy_line).collect::<Vec<_>>().join("\n")
}

/// CSV document with a header row and one `NUMBER,MM/YY,CVV` row per card
pub fn csv_document(cards: &[CardRecord]) -> String {
    std::iter::once(CSV_HEADER.join(","))
        .chain(
            cards
                .iter()
                .map(|c| [c.number.as_str(), c.expiry.as_str(), c.cvv.as_str()].join(",")),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// How a generated batch is shown to the user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Number on one line, expiry and CVV below it
    #[default]
    Table,
    /// Same lines as copy-all
    Pipe,
    /// Same document as the CSV export
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl DisplayFormat {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(Self::Table),
            "pipe" | "copy" => Some(Self::Pipe),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Render a batch in this format
    pub fn render(&self, cards: &[CardRecord]) -> Result<String> {
        Ok(match self {
            Self::Table => cards
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:>3}. {}\n     Exp: {} | CVV: {}", i + 1, c.number, c.expiry, c.cvv))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Pipe => copy_all(cards),
            Self::Csv => csv_document(cards),
            Self::Json => serde_json::to_string_pretty(cards)?,
        })
    }
}
