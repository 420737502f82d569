// SPDX-License-Identifier: MIT
//
// Cardgen: Luhn-Valid Test Card Generator
// Copyright (c) 2025 Valer Bocan, PhD, CSSLP
// Email: valer.bocan@upt.ro
//
// Department of Computer and Information Technology
// Politehnica University of Timisoara
//
// https://github.com/vbocan/qrng-data-diode

//! Generator session
//!
//! Holds the state a form-based front end works on: the last submitted input
//! and the current batch. Each action runs to completion, replaces the batch
//! wholesale when it generates, and reports back through the sinks.

use crate::{
    batch,
    export::{self, CSV_MIME_TYPE, EXPORT_FILE_NAME},
    generator::CardRecord,
    input::GenerationInput,
    sink::{ClipboardSink, DownloadSink, Notice, NotificationSink},
    Error, Result, CARD_LENGTH,
};
use chrono::Datelike;
use rand::Rng;
use tracing::{info, warn};

/// What an export request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File handed to the download sink
    Exported { rows: usize },
    /// Nothing to export; no file produced
    Empty,
}

pub struct Session<N, C, D> {
    input: GenerationInput,
    cards: Vec<CardRecord>,
    export_file_name: String,
    notifier: N,
    clipboard: C,
    downloads: D,
}

impl<N, C, D> Session<N, C, D>
where
    N: NotificationSink,
    C: ClipboardSink,
    D: DownloadSink,
{
    pub fn new(notifier: N, clipboard: C, downloads: D) -> Self {
        Self {
            input: GenerationInput::default(),
            cards: Vec::new(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            notifier,
            clipboard,
            downloads,
        }
    }

    /// Use a different file name for CSV exports
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    pub fn input(&self) -> &GenerationInput {
        &self.input
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn downloads(&self) -> &D {
        &self.downloads
    }

    /// Generate a batch using the thread RNG and today's date
    pub fn generate(&mut self, input: GenerationInput) -> Result<&[CardRecord]> {
        let year = chrono::Local::now().year();
        self.generate_with(input, year, &mut rand::thread_rng())
    }

    /// Generate a batch with an explicit random source and current year.
    ///
    /// On invalid input the previous batch is left untouched.
    pub fn generate_with<R: Rng + ?Sized>(
        &mut self,
        input: GenerationInput,
        current_year: i32,
        rng: &mut R,
    ) -> Result<&[CardRecord]> {
        self.notifier.dismiss_all();

        let template = input.template()?;
        let count = input.count();
        let report = batch::assemble(&template, count, CARD_LENGTH, current_year, rng)?;

        self.input = input;
        self.cards = report.cards;
        self.notifier
            .notify(Notice::success(format!("Generated {} valid cards!", count)));

        Ok(&self.cards)
    }

    /// Copy the card at `index` (0-based) as a `NUMBER|MM|20YY|CVV` line
    pub fn copy_one(&mut self, index: usize) -> Result<()> {
        self.notifier.dismiss_all();

        let card = self.cards.get(index).ok_or_else(|| {
            Error::Export(format!(
                "No card at position {} (batch holds {})",
                index + 1,
                self.cards.len()
            ))
        })?;
        self.clipboard.write_text(&export::copy_line(card))?;
        self.notifier.notify(Notice::info("Card copied!"));
        Ok(())
    }

    /// Copy the whole batch, one line per card
    pub fn copy_all(&mut self) -> Result<()> {
        self.notifier.dismiss_all();

        self.clipboard.write_text(&export::copy_all(&self.cards))?;
        info!("Copied {} cards to clipboard", self.cards.len());
        self.notifier.notify(Notice::success("All cards copied!"));
        Ok(())
    }

    /// Export the batch as CSV; an empty batch only raises a warning
    pub fn export_csv(&mut self) -> Result<ExportOutcome> {
        self.notifier.dismiss_all();

        if self.cards.is_empty() {
            warn!("Export requested with no generated cards");
            self.notifier.notify(Notice::warning("No cards to export!"));
            return Ok(ExportOutcome::Empty);
        }

        let document = export::csv_document(&self.cards);
        self.downloads
            .download(&self.export_file_name, CSV_MIME_TYPE, &document)?;
        info!("Exported {} cards to {}", self.cards.len(), self.export_file_name);
        self.notifier.notify(Notice::success("Exported to CSV!"));

        Ok(ExportOutcome::Exported { rows: self.cards.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luhn;
    use crate::sink::{MemoryClipboard, MemoryDownloads, NoticeLevel, RecordingNotifier};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestSession = Session<RecordingNotifier, MemoryClipboard, MemoryDownloads>;

    fn session() -> TestSession {
        Session::new(
            RecordingNotifier::default(),
            MemoryClipboard::default(),
            MemoryDownloads::default(),
        )
    }

    fn fixed_input() -> GenerationInput {
        GenerationInput::default()
            .with_month("12")
            .with_year("25")
            .with_cvv("123")
    }

    #[test]
    fn test_generate_default_count() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(1);
        s.generate_with(GenerationInput::default(), 2025, &mut rng).unwrap();

        assert_eq!(s.cards().len(), 10);
        assert!(s.cards().iter().all(|c| luhn::is_valid(&c.number) && c.number.starts_with('4')));
        assert_eq!(s.notifier().visible, vec![Notice::success("Generated 10 valid cards!")]);
    }

    #[test]
    fn test_generate_replaces_batch() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(2);
        s.generate_with(GenerationInput::default().with_count("5"), 2025, &mut rng).unwrap();
        s.generate_with(GenerationInput::default().with_count("2"), 2025, &mut rng).unwrap();

        assert_eq!(s.cards().len(), 2);
        assert_eq!(s.input().count.as_deref(), Some("2"));
        assert_eq!(s.notifier().visible.len(), 1);
        assert_eq!(s.notifier().dismissals, 2);
    }

    #[test]
    fn test_generate_clamps_count_in_notice() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(3);
        s.generate_with(GenerationInput::default().with_count("500"), 2025, &mut rng).unwrap();

        assert_eq!(s.cards().len(), 100);
        assert_eq!(s.notifier().visible[0].message, "Generated 100 valid cards!");
    }

    #[test]
    fn test_invalid_input_keeps_previous_batch() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(4);
        s.generate_with(GenerationInput::default().with_count("3"), 2025, &mut rng).unwrap();
        let before = s.cards().to_vec();

        let err = s
            .generate_with(GenerationInput::default().with_month("13"), 2025, &mut rng)
            .unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(s.cards(), before.as_slice());
    }

    #[test]
    fn test_copy_one() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(5);
        s.generate_with(fixed_input().with_count("2"), 2025, &mut rng).unwrap();
        s.copy_one(1).unwrap();

        let expected = format!("{}|12|2025|123", s.cards()[1].number);
        assert_eq!(s.clipboard().contents.as_deref(), Some(expected.as_str()));
        assert_eq!(s.notifier().visible, vec![Notice::info("Card copied!")]);
    }

    #[test]
    fn test_copy_one_out_of_range() {
        let mut s = session();
        assert!(s.copy_one(0).is_err());
        assert_eq!(s.clipboard().writes, 0);
    }

    #[test]
    fn test_copy_all() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(6);
        s.generate_with(fixed_input().with_count("3"), 2025, &mut rng).unwrap();
        s.copy_all().unwrap();

        let text = s.clipboard().contents.clone().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for (line, card) in lines.iter().zip(s.cards()) {
            assert_eq!(*line, format!("{}|12|2025|123", card.number));
        }
        assert_eq!(s.notifier().visible, vec![Notice::success("All cards copied!")]);
    }

    #[test]
    fn test_export_empty_batch_warns() {
        let mut s = session();
        let outcome = s.export_csv().unwrap();

        assert_eq!(outcome, ExportOutcome::Empty);
        assert!(s.downloads().files.is_empty());
        assert_eq!(s.notifier().visible.len(), 1);
        assert_eq!(s.notifier().visible[0].level, NoticeLevel::Warning);
        assert_eq!(s.notifier().visible[0].message, "No cards to export!");
    }

    #[test]
    fn test_export_csv() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(7);
        s.generate_with(fixed_input().with_count("2"), 2025, &mut rng).unwrap();
        let outcome = s.export_csv().unwrap();

        assert_eq!(outcome, ExportOutcome::Exported { rows: 2 });
        let file = &s.downloads().files[0];
        assert_eq!(file.file_name, "cards_export.csv");
        assert_eq!(file.mime_type, "text/csv");
        let expected = format!(
            "Card Number,Expiry,CVV\n{},12/25,123\n{},12/25,123",
            s.cards()[0].number,
            s.cards()[1].number
        );
        assert_eq!(file.contents, expected);
        assert_eq!(s.notifier().visible, vec![Notice::success("Exported to CSV!")]);
    }

    #[test]
    fn test_custom_export_file_name() {
        let mut s = session().with_export_file_name("batch.csv");
        let mut rng = StdRng::seed_from_u64(8);
        s.generate_with(GenerationInput::default().with_count("1"), 2025, &mut rng).unwrap();
        s.export_csv().unwrap();
        assert_eq!(s.downloads().files[0].file_name, "batch.csv");
    }

    #[test]
    fn test_generate_uses_current_year() {
        let mut s = session();
        s.generate(GenerationInput::default().with_count("20")).unwrap();

        let year = chrono::Local::now().year();
        let allowed: Vec<String> = (1..=5).map(|o| format!("{:02}", (year + o) % 100)).collect();
        assert!(s.cards().iter().all(|c| allowed.iter().any(|y| y == c.expiry_year())));
    }
}
