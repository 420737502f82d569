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

//! Cardgen - command-line front end for the test card generator
//!
//! Flags play the role of the form fields; the copy and export switches are
//! the action buttons. Generation always runs first, then the requested
//! actions in the order copy, copy-all, export.
//!
//! Card output goes to stdout, logs and notices to stderr.

use anyhow::{Context, Result};
use cardgen_core::{
    config::CardgenConfig,
    export::DisplayFormat,
    session::ExportOutcome,
    sink::{ClipboardSink, DirectoryDownloads, Notice, NoticeLevel, NotificationSink},
    GenerationInput, Session, VERSION,
};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "cardgen")]
#[command(about = "Generate Luhn-valid test card numbers", long_about = None)]
struct Args {
    /// Bank identification prefix, up to 6 digits (default: 4)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Expiry month (MM); random when omitted
    #[arg(short, long)]
    month: Option<String>,

    /// Expiry year (YY); random when omitted
    #[arg(short, long)]
    year: Option<String>,

    /// CVV (3-4 digits); random when omitted
    #[arg(long)]
    cvv: Option<String>,

    /// How many cards to generate (1-100)
    #[arg(short, long)]
    count: Option<String>,

    /// Display format (table, pipe, csv, json)
    #[arg(short, long, default_value = "table", value_parser = parse_format)]
    format: DisplayFormat,

    /// Copy the card at this position (1-based)
    #[arg(long, value_name = "INDEX")]
    copy: Option<usize>,

    /// Copy all generated cards
    #[arg(long)]
    copy_all: bool,

    /// Export the batch to CSV
    #[arg(short, long)]
    export: bool,

    /// Directory for the CSV export (overrides CARDGEN_EXPORT_DIR)
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn parse_format(s: &str) -> std::result::Result<DisplayFormat, String> {
    DisplayFormat::parse(s).ok_or_else(|| format!("unknown format '{}'", s))
}

/// Surfaces notices through the log
struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn dismiss_all(&mut self) {
        debug!("Dismissing notices");
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => info!("{}", notice.message),
            NoticeLevel::Warning => warn!("{}", notice.message),
        }
    }
}

/// Terminal stand-in for the system clipboard: prints what would be copied
struct TerminalClipboard<W: Write> {
    out: W,
}

impl<W: Write> ClipboardSink for TerminalClipboard<W> {
    fn write_text(&mut self, text: &str) -> cardgen_core::Result<()> {
        writeln!(self.out, "--- clipboard ---")?;
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}

fn build_input(args: &Args, config: &CardgenConfig) -> GenerationInput {
    GenerationInput {
        prefix: args.prefix.clone(),
        month: args.month.clone(),
        year: args.year.clone(),
        cvv: args.cvv.clone(),
        count: Some(
            args.count
                .clone()
                .unwrap_or_else(|| config.default_count.to_string()),
        ),
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let log_level = log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let builder = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: Args, config: CardgenConfig) -> Result<()> {
    let export_dir = args.export_dir.clone().unwrap_or_else(|| config.export_dir.clone());
    let input = build_input(&args, &config);

    let mut session = Session::new(
        LogNotifier,
        TerminalClipboard { out: std::io::stdout() },
        DirectoryDownloads::new(&export_dir),
    )
    .with_export_file_name(config.export_file_name.clone());

    let cards = match session.generate(input) {
        Ok(cards) => cards,
        Err(e) if e.is_user_error() => {
            error!("{}", e);
            std::process::exit(2);
        }
        Err(e) => return Err(e).context("Failed to generate cards"),
    };
    let rendered = args.format.render(cards)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    stdout.flush()?;
    drop(stdout);

    if let Some(position) = args.copy {
        let index = position
            .checked_sub(1)
            .context("Card positions start at 1")?;
        session.copy_one(index)?;
    }

    if args.copy_all {
        session.copy_all()?;
    }

    if args.export {
        match session.export_csv()? {
            ExportOutcome::Exported { rows } => info!(
                "Saved {} rows to {}",
                rows,
                export_dir.join(&config.export_file_name).display()
            ),
            ExportOutcome::Empty => {}
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config =
        CardgenConfig::from_env().context("Failed to load configuration from environment")?;

    init_tracing(&args.log_level, config.log_json);
    info!("Cardgen v{}", VERSION);

    run(args, config)
}
