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

//! Cardgen Core Library
//!
//! Generates synthetic, Luhn-valid card numbers for testing payment forms and
//! pipelines. Nothing produced here is a usable payment credential; issuer
//! ranges are not checked beyond the prefix the user supplies.
//!
//! # Architecture
//!
//! - `luhn`: checksum validation and check-digit computation
//! - `generator`: card numbers and complete card records
//! - `input`: form fields, defaults and count clamping
//! - `batch`: retry-until-valid batch assembly
//! - `export`: clipboard lines, CSV document, display formats
//! - `sink`: notification, clipboard and download collaborators
//! - `session`: the state object the user actions operate on
//! - `config`: environment-driven configuration
//! - `error`: unified error types

pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod input;
pub mod luhn;
pub mod session;
pub mod sink;

pub use error::{Error, Result};
pub use generator::CardRecord;
pub use input::GenerationInput;
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Digits in every generated card number
pub const CARD_LENGTH: usize = 16;

/// Prefix used when none is given (Visa-like)
pub const DEFAULT_PREFIX: &str = "4";

/// Longest prefix the form accepts
pub const MAX_PREFIX_LEN: usize = 6;

/// Batch size when the count is missing or not a number
pub const DEFAULT_COUNT: usize = 10;

pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 100;

pub use export::EXPORT_FILE_NAME;
