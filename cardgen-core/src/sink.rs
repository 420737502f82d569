//! Outbound collaborators: notifications, clipboard, file downloads
//!
//! The session talks to the outside world only through these traits. The
//! in-memory implementations record what they receive and back the tests.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

/// A short message surfaced to the user after an action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }
}

pub trait NotificationSink {
    /// Clear any notices still on screen
    fn dismiss_all(&mut self);

    fn notify(&mut self, notice: Notice);
}

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub trait DownloadSink {
    /// Hand a finished file to the user
    fn download(&mut self, file_name: &str, mime_type: &str, contents: &str) -> Result<()>;
}

/// Keeps every notice; `dismiss_all` only clears the visible ones
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub visible: Vec<Notice>,
    pub history: Vec<Notice>,
    pub dismissals: usize,
}

impl NotificationSink for RecordingNotifier {
    fn dismiss_all(&mut self) {
        self.visible.clear();
        self.dismissals += 1;
    }

    fn notify(&mut self, notice: Notice) {
        self.visible.push(notice.clone());
        self.history.push(notice);
    }
}

/// Clipboard holding the last text written to it
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub writes: usize,
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// A file handed to a [`MemoryDownloads`] sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

#[derive(Debug, Default)]
pub struct MemoryDownloads {
    pub files: Vec<DownloadedFile>,
}

impl DownloadSink for MemoryDownloads {
    fn download(&mut self, file_name: &str, mime_type: &str, contents: &str) -> Result<()> {
        self.files.push(DownloadedFile {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            contents: contents.to_string(),
        });
        Ok(())
    }
}

/// Saves downloads into a directory, overwriting files of the same name
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn download(&mut self, file_name: &str, mime_type: &str, contents: &str) -> Result<()> {
        if file_name.contains(['/', '\\']) || file_name.is_empty() {
            return Err(Error::Export(format!("Refusing to write file named '{}'", file_name)));
        }
        if !self.dir.is_dir() {
            return Err(Error::Export(format!(
                "Export directory does not exist: {}",
                self.dir.display()
            )));
        }

        let path = self.dir.join(file_name);
        std::fs::write(&path, contents)?;
        info!("Wrote {} ({}, {} bytes)", path.display(), mime_type, contents.len());
        Ok(())
    }
}
