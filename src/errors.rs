/*!
 * Error types for the cmx-edl library.
 *
 * This module contains the error taxonomy used by every part of the crate,
 * using the thiserror crate for ergonomic error definitions:
 * - `EdlError`: value, type, parse and I/O failures raised by the library
 * - `StatementError`: a single raw line that failed its recognizer
 */

use std::fmt;

use thiserror::Error;

/// The statement kinds a line can be recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `TITLE:` header
    Title,
    /// `FCM:` frame code mode
    FrameCodeMode,
    /// Clip edit record
    Event,
    /// `EFFECTS NAME IS` follow-on line
    Effect,
    /// `M2` motion memory follow-on line
    Timewarp,
    /// Any other text
    Comment,
}

impl StatementKind {
    /// Human readable kind name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::FrameCodeMode => "FCM",
            Self::Event => "Event",
            Self::Effect => "Effect",
            Self::Timewarp => "Timewarp",
            Self::Comment => "Comment",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw line that matched a recognizer's identifier but not its pattern
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Statement is not a valid {kind} statement ({reason}):\n\t\"{raw}\"")]
pub struct StatementError {
    /// Recognizer that was attempted
    pub kind: StatementKind,

    /// Offending raw text
    pub raw: String,

    /// Where the structural match failed
    pub reason: String,
}

impl StatementError {
    pub fn new(kind: StatementKind, raw: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main library error type
#[derive(Error, Debug)]
pub enum EdlError {
    /// Wrong value category for a field
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// Right category, wrong content
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Framerate outside the supported set
    #[error("Framerate {0} is not supported")]
    UnsupportedFramerate(String),

    /// A line failed its recognizer
    #[error(transparent)]
    Statement(#[from] StatementError),

    /// A line of a document failed its recognizer
    #[error("Line {line}: {source}")]
    Parse {
        /// 1-based line number within the document
        line: usize,
        /// Underlying statement failure
        #[source]
        source: StatementError,
    },

    /// Timeline operation that has no implementation
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),
}

impl EdlError {
    /// The statement failure behind this error, if any
    pub fn statement_error(&self) -> Option<&StatementError> {
        match self {
            Self::Statement(e) | Self::Parse { source: e, .. } => Some(e),
            _ => None,
        }
    }

    /// True for the value-category failures (`InvalidValue`, `UnsupportedFramerate`)
    pub fn is_value_error(&self) -> bool {
        matches!(self, Self::InvalidValue(_) | Self::UnsupportedFramerate(_))
    }
}

impl From<std::io::Error> for EdlError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

/// Result alias used across the library
pub type Result<T, E = EdlError> = std::result::Result<T, E>;
