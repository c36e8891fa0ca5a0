use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParseContext, Recognizer, Statement};
use crate::errors::{EdlError, StatementError, StatementKind};

// @module: TITLE statement

/// Longest title the CMX format allows
pub const MAX_TITLE_LENGTH: usize = 70;

static TITLE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*TITLE:").unwrap());

// @const: One optional space after the identifier, the rest is the title verbatim
static TITLE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*TITLE:\s?(?P<title>.+)$").unwrap());

/// A Title statement as defined by the CMX standard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    raw: Option<String>,
    title: Option<String>,
}

impl Title {
    pub const IDENTIFIER: &'static str = "TITLE:";

    /// Empty title statement
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `TITLE:` line. Text read from a file is taken as
    /// authoritative, so the length ceiling is not applied here.
    pub fn parse(raw: &str) -> Result<Self, StatementError> {
        let caps = TITLE_REGEX
            .captures(raw)
            .ok_or_else(|| StatementError::new(StatementKind::Title, raw, "expected 'TITLE:' followed by the title text"))?;

        Ok(Self {
            raw: Some(raw.to_string()),
            title: Some(caps["title"].to_string()),
        })
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Assign a title, enforcing the CMX length ceiling
    pub fn set_title(&mut self, value: &str) -> Result<(), EdlError> {
        validate_title(value)?;
        self.title = Some(value.to_string());
        Ok(())
    }
}

/// Check a title against the CMX length ceiling
pub fn validate_title(value: &str) -> Result<(), EdlError> {
    let length = value.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(EdlError::InvalidValue(format!(
            "Title length must be no more than {} characters, got {}",
            MAX_TITLE_LENGTH, length
        )));
    }
    Ok(())
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::IDENTIFIER, self.title.as_deref().unwrap_or(""))
    }
}

/// Recognizes `TITLE:` lines
pub struct TitleRecognizer;

impl Recognizer for TitleRecognizer {
    fn kind(&self) -> StatementKind {
        StatementKind::Title
    }

    fn identifies(&self, line: &str) -> bool {
        TITLE_IDENTIFIER.is_match(line)
    }

    fn parse(&self, line: &str, _context: &ParseContext) -> Result<Statement, StatementError> {
        Title::parse(line).map(Statement::Title)
    }
}
