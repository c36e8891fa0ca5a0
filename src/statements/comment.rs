use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParseContext, Recognizer, Statement};
use crate::errors::{StatementError, StatementKind};

static CLIP_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\*\s*FROM CLIP NAME:\s*(?P<value>.*?)\s*$").unwrap());

static SOURCE_FILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\*\s*SOURCE FILE:\s*(?P<value>.*?)\s*$").unwrap());

/// A line no other recognizer owns, kept verbatim
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Value of a `* FROM CLIP NAME:` comment
pub fn clip_name(line: &str) -> Option<&str> {
    CLIP_NAME_REGEX
        .captures(line)
        .and_then(|caps| caps.name("value"))
        .map(|m| m.as_str())
}

/// Value of a `* SOURCE FILE:` comment
pub fn source_file(line: &str) -> Option<&str> {
    SOURCE_FILE_REGEX
        .captures(line)
        .and_then(|caps| caps.name("value"))
        .map(|m| m.as_str())
}

/// Catch-all recognizer; must be last in the priority order
pub struct CommentRecognizer;

impl Recognizer for CommentRecognizer {
    fn kind(&self) -> StatementKind {
        StatementKind::Comment
    }

    fn identifies(&self, _line: &str) -> bool {
        true
    }

    fn parse(&self, line: &str, _context: &ParseContext) -> Result<Statement, StatementError> {
        Ok(Statement::Comment(Comment::new(line)))
    }
}
