use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParseContext, Recognizer, Statement};
use crate::errors::{StatementError, StatementKind};

static EFFECT_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*EFFECTS NAME IS\b").unwrap());

static EFFECT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*EFFECTS NAME IS\s+(?P<name>\S.*?)\s*$").unwrap());

/// Names the transition effect of the event it follows
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    raw: Option<String>,
    name: String,
}

impl Effect {
    pub const IDENTIFIER: &'static str = "EFFECTS NAME IS";

    pub fn new(name: &str) -> Self {
        Self {
            raw: None,
            name: name.to_string(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, StatementError> {
        let caps = EFFECT_REGEX
            .captures(raw)
            .ok_or_else(|| StatementError::new(StatementKind::Effect, raw, "missing effect name"))?;

        Ok(Self {
            raw: Some(raw.to_string()),
            name: caps["name"].to_string(),
        })
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::IDENTIFIER, self.name)
    }
}

/// Recognizes `EFFECTS NAME IS` lines
pub struct EffectRecognizer;

impl Recognizer for EffectRecognizer {
    fn kind(&self) -> StatementKind {
        StatementKind::Effect
    }

    fn identifies(&self, line: &str) -> bool {
        EFFECT_IDENTIFIER.is_match(line)
    }

    fn parse(&self, line: &str, _context: &ParseContext) -> Result<Statement, StatementError> {
        Effect::parse(line).map(Statement::Effect)
    }
}
