use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParseContext, Recognizer, Statement};
use crate::errors::{StatementError, StatementKind};

static FCM_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*FCM:").unwrap());

// @const: Mode text is case-sensitive, trailing whitespace is tolerated
static FCM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*FCM:\s*(?P<mode>(?:NON )?DROP FRAME)\s*$").unwrap());

/// A Frame Code Mode (FCM) statement as defined by the CMX standard.
///
/// Defaults to non-drop frame when built in code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameCodeMode {
    raw: Option<String>,
    is_drop_frame: bool,
}

impl FrameCodeMode {
    pub const IDENTIFIER: &'static str = "FCM:";
    pub const DROP_FRAME: &'static str = "DROP FRAME";
    pub const NON_DROP_FRAME: &'static str = "NON DROP FRAME";

    pub fn new(is_drop_frame: bool) -> Self {
        Self {
            raw: None,
            is_drop_frame,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, StatementError> {
        let caps = FCM_REGEX.captures(raw).ok_or_else(|| {
            StatementError::new(
                StatementKind::FrameCodeMode,
                raw,
                "expected 'FCM:' followed by 'DROP FRAME' or 'NON DROP FRAME'",
            )
        })?;

        Ok(Self {
            raw: Some(raw.to_string()),
            is_drop_frame: &caps["mode"] == Self::DROP_FRAME,
        })
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn is_drop_frame(&self) -> bool {
        self.is_drop_frame
    }

    pub fn set_drop_frame(&mut self, value: bool) {
        self.is_drop_frame = value;
    }

    fn field_text(&self) -> &'static str {
        if self.is_drop_frame {
            Self::DROP_FRAME
        } else {
            Self::NON_DROP_FRAME
        }
    }
}

impl fmt::Display for FrameCodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::IDENTIFIER, self.field_text())
    }
}

/// Recognizes `FCM:` lines
pub struct FrameCodeModeRecognizer;

impl Recognizer for FrameCodeModeRecognizer {
    fn kind(&self) -> StatementKind {
        StatementKind::FrameCodeMode
    }

    fn identifies(&self, line: &str) -> bool {
        FCM_IDENTIFIER.is_match(line)
    }

    fn parse(&self, line: &str, _context: &ParseContext) -> Result<Statement, StatementError> {
        FrameCodeMode::parse(line).map(Statement::FrameCodeMode)
    }
}
