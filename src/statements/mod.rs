/*!
 * Statement recognition for EDL lines.
 *
 * Every non-blank line of an EDL is one statement. Recognition tries an
 * ordered list of recognizers and the first one whose identifier is present
 * in the line owns it. A recognizer that owns a line but cannot parse its
 * fields fails the line; the next recognizer is never consulted.
 *
 * # Architecture
 *
 * - `title`: `TITLE:` header
 * - `frame_code_mode`: `FCM:` drop/non-drop declaration
 * - `event`: clip edit records, transitions and the event model
 * - `effect`: `EFFECTS NAME IS` follow-on lines
 * - `timewarp`: `M2` motion memory follow-on lines
 * - `comment`: everything else, kept verbatim
 */

pub mod comment;
pub mod effect;
pub mod event;
pub mod frame_code_mode;
pub mod timewarp;
pub mod title;

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;

use crate::errors::{StatementError, StatementKind};
use crate::framerate::Framerate;

// Re-export main types
pub use comment::{Comment, CommentRecognizer};
pub use effect::{Effect, EffectRecognizer};
pub use event::{Event, EventOptions, EventRecognizer, Transition, TransitionKind};
pub use frame_code_mode::{FrameCodeMode, FrameCodeModeRecognizer};
pub use timewarp::{Timewarp, TimewarpRecognizer};
pub use title::{Title, TitleRecognizer, MAX_TITLE_LENGTH};

static DEFAULT_PARSER: Lazy<StatementParser> = Lazy::new(StatementParser::new);

/// Document state a line is interpreted in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseContext {
    /// Framerate timecodes are counted at
    pub framerate: Framerate,

    /// Set by a preceding `FCM: DROP FRAME`
    pub drop_frame: bool,
}

impl ParseContext {
    pub fn new(framerate: Framerate) -> Self {
        Self {
            framerate,
            drop_frame: false,
        }
    }
}

/// One parsed line of an EDL
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Title(Title),
    FrameCodeMode(FrameCodeMode),
    Event(Event),
    Effect(Effect),
    Timewarp(Timewarp),
    Comment(Comment),
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::Title(_) => StatementKind::Title,
            Self::FrameCodeMode(_) => StatementKind::FrameCodeMode,
            Self::Event(_) => StatementKind::Event,
            Self::Effect(_) => StatementKind::Effect,
            Self::Timewarp(_) => StatementKind::Timewarp,
            Self::Comment(_) => StatementKind::Comment,
        }
    }

    /// Original text, `None` for statements built in code
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Title(s) => s.raw(),
            Self::FrameCodeMode(s) => s.raw(),
            Self::Event(s) => s.raw(),
            Self::Effect(s) => s.raw(),
            Self::Timewarp(s) => s.raw(),
            Self::Comment(s) => Some(s.text()),
        }
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_event_mut(&mut self) -> Option<&mut Event> {
        match self {
            Self::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(s) => write!(f, "{}", s),
            Self::FrameCodeMode(s) => write!(f, "{}", s),
            Self::Event(s) => write!(f, "{}", s),
            Self::Effect(s) => write!(f, "{}", s),
            Self::Timewarp(s) => write!(f, "{}", s),
            Self::Comment(s) => write!(f, "{}", s),
        }
    }
}

/// A line-syntax recognizer for one statement kind
pub trait Recognizer: Send + Sync {
    /// Kind produced by this recognizer
    fn kind(&self) -> StatementKind;

    /// Structural match: the line carries this kind's identifier
    fn identifies(&self, line: &str) -> bool;

    /// Parse a line this recognizer identifies
    fn parse(&self, line: &str, context: &ParseContext) -> Result<Statement, StatementError>;
}

/// Ordered recognizer list; the first identifying recognizer wins
pub struct StatementParser {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl StatementParser {
    /// Parser with the standard priority order
    pub fn new() -> Self {
        Self::with_recognizers(vec![
            Box::new(TitleRecognizer),
            Box::new(FrameCodeModeRecognizer),
            Box::new(EffectRecognizer),
            Box::new(TimewarpRecognizer),
            Box::new(EventRecognizer),
            Box::new(CommentRecognizer),
        ])
    }

    /// Parser with a custom priority order
    pub fn with_recognizers(recognizers: Vec<Box<dyn Recognizer>>) -> Self {
        Self { recognizers }
    }

    /// Kinds in the order they are tried
    pub fn kinds(&self) -> Vec<StatementKind> {
        self.recognizers.iter().map(|r| r.kind()).collect()
    }

    /// Recognize a single newline-stripped, non-blank line
    pub fn recognize(&self, line: &str, context: &ParseContext) -> Result<Statement, StatementError> {
        let recognizer = self
            .recognizers
            .iter()
            .find(|r| r.identifies(line))
            .ok_or_else(|| StatementError::new(StatementKind::Comment, line, "no recognizer identifies the line"))?;

        debug!("Line identified as {}: {}", recognizer.kind(), line);
        recognizer.parse(line, context)
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Recognize a line with the standard parser
pub fn recognize(line: &str, context: &ParseContext) -> Result<Statement, StatementError> {
    DEFAULT_PARSER.recognize(line, context)
}
