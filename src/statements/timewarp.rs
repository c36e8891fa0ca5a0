use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ParseContext, Recognizer, Statement};
use crate::errors::{StatementError, StatementKind};
use crate::framerate::Framerate;
use crate::timecode::Timecode;

// @module: M2 motion memory (timewarp) lines

static TIMEWARP_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*M2\s").unwrap());

static TIMEWARP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*M2\s+(?P<reel>\S+)\s+(?P<speed>[-+]?\d+(?:\.\d+)?)\s+(?P<trigger>\S+)\s*$").unwrap()
});

/// Speed change attached to an event
#[derive(Debug, Clone, PartialEq)]
pub struct Timewarp {
    raw: Option<String>,

    // @field: Source reel the speed applies to
    pub reel: String,

    // @field: Playback speed in frames per second, negative when reversed
    pub speed: f64,

    // @field: Source timecode the speed change starts at
    pub trigger: Timecode,

    framerate: Framerate,
}

impl Timewarp {
    pub const IDENTIFIER: &'static str = "M2";

    pub fn new(reel: &str, speed: f64, trigger: Timecode, framerate: Framerate) -> Self {
        Self {
            raw: None,
            reel: reel.to_string(),
            speed,
            trigger,
            framerate,
        }
    }

    pub fn parse(raw: &str, context: &ParseContext) -> Result<Self, StatementError> {
        let caps = TIMEWARP_REGEX
            .captures(raw)
            .ok_or_else(|| StatementError::new(StatementKind::Timewarp, raw, "expected 'M2 <reel> <speed> <timecode>'"))?;

        let speed: f64 = caps["speed"]
            .parse()
            .map_err(|_| StatementError::new(StatementKind::Timewarp, raw, "speed is not a number"))?;
        let trigger = Timecode::parse(&caps["trigger"], context.framerate, context.drop_frame)
            .map_err(|e| StatementError::new(StatementKind::Timewarp, raw, e.to_string()))?;

        Ok(Self {
            raw: Some(raw.to_string()),
            reel: caps["reel"].to_string(),
            speed,
            trigger,
            framerate: context.framerate,
        })
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn reverse(&self) -> bool {
        self.speed < 0.0
    }

    /// Playback speed relative to normal, 1.0 is real time
    pub fn speed_factor(&self) -> f64 {
        self.speed / self.framerate.as_f64()
    }

    // Shortest digits that parse back to the same speed, integer part padded to three
    fn speed_text(&self) -> String {
        let mut digits = self.speed.abs().to_string();
        if !digits.contains('.') {
            digits.push_str(".0");
        }
        let integer_width = digits.find('.').unwrap_or(digits.len());
        let padding = "0".repeat(3usize.saturating_sub(integer_width));

        if self.speed < 0.0 {
            format!("-{}{}", padding, digits)
        } else {
            format!("{}{}", padding, digits)
        }
    }
}

impl fmt::Display for Timewarp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}   {:<8} {:<6}                     {}",
            Self::IDENTIFIER,
            self.reel,
            self.speed_text(),
            self.trigger
        )
    }
}

/// Recognizes `M2` lines
pub struct TimewarpRecognizer;

impl Recognizer for TimewarpRecognizer {
    fn kind(&self) -> StatementKind {
        StatementKind::Timewarp
    }

    fn identifies(&self, line: &str) -> bool {
        TIMEWARP_IDENTIFIER.is_match(line)
    }

    fn parse(&self, line: &str, context: &ParseContext) -> Result<Statement, StatementError> {
        Timewarp::parse(line, context).map(Statement::Timewarp)
    }
}
