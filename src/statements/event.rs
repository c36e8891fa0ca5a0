/*!
 * Clip edit records.
 *
 * An event line carries the edit number, reel, track, transition code,
 * an optional aux field (the transition duration in frames when the
 * transition is not a cut) and four timecodes. Effect names, comments and
 * timewarps that follow an event line are folded into the event.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::comment;
use super::timewarp::Timewarp;
use super::{ParseContext, Recognizer, Statement};
use crate::errors::{EdlError, Result, StatementError, StatementKind};
use crate::timecode::Timecode;

/// Reel name of black slug
pub const BLACK_REEL: &str = "BL";

// @const: a leading event number and at least one timecode token
static EVENT_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s.*\d{1,2}[:.]\d{2}[:.]\d{2}[:;.,]\d{2}").unwrap());

// @const: num reel track transition [aux] src-in src-out rec-in rec-out
static EVENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    let tc = r"\d{1,2}[:.]\d{2}[:.]\d{2}[:;.,]\d{2}";
    Regex::new(&format!(
        r"^\s*(?P<num>\d+)\s+(?P<reel>\S+)\s+(?P<track>\S+)\s+(?P<tr_code>K\s+[BO]|\S+)(?:\s+(?P<aux>\S+))?\s+(?P<src_start>{tc})\s+(?P<src_end>{tc})\s+(?P<rec_start>{tc})\s+(?P<rec_end>{tc})\s*$",
        tc = tc
    ))
    .unwrap()
});

/// Transition type named by the transition code field
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionKind {
    /// `C`
    Cut,
    /// `D`
    Dissolve,
    /// `W` followed by the wipe pattern number
    Wipe(String),
    /// `K`, `KB`, `KO` and spaced variants
    Key(String),
    /// Anything else, kept as written
    Other(String),
}

/// Incoming transition of an event
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,

    // @field: Name from an `EFFECTS NAME IS` line
    pub effect: Option<String>,
}

impl Transition {
    pub fn cut() -> Self {
        Self {
            kind: TransitionKind::Cut,
            effect: None,
        }
    }

    /// Classify a transition code
    pub fn from_code(code: &str) -> Self {
        let kind = match code {
            "C" => TransitionKind::Cut,
            "D" => TransitionKind::Dissolve,
            c if c.starts_with('W') => TransitionKind::Wipe(c.to_string()),
            c if c.starts_with('K') => TransitionKind::Key(c.to_string()),
            c => TransitionKind::Other(c.to_string()),
        };
        Self { kind, effect: None }
    }

    pub fn with_effect(mut self, name: &str) -> Self {
        self.effect = Some(name.to_string());
        self
    }

    pub fn is_cut(&self) -> bool {
        self.kind == TransitionKind::Cut
    }

    /// Transition code as written in the event line
    pub fn code(&self) -> &str {
        match &self.kind {
            TransitionKind::Cut => "C",
            TransitionKind::Dissolve => "D",
            TransitionKind::Wipe(code) | TransitionKind::Key(code) | TransitionKind::Other(code) => code,
        }
    }
}

/// Explicit field set for building an event in code.
///
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventOptions {
    pub num: String,
    pub reel: String,
    pub track: String,
    // @field: Transition code, a cut when absent
    pub tr_code: Option<String>,
    pub aux: Option<String>,
    pub src_start_tc: String,
    pub src_end_tc: String,
    pub rec_start_tc: String,
    pub rec_end_tc: String,
    pub effect: Option<String>,
    pub comments: Vec<String>,
}

/// Represents an edit event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    raw: Option<String>,

    // @field: Edit number as written, e.g. "001"
    pub num: String,

    // @field: Source reel, "BL" for black
    pub reel: String,

    // @field: Track designator, e.g. V, A, A2, B
    pub track: String,

    // @field: Incoming transition, set for every parsed or built event
    pub transition: Option<Transition>,

    // @field: Transition duration in frames when the transition is not a cut
    pub aux: Option<String>,

    pub src_start_tc: Timecode,
    pub src_end_tc: Timecode,
    pub rec_start_tc: Timecode,
    pub rec_end_tc: Timecode,

    // @field: Speed change from an M2 line
    pub timewarp: Option<Timewarp>,

    // @field: Follow-on lines kept verbatim
    pub comments: Vec<String>,
}

impl Event {
    /// Parse an event line
    pub fn parse(raw: &str, context: &ParseContext) -> std::result::Result<Self, StatementError> {
        let caps = EVENT_REGEX.captures(raw).ok_or_else(|| {
            StatementError::new(
                StatementKind::Event,
                raw,
                "expected '<num> <reel> <track> <transition> [aux] <src in> <src out> <rec in> <rec out>'",
            )
        })?;

        let timecode = |name: &str| {
            Timecode::parse(&caps[name], context.framerate, context.drop_frame)
                .map_err(|e| StatementError::new(StatementKind::Event, raw, format!("{}: {}", name, e)))
        };

        let event = Event {
            raw: Some(raw.to_string()),
            num: caps["num"].to_string(),
            reel: caps["reel"].to_string(),
            track: caps["track"].to_string(),
            transition: Some(Transition::from_code(&caps["tr_code"])),
            aux: caps.name("aux").map(|m| m.as_str().to_string()),
            src_start_tc: timecode("src_start")?,
            src_end_tc: timecode("src_end")?,
            rec_start_tc: timecode("rec_start")?,
            rec_end_tc: timecode("rec_end")?,
            timewarp: None,
            comments: Vec::new(),
        };

        event
            .check_ranges()
            .map_err(|reason| StatementError::new(StatementKind::Event, raw, reason))?;

        Ok(event)
    }

    /// Build an event from an explicit field set
    pub fn from_options(options: EventOptions, context: &ParseContext) -> Result<Self> {
        let timecode = |text: &str| Timecode::parse(text, context.framerate, context.drop_frame);

        let transition = options.tr_code.as_deref().map_or_else(Transition::cut, Transition::from_code);
        let transition = Some(match &options.effect {
            Some(name) => transition.with_effect(name),
            None => transition,
        });

        let event = Event {
            raw: None,
            src_start_tc: timecode(&options.src_start_tc)?,
            src_end_tc: timecode(&options.src_end_tc)?,
            rec_start_tc: timecode(&options.rec_start_tc)?,
            rec_end_tc: timecode(&options.rec_end_tc)?,
            num: options.num,
            reel: options.reel,
            track: options.track,
            transition,
            aux: options.aux,
            timewarp: None,
            comments: options.comments,
        };

        event.check_ranges().map_err(EdlError::InvalidValue)?;
        Ok(event)
    }

    /// Build an event from a JSON object of [`EventOptions`] fields
    pub fn from_json(value: Value, context: &ParseContext) -> Result<Self> {
        let options: EventOptions = serde_json::from_value(value)
            .map_err(|e| EdlError::InvalidValue(format!("Invalid event options: {}", e)))?;
        Self::from_options(options, context)
    }

    fn check_ranges(&self) -> std::result::Result<(), String> {
        if self.src_end_tc < self.src_start_tc {
            return Err(format!(
                "source out {} is before source in {}",
                self.src_end_tc, self.src_start_tc
            ));
        }
        if self.rec_end_tc < self.rec_start_tc {
            return Err(format!(
                "record out {} is before record in {}",
                self.rec_end_tc, self.rec_start_tc
            ));
        }
        Ok(())
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn event_number(&self) -> &str {
        &self.num
    }

    pub fn get_reel(&self) -> &str {
        &self.reel
    }

    pub fn get_track(&self) -> &str {
        &self.track
    }

    pub fn get_aux(&self) -> Option<&str> {
        self.aux.as_deref()
    }

    /// Transition code, empty when no transition is set
    pub fn get_tr_code(&self) -> &str {
        self.transition.as_ref().map_or("", |t| t.code())
    }

    pub fn get_comments(&self) -> &[String] {
        &self.comments
    }

    /// Clip name from a `* FROM CLIP NAME:` comment
    pub fn clip_name(&self) -> Option<&str> {
        self.comments.iter().find_map(|line| comment::clip_name(line))
    }

    /// Source file from a `* SOURCE FILE:` comment
    pub fn source_file(&self) -> Option<&str> {
        self.comments.iter().find_map(|line| comment::source_file(line))
    }

    /// Record length in frames before transition
    pub fn rec_length(&self) -> u64 {
        self.rec_end_tc.frames.saturating_sub(self.rec_start_tc.frames)
    }

    /// Source length in frames before transition
    pub fn src_length(&self) -> u64 {
        self.src_end_tc.frames.saturating_sub(self.src_start_tc.frames)
    }

    /// True if the event has a transition that is not a cut
    pub fn has_transition(&self) -> bool {
        self.transition.as_ref().is_some_and(|t| !t.is_cut())
    }

    /// Incoming transition duration in frames, 0 without a transition.
    ///
    /// Fails when the aux field is not a frame count.
    pub fn incoming_transition_duration(&self) -> Result<u64> {
        if !self.has_transition() {
            return Ok(0);
        }

        let aux = self.aux.as_deref().unwrap_or("").trim();
        aux.parse::<u64>().map_err(|_| {
            EdlError::InvalidValue(format!(
                "Event {} has a {} transition but aux '{}' is not a frame count",
                self.num,
                self.get_tr_code(),
                aux
            ))
        })
    }

    /// True if a timewarp is attached
    pub fn has_timewarp(&self) -> bool {
        self.timewarp.is_some()
    }

    /// True if the clip plays reversed
    pub fn reverse(&self) -> bool {
        self.timewarp.as_ref().is_some_and(|t| t.reverse())
    }

    /// Speed relative to normal playback
    pub fn speed(&self) -> f64 {
        self.timewarp.as_ref().map_or(1.0, |t| t.speed_factor())
    }

    /// True if the event is black slug
    pub fn black(&self) -> bool {
        self.reel == BLACK_REEL
    }

    pub fn capture_from_tc(&self) -> Result<Timecode> {
        Err(EdlError::Unsupported("capture-from timecode"))
    }

    pub fn capture_to_tc(&self) -> Result<Timecode> {
        Err(EdlError::Unsupported("capture-to timecode"))
    }

    pub fn capture_to_and_including_tc(&self) -> Result<Timecode> {
        Err(EdlError::Unsupported("capture-to-and-including timecode"))
    }

    pub fn generator(&self) -> Result<bool> {
        Err(EdlError::Unsupported("generator detection"))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} {:<32} {:<5} {:<3} {:<4} {} {} {} {}",
            self.num,
            self.reel,
            self.track,
            self.get_tr_code(),
            self.aux.as_deref().unwrap_or(""),
            self.src_start_tc,
            self.src_end_tc,
            self.rec_start_tc,
            self.rec_end_tc
        )?;

        if let Some(transition) = self.transition.as_ref().filter(|t| !t.is_cut()) {
            if let Some(name) = &transition.effect {
                write!(f, "\nEFFECTS NAME IS {}", name)?;
            }
        }

        for line in &self.comments {
            write!(f, "\n{}", line)?;
        }

        if let Some(timewarp) = &self.timewarp {
            write!(f, "\n{}", timewarp)?;
        }

        Ok(())
    }
}

/// Recognizes event lines by their leading edit number
pub struct EventRecognizer;

impl Recognizer for EventRecognizer {
    fn kind(&self) -> StatementKind {
        StatementKind::Event
    }

    fn identifies(&self, line: &str) -> bool {
        EVENT_IDENTIFIER.is_match(line)
    }

    fn parse(&self, line: &str, context: &ParseContext) -> std::result::Result<Statement, StatementError> {
        Event::parse(line, context).map(Statement::Event)
    }
}
