/*!
 * Framerate designators for an EDL.
 *
 * A framerate is one of eight broadcast labels. Every input form (integer,
 * floating-point or text) is normalized to a canonical label string which is
 * then compared against the supported labels by exact string equality, so a
 * value that is only numerically close to a supported rate is rejected.
 */

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde_json::Value;

use crate::errors::{EdlError, Result};

/// Supported framerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framerate {
    Fps23_98,
    Fps24,
    Fps25,
    Fps29_97,
    Fps30,
    Fps50,
    Fps59_94,
    Fps60,
}

/// The closed set of input categories accepted by [`Framerate::parse`]
#[derive(Debug, Clone, PartialEq)]
pub enum FramerateInput<'a> {
    Integer(i64),
    Float(f64),
    Text(Cow<'a, str>),
}

impl From<i64> for FramerateInput<'_> {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FramerateInput<'_> {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FramerateInput<'_> {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FramerateInput<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a str> for FramerateInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for FramerateInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for FramerateInput<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl Framerate {
    /// Every supported framerate, NTSC non-drop first, then NTSC drop, then PAL
    pub const ALL: [Framerate; 8] = [
        Framerate::Fps24,
        Framerate::Fps30,
        Framerate::Fps60,
        Framerate::Fps23_98,
        Framerate::Fps29_97,
        Framerate::Fps59_94,
        Framerate::Fps25,
        Framerate::Fps50,
    ];

    /// Parse any integer, floating-point or text designator
    pub fn parse<'a>(value: impl Into<FramerateInput<'a>>) -> Result<Self> {
        let canonical = match value.into() {
            FramerateInput::Integer(i) => i.to_string(),
            FramerateInput::Float(f) => canonical_label(f),
            FramerateInput::Text(text) => {
                let parsed: f64 = text.trim().parse().map_err(|_| {
                    EdlError::UnsupportedFramerate(format!("{} (not a valid number)", text))
                })?;
                canonical_label(parsed)
            }
        };

        debug!("Normalized framerate designator to '{}'", canonical);

        Self::from_label(&canonical).ok_or(EdlError::UnsupportedFramerate(canonical))
    }

    /// Parse a JSON value; only numbers and strings are accepted
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::parse(i)
                } else if let Some(f) = n.as_f64() {
                    Self::parse(f)
                } else {
                    Err(EdlError::UnsupportedFramerate(n.to_string()))
                }
            }
            Value::String(s) => Self::parse(s.as_str()),
            other => Err(EdlError::InvalidType(format!(
                "Type {} not supported for fps",
                json_type_name(other)
            ))),
        }
    }

    /// Look up a canonical label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|rate| rate.label() == label)
    }

    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fps23_98 => "23.98",
            Self::Fps24 => "24",
            Self::Fps25 => "25",
            Self::Fps29_97 => "29.97",
            Self::Fps30 => "30",
            Self::Fps50 => "50",
            Self::Fps59_94 => "59.94",
            Self::Fps60 => "60",
        }
    }

    /// Numeric value of the label
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Fps23_98 => 23.98,
            Self::Fps24 => 24.0,
            Self::Fps25 => 25.0,
            Self::Fps29_97 => 29.97,
            Self::Fps30 => 30.0,
            Self::Fps50 => 50.0,
            Self::Fps59_94 => 59.94,
            Self::Fps60 => 60.0,
        }
    }

    /// Whole frames counted per timecode second
    pub fn timebase(&self) -> u32 {
        match self.non_drop_frame_rate() {
            Self::Fps24 => 24,
            Self::Fps25 => 25,
            Self::Fps30 => 30,
            Self::Fps50 => 50,
            _ => 60,
        }
    }

    /// Frame numbers skipped at the start of each non-tenth minute in
    /// drop-frame counting; zero where drop-frame timecode does not exist.
    pub fn dropped_frames_per_minute(&self) -> u32 {
        match self {
            Self::Fps29_97 => 2,
            Self::Fps59_94 => 4,
            _ => 0,
        }
    }

    pub fn is_pal(&self) -> bool {
        matches!(self, Self::Fps25 | Self::Fps50)
    }

    pub fn is_ntsc(&self) -> bool {
        self.is_ntsc_drop() || self.is_ntsc_non_drop()
    }

    fn is_ntsc_drop(&self) -> bool {
        matches!(self, Self::Fps23_98 | Self::Fps29_97 | Self::Fps59_94)
    }

    fn is_ntsc_non_drop(&self) -> bool {
        matches!(self, Self::Fps24 | Self::Fps30 | Self::Fps60)
    }

    /// Drop-frame equivalent. Identity for rates that are already drop or PAL.
    pub fn drop_frame_rate(&self) -> Self {
        match self {
            Self::Fps24 => Self::Fps23_98,
            Self::Fps30 => Self::Fps29_97,
            Self::Fps60 => Self::Fps59_94,
            other => *other,
        }
    }

    /// Non-drop-frame equivalent. Identity for rates that are already non-drop or PAL.
    pub fn non_drop_frame_rate(&self) -> Self {
        match self {
            Self::Fps23_98 => Self::Fps24,
            Self::Fps29_97 => Self::Fps30,
            Self::Fps59_94 => Self::Fps60,
            other => *other,
        }
    }
}

impl fmt::Display for Framerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Framerate {
    type Err = EdlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Whole numbers collapse to their integer form, everything else keeps its
/// shortest round-trip decimal digits.
fn canonical_label(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
