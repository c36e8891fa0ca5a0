use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{EdlError, Result};
use crate::framerate::Framerate;

// @module: SMPTE timecode values

// @const: HH:MM:SS:FF with ':' ';' or '.' before the frames field
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[:.](\d{2})[:.](\d{2})([:;.,])(\d{2})$").unwrap()
});

/// A timecode bound to the framerate it was counted at.
///
/// Ordering and equality only consider the absolute frame count.
#[derive(Debug, Clone)]
pub struct Timecode {
    // @field: Absolute frame number from 00:00:00:00
    pub frames: u64,

    // @field: Counted with drop-frame numbering
    pub drop_frame: bool,

    hours: u32,
    minutes: u32,
    seconds: u32,
    frame: u32,
    separator: char,
}

impl Timecode {
    /// Parse a timecode. `drop_frame` requests drop-frame counting even for a
    /// `:` separator; a `;` or `,` separator always requests it.
    pub fn parse(text: &str, framerate: Framerate, drop_frame: bool) -> Result<Self> {
        let caps = TIMECODE_REGEX
            .captures(text.trim())
            .ok_or_else(|| EdlError::InvalidValue(format!("Invalid timecode format: {}", text)))?;

        let field = |i: usize| -> Result<u32> {
            caps[i]
                .parse()
                .map_err(|_| EdlError::InvalidValue(format!("Invalid timecode field in {}", text)))
        };
        let hours = field(1)?;
        let minutes = field(2)?;
        let seconds = field(3)?;
        let frame = field(5)?;
        let separator = caps[4].chars().next().unwrap_or(':');

        let wants_drop = drop_frame || matches!(separator, ';' | ',');
        let drop_frame = wants_drop && framerate.dropped_frames_per_minute() > 0;
        if wants_drop && !drop_frame {
            log::warn!(
                "Drop-frame timecode {} at {} fps has no drop-frame counting, reading it as non-drop",
                text,
                framerate
            );
        }

        let timebase = framerate.timebase();
        if minutes >= 60 || seconds >= 60 || frame >= timebase {
            return Err(EdlError::InvalidValue(format!(
                "Invalid time components in timecode {} at {} fps",
                text, framerate
            )));
        }

        let dropped = framerate.dropped_frames_per_minute();
        if drop_frame && seconds == 0 && minutes % 10 != 0 && frame < dropped {
            return Err(EdlError::InvalidValue(format!(
                "Timecode {} does not exist in drop-frame counting",
                text
            )));
        }

        let total_minutes = u64::from(hours * 60 + minutes);
        let mut frames = (u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds))
            * u64::from(timebase)
            + u64::from(frame);
        if drop_frame {
            frames -= u64::from(dropped) * (total_minutes - total_minutes / 10);
        }

        Ok(Timecode {
            frames,
            drop_frame,
            hours,
            minutes,
            seconds,
            frame,
            separator,
        })
    }

    /// Build the timecode label for an absolute frame count
    pub fn from_frames(frames: u64, framerate: Framerate, drop_frame: bool) -> Self {
        let timebase = u64::from(framerate.timebase());
        let dropped = u64::from(framerate.dropped_frames_per_minute());
        let drop_frame = drop_frame && dropped > 0;

        let mut counted = frames;
        if drop_frame {
            let per_ten_minutes = timebase * 600 - dropped * 9;
            let per_minute = timebase * 60 - dropped;
            let tens = frames / per_ten_minutes;
            let remainder = frames % per_ten_minutes;
            counted += dropped * 9 * tens;
            if remainder >= dropped {
                counted += dropped * ((remainder - dropped) / per_minute);
            }
        }

        let frame = (counted % timebase) as u32;
        let total_seconds = counted / timebase;

        Timecode {
            frames,
            drop_frame,
            hours: (total_seconds / 3600) as u32,
            minutes: ((total_seconds % 3600) / 60) as u32,
            seconds: (total_seconds % 60) as u32,
            frame,
            separator: if drop_frame { ';' } else { ':' },
        }
    }
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.frames == other.frames
    }
}

impl Eq for Timecode {}

impl PartialOrd for Timecode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timecode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.frames.cmp(&other.frames)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, self.separator, self.frame
        )
    }
}
