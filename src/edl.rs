/*!
 * The EDL document container.
 *
 * An `Edl` owns the statements of one document in document order together
 * with its title and framerate. Events are addressed through an index of
 * their positions in the statement list, so an event's successor is simply
 * the next entry of that index. Cross-record values such as the outgoing
 * transition duration are computed through [`LinkedEvent`].
 */

use std::fmt;
use std::io::BufRead;
use std::ops::{Deref, Index};
use std::path::Path;

use log::{debug, warn};

use crate::errors::{EdlError, Result, StatementError, StatementKind};
use crate::framerate::{Framerate, FramerateInput};
use crate::statements::title::{validate_title, Title};
use crate::statements::{Event, ParseContext, Statement, StatementParser};
use crate::timecode::Timecode;

/// Holds the statements of one EDL document
#[derive(Debug, Clone, PartialEq)]
pub struct Edl {
    framerate: Framerate,
    title: String,
    statements: Vec<Statement>,

    // @field: Positions of Event statements within `statements`
    event_slots: Vec<usize>,

    // @field: Drop-frame mode declared by the latest FCM statement
    drop_frame: bool,
}

impl Edl {
    /// Create an empty EDL
    pub fn new(framerate: Framerate) -> Self {
        Self {
            framerate,
            title: String::new(),
            statements: Vec::new(),
            event_slots: Vec::new(),
            drop_frame: false,
        }
    }

    /// Create an empty EDL from any framerate designator
    pub fn with_fps<'a>(fps: impl Into<FramerateInput<'a>>) -> Result<Self> {
        Ok(Self::new(Framerate::parse(fps)?))
    }

    /// Parse a sequence of lines. The framerate is validated before any line
    /// is read; parsing stops at the first line that fails.
    pub fn parse<'a, I, S>(fps: impl Into<FramerateInput<'a>>, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let framerate = Framerate::parse(fps)?;
        Self::parse_lines(framerate, lines)
    }

    /// Parse a multi-line string
    pub fn from_string<'a>(fps: impl Into<FramerateInput<'a>>, text: &str) -> Result<Self> {
        Self::parse(fps, text.lines())
    }

    /// Parse UTF-8 encoded bytes
    pub fn from_bytes<'a>(fps: impl Into<FramerateInput<'a>>, bytes: &[u8]) -> Result<Self> {
        let framerate = Framerate::parse(fps)?;
        let text = std::str::from_utf8(bytes)
            .map_err(|e| EdlError::InvalidValue(format!("EDL text is not valid UTF-8: {}", e)))?;
        Self::parse_lines(framerate, text.lines())
    }

    /// Parse everything a reader yields
    pub fn from_reader<'a, R: BufRead>(fps: impl Into<FramerateInput<'a>>, reader: R) -> Result<Self> {
        let framerate = Framerate::parse(fps)?;
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        Self::parse_lines(framerate, lines)
    }

    /// Parse a file
    pub fn from_file<'a, P: AsRef<Path>>(fps: impl Into<FramerateInput<'a>>, path: P) -> Result<Self> {
        let framerate = Framerate::parse(fps)?;
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EdlError::File(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse_lines(framerate, text.lines())
    }

    fn parse_lines<I, S>(framerate: Framerate, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parser = StatementParser::new();
        let mut edl = Edl::new(framerate);

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }

            let located = |source: StatementError| EdlError::Parse {
                line: index + 1,
                source,
            };
            let statement = parser.recognize(line, &edl.context()).map_err(located)?;
            edl.attach(statement).map_err(located)?;
        }

        debug!(
            "Parsed EDL at {} fps: {} statements, {} events",
            edl.framerate,
            edl.statements.len(),
            edl.event_slots.len()
        );

        Ok(edl)
    }

    /// Context the next line is interpreted in
    pub fn context(&self) -> ParseContext {
        ParseContext {
            framerate: self.framerate,
            drop_frame: self.drop_frame,
        }
    }

    /// Append a statement. Effect, timewarp and comment statements that
    /// follow an event are folded into it.
    pub fn append(&mut self, statement: Statement) -> Result<()> {
        self.attach(statement)?;
        Ok(())
    }

    fn attach(&mut self, statement: Statement) -> std::result::Result<(), StatementError> {
        match statement {
            Statement::Title(title) => {
                self.title = title.title().unwrap_or_default().to_string();
            }
            Statement::FrameCodeMode(fcm) => {
                self.drop_frame = fcm.is_drop_frame();
                self.statements.push(Statement::FrameCodeMode(fcm));
            }
            Statement::Event(event) => {
                self.event_slots.push(self.statements.len());
                self.statements.push(Statement::Event(event));
            }
            Statement::Effect(effect) => {
                let raw = effect.raw().map_or_else(|| effect.to_string(), str::to_string);
                let event = self
                    .trailing_event_mut()
                    .ok_or_else(|| StatementError::new(StatementKind::Effect, &raw, "no event to attach the effect to"))?;

                match event.transition.as_mut().filter(|t| !t.is_cut()) {
                    Some(transition) if transition.effect.is_none() => {
                        transition.effect = Some(effect.name().to_string())
                    }
                    Some(_) => {
                        warn!("Second effect name on event {} kept as a comment", event.num);
                        event.comments.push(raw);
                    }
                    None => {
                        warn!("Effect name on event {} without a transition kept as a comment", event.num);
                        event.comments.push(raw);
                    }
                }
            }
            Statement::Timewarp(timewarp) => {
                let raw = timewarp.raw().map_or_else(|| timewarp.to_string(), str::to_string);
                let event = self
                    .trailing_event_mut()
                    .ok_or_else(|| StatementError::new(StatementKind::Timewarp, &raw, "no event to attach the timewarp to"))?;
                event.timewarp = Some(timewarp);
            }
            Statement::Comment(comment) => match self.trailing_event_mut() {
                Some(event) => event.comments.push(comment.into_text()),
                None => self.statements.push(Statement::Comment(comment)),
            },
        }
        Ok(())
    }

    /// The event a follow-on line belongs to: the last statement, if it is an event
    fn trailing_event_mut(&mut self) -> Option<&mut Event> {
        self.statements.last_mut().and_then(Statement::as_event_mut)
    }

    pub fn framerate(&self) -> Framerate {
        self.framerate
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Assign the title, enforcing the CMX length ceiling
    pub fn set_title(&mut self, title: &str) -> Result<()> {
        validate_title(title)?;
        self.title = title.to_string();
        Ok(())
    }

    /// Drop-frame mode declared by the last FCM statement
    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }

    pub fn is_pal(&self) -> bool {
        self.framerate.is_pal()
    }

    pub fn is_ntsc(&self) -> bool {
        self.framerate.is_ntsc()
    }

    pub fn drop_frame_rate(&self) -> Framerate {
        self.framerate.drop_frame_rate()
    }

    pub fn non_drop_frame_rate(&self) -> Framerate {
        self.framerate.non_drop_frame_rate()
    }

    /// Number of top-level statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn event_count(&self) -> usize {
        self.event_slots.len()
    }

    /// The `ordinal`-th event of the document
    pub fn event(&self, ordinal: usize) -> Option<LinkedEvent<'_>> {
        (ordinal < self.event_slots.len()).then_some(LinkedEvent { edl: self, ordinal })
    }

    pub fn event_mut(&mut self, ordinal: usize) -> Option<&mut Event> {
        let slot = *self.event_slots.get(ordinal)?;
        self.statements[slot].as_event_mut()
    }

    /// Events in document order
    pub fn events(&self) -> impl Iterator<Item = LinkedEvent<'_>> + '_ {
        (0..self.event_slots.len()).map(move |ordinal| LinkedEvent { edl: self, ordinal })
    }

    fn event_at(&self, ordinal: usize) -> &Event {
        match &self.statements[self.event_slots[ordinal]] {
            Statement::Event(event) => event,
            other => unreachable!("event slot {} holds a {} statement", ordinal, other.kind()),
        }
    }

    /// Earliest record-in timecode, `None` without events
    pub fn get_start(&self) -> Option<&Timecode> {
        self.events().map(|e| &e.event().rec_start_tc).min_by_key(|tc| tc.frames)
    }

    /// Latest record-out timecode, `None` without events
    pub fn get_end(&self) -> Option<&Timecode> {
        self.events().map(|e| &e.event().rec_end_tc).max_by_key(|tc| tc.frames)
    }

    /// Record span in frames, 0 without events
    pub fn get_length(&self) -> u64 {
        match (self.get_start(), self.get_end()) {
            (Some(start), Some(end)) => end.frames.saturating_sub(start.frames),
            _ => 0,
        }
    }

    pub fn without_transitions(&self) -> Result<Edl> {
        Err(EdlError::Unsupported("remove-transitions"))
    }

    pub fn renumbered(&self) -> Result<Edl> {
        Err(EdlError::Unsupported("renumber"))
    }

    pub fn without_timewarps(&self) -> Result<Edl> {
        Err(EdlError::Unsupported("remove-timewarps"))
    }

    pub fn without_generators(&self) -> Result<Edl> {
        Err(EdlError::Unsupported("remove-generators"))
    }

    pub fn capture_list(&self) -> Result<Edl> {
        Err(EdlError::Unsupported("build-capture-list"))
    }

    pub fn from_zero(&self) -> Result<Edl> {
        Err(EdlError::Unsupported("rebase-to-zero"))
    }

    pub fn spliced(&self) -> Result<Edl> {
        Err(EdlError::Unsupported("splice"))
    }
}

/// Statement at `index` in document order, counting FCM, comment and event lines alike.
/// Use [`Edl::event`] to reach an event by its position among events.
impl Index<usize> for Edl {
    type Output = Statement;

    fn index(&self, index: usize) -> &Statement {
        &self.statements[index]
    }
}

impl fmt::Display for Edl {
    /// Title line, a blank separator, then every statement in document order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", Title::IDENTIFIER, self.title)?;
        for statement in &self.statements {
            write!(f, "\n{}", statement)?;
        }
        Ok(())
    }
}

/// An event together with its position in the document
#[derive(Debug, Clone, Copy)]
pub struct LinkedEvent<'a> {
    edl: &'a Edl,
    ordinal: usize,
}

impl<'a> LinkedEvent<'a> {
    /// Position among the document's events
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn event(&self) -> &'a Event {
        self.edl.event_at(self.ordinal)
    }

    /// The event that follows this one in document order
    pub fn next_event(&self) -> Option<LinkedEvent<'a>> {
        self.edl.event(self.ordinal + 1)
    }

    /// The next event's incoming transition duration, 0 for the last event
    pub fn outgoing_transition_duration(&self) -> Result<u64> {
        match self.next_event() {
            Some(next) => next.incoming_transition_duration(),
            None => Ok(0),
        }
    }

    /// True if the next event starts with a transition
    pub fn ends_with_transition(&self) -> bool {
        self.next_event().is_some_and(|next| next.has_transition())
    }

    /// Record length including the outgoing transition
    pub fn rec_length_with_transition(&self) -> Result<u64> {
        Ok(self.rec_length() + self.outgoing_transition_duration()?)
    }
}

impl Deref for LinkedEvent<'_> {
    type Target = Event;

    fn deref(&self) -> &Event {
        self.event()
    }
}
