/*!
 * # cmx-edl - CMX style Edit Decision Lists
 *
 * A Rust library for reading, inspecting and writing back CMX3600 style
 * Edit Decision List (EDL) files.
 *
 * ## Features
 *
 * - Framerate validation for the eight broadcast rates, NTSC/PAL
 *   classification and drop/non-drop conversion
 * - Line recognition for titles, frame code mode, events, effect names,
 *   timewarps and free-text comments
 * - Event model with transition and timewarp semantics, including the
 *   outgoing transition duration taken from the following event
 * - Document aggregates (record start, end and length) and serialization
 *   that parses back to an equivalent document
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `framerate`: Framerate designators
 * - `timecode`: SMPTE timecodes with drop-frame counting
 * - `statements`: Line recognizers and statement kinds:
 *   - `statements::title`: `TITLE:` statements
 *   - `statements::frame_code_mode`: `FCM:` statements
 *   - `statements::event`: Event lines and the event model
 *   - `statements::effect`: `EFFECTS NAME IS` lines
 *   - `statements::timewarp`: `M2` lines
 *   - `statements::comment`: Everything else
 * - `edl`: The document container. Indexing an `Edl` walks statements in
 *   document order; `Edl::event` and `Edl::events` walk events only
 * - `app_config`: Configuration for the command line tool
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod edl;
pub mod errors;
pub mod file_utils;
pub mod framerate;
pub mod statements;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use edl::{Edl, LinkedEvent};
pub use errors::{EdlError, StatementError, StatementKind};
pub use framerate::Framerate;
pub use statements::{Event, Statement, StatementParser, Transition, TransitionKind};
pub use timecode::Timecode;
