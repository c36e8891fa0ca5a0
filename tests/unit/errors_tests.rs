/*!
 * Tests for error types and conversions
 */

use std::error::Error;

use cmx_edl::{EdlError, StatementError, StatementKind};

#[test]
fn test_statementError_shouldDisplayKindReasonAndRaw() {
    let error = StatementError::new(StatementKind::FrameCodeMode, "FCM: Drop Frame", "unknown mode");
    let display = format!("{}", error);
    assert!(display.contains("FCM"));
    assert!(display.contains("unknown mode"));
    assert!(display.contains("\"FCM: Drop Frame\""));
}

#[test]
fn test_edlError_fromStatementError_shouldBeTransparent() {
    let inner = StatementError::new(StatementKind::Title, "TITLE:", "missing text");
    let error: EdlError = inner.clone().into();
    assert_eq!(error.to_string(), inner.to_string());
    assert_eq!(error.statement_error(), Some(&inner));
}

#[test]
fn test_edlError_parse_shouldExposeLineAndSource() {
    let error = EdlError::Parse {
        line: 7,
        source: StatementError::new(StatementKind::Event, "001 AX", "too short"),
    };
    assert!(error.to_string().starts_with("Line 7:"));
    assert!(error.source().is_some());
    assert_eq!(error.statement_error().map(|e| e.kind), Some(StatementKind::Event));
}

#[test]
fn test_edlError_valueCategories_shouldBeClassified() {
    assert!(EdlError::InvalidValue("x".to_string()).is_value_error());
    assert!(EdlError::UnsupportedFramerate("26".to_string()).is_value_error());
    assert!(!EdlError::InvalidType("null".to_string()).is_value_error());
    assert!(!EdlError::Unsupported("splice").is_value_error());
    assert!(EdlError::InvalidType("null".to_string()).statement_error().is_none());
}

#[test]
fn test_edlError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.edl");
    let error: EdlError = io_error.into();
    assert!(matches!(error, EdlError::File(_)));
    assert!(error.to_string().contains("missing.edl"));
}

#[test]
fn test_statementKind_shouldDisplayName() {
    assert_eq!(StatementKind::FrameCodeMode.to_string(), "FCM");
    assert_eq!(StatementKind::Timewarp.name(), "Timewarp");
}
