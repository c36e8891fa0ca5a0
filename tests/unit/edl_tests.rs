/*!
 * Tests for the EDL document container
 */

use std::io::Cursor;

use cmx_edl::statements::{recognize, Comment, FrameCodeMode};
use cmx_edl::{Edl, EdlError, Framerate, Statement, StatementKind};
use crate::common;

fn three_events() -> String {
    // Record frames at 24 fps: [0, 24, 100] to [24, 100, 150]
    [
        common::event_line("001", "C", "", "00:00:00:00", "00:00:01:00"),
        common::event_line("002", "C", "", "00:00:01:00", "00:00:04:04"),
        common::event_line("003", "C", "", "00:00:04:04", "00:00:06:06"),
    ]
    .join("\n")
}

#[test]
fn test_span_withThreeEvents_shouldCoverRecordRange() {
    let edl = Edl::from_string(24, &three_events()).unwrap();

    let starts: Vec<u64> = edl.events().map(|e| e.rec_start_tc.frames).collect();
    let ends: Vec<u64> = edl.events().map(|e| e.rec_end_tc.frames).collect();
    assert_eq!(starts, vec![0, 24, 100]);
    assert_eq!(ends, vec![24, 100, 150]);

    assert_eq!(edl.get_start().unwrap().frames, 0);
    assert_eq!(edl.get_end().unwrap().frames, 150);
    assert_eq!(edl.get_length(), 150);
}

#[test]
fn test_span_withOutOfOrderEvents_shouldUseExtremes() {
    let text = [
        common::event_line("001", "C", "", "00:00:10:00", "00:00:12:00"),
        common::event_line("002", "C", "", "00:00:02:00", "00:00:03:00"),
    ]
    .join("\n");
    let edl = Edl::from_string(25, &text).unwrap();

    assert_eq!(edl.get_start().unwrap().to_string(), "00:00:02:00");
    assert_eq!(edl.get_end().unwrap().to_string(), "00:00:12:00");
    assert_eq!(edl.get_length(), 250);
}

#[test]
fn test_withFps_shouldValidateBeforeBuilding() {
    let edl = Edl::with_fps("25.00").unwrap();
    assert_eq!(edl.framerate(), Framerate::Fps25);
    assert!(edl.is_pal());
    assert!(!edl.is_ntsc());
    assert_eq!(edl.drop_frame_rate(), Framerate::Fps25);

    assert!(Edl::with_fps(26).unwrap_err().is_value_error());
    assert!(Edl::with_fps("abc").unwrap_err().is_value_error());
}

#[test]
fn test_ntscEdl_shouldConvertRates() {
    let edl = Edl::with_fps(30).unwrap();
    assert!(edl.is_ntsc());
    assert_eq!(edl.drop_frame_rate(), Framerate::Fps29_97);
    assert_eq!(edl.non_drop_frame_rate(), Framerate::Fps30);
}

#[test]
fn test_setTitle_withLengthBoundary_shouldEnforceCeiling() {
    let mut edl = Edl::new(Framerate::Fps24);
    edl.set_title(&"t".repeat(70)).unwrap();
    assert_eq!(edl.title().len(), 70);

    let err = edl.set_title(&"t".repeat(71)).unwrap_err();
    assert!(matches!(err, EdlError::InvalidValue(_)));
    assert_eq!(edl.title().len(), 70);
}

#[test]
fn test_append_shouldFoldFollowOnLinesIntoTrailingEvent() {
    let mut edl = Edl::new(Framerate::Fps24);
    let context = edl.context();

    edl.append(Statement::FrameCodeMode(FrameCodeMode::new(false))).unwrap();
    edl.append(Statement::Comment(Comment::new("* LIST HEADER"))).unwrap();
    edl.append(recognize(&common::event_line("001", "W001", "010", "00:00:00:00", "00:00:01:00"), &context).unwrap())
        .unwrap();
    edl.append(recognize("EFFECTS NAME IS EDGE WIPE", &context).unwrap()).unwrap();
    edl.append(recognize("* FROM CLIP NAME: wipe", &context).unwrap()).unwrap();

    assert_eq!(edl.len(), 3);
    assert_eq!(edl.event_count(), 1);
    assert_eq!(edl[1].kind(), StatementKind::Comment);

    let event = edl.event(0).unwrap();
    assert_eq!(event.ordinal(), 0);
    assert_eq!(event.clip_name(), Some("wipe"));
    assert_eq!(event.transition.as_ref().unwrap().effect.as_deref(), Some("EDGE WIPE"));
}

#[test]
fn test_append_timewarpWithoutEvent_shouldFail() {
    let mut edl = Edl::new(Framerate::Fps24);
    let statement = recognize("M2   AX       048.0                     00:00:00:00", &edl.context()).unwrap();
    let err = edl.append(statement).unwrap_err();
    assert_eq!(err.statement_error().unwrap().kind, StatementKind::Timewarp);
}

#[test]
fn test_eventMut_shouldEditInPlace() {
    let mut edl = Edl::from_string(24, &three_events()).unwrap();
    edl.event_mut(1).unwrap().reel = "NEWREEL".to_string();

    assert_eq!(edl.event(1).unwrap().get_reel(), "NEWREEL");
    assert!(edl.event_mut(3).is_none());
    assert!(edl.event(3).is_none());
    assert!(edl.to_string().contains("NEWREEL"));
}

#[test]
fn test_parse_shouldAbortOnFirstBadLine() {
    let lines = vec![
        common::event_line("001", "C", "", "00:00:00:00", "00:00:01:00"),
        "FCM: SOMETIMES DROP".to_string(),
        "TITLE:".to_string(),
    ];
    match Edl::parse(24, &lines).unwrap_err() {
        EdlError::Parse { line, source } => {
            assert_eq!(line, 2);
            assert_eq!(source.kind, StatementKind::FrameCodeMode);
            assert_eq!(source.raw, "FCM: SOMETIMES DROP");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_parse_withNumberedNote_shouldKeepItAsEventComment() {
    let lines = vec![
        common::event_line("001", "C", "", "00:00:00:00", "00:00:01:00"),
        "2 CAMERA SHOOT NOTE".to_string(),
        common::event_line("002", "C", "", "00:00:01:00", "00:00:02:00"),
    ];
    let edl = Edl::parse(24, &lines).unwrap();

    assert_eq!(edl.event_count(), 2);
    assert_eq!(edl.event(0).unwrap().comments, vec!["2 CAMERA SHOOT NOTE".to_string()]);
    assert!(edl.to_string().contains("\n2 CAMERA SHOOT NOTE\n"));
}

#[test]
fn test_parse_withNumberedLineMissingTimecodes_shouldStillFail() {
    let lines = vec![
        common::event_line("001", "C", "", "00:00:00:00", "00:00:01:00"),
        "002  AX V C 00:00:01:00 00:00:02:00".to_string(),
    ];
    match Edl::parse(24, &lines).unwrap_err() {
        EdlError::Parse { line, source } => {
            assert_eq!(line, 2);
            assert_eq!(source.kind, StatementKind::Event);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_fromReader_withCrlfLines_shouldParse() {
    let text = common::SAMPLE_EDL.replace('\n', "\r\n");
    let edl = Edl::from_reader(24, Cursor::new(text.into_bytes())).unwrap();
    assert_eq!(edl.title(), "My Show");
    assert_eq!(edl.event_count(), 2);
    assert_eq!(edl.event(0).unwrap().clip_name(), Some("clip 1"));
}

#[test]
fn test_fromBytes_withInvalidUtf8_shouldFail() {
    let err = Edl::from_bytes(24, &[0x54, 0xff, 0xfe]).unwrap_err();
    assert!(matches!(err, EdlError::InvalidValue(_)));

    let edl = Edl::from_bytes("24", common::SAMPLE_EDL.as_bytes()).unwrap();
    assert_eq!(edl.statements().len(), 3);
}

#[test]
fn test_fromFile_withMissingFile_shouldFail() {
    let err = Edl::from_file(24, "no/such/file.edl").unwrap_err();
    assert!(matches!(err, EdlError::File(_)));
}

#[test]
fn test_display_shouldStartWithTitleAndKeepOrder() {
    let edl = Edl::from_string(24, common::SAMPLE_EDL).unwrap();
    let lines = common::data_lines(&edl.to_string());

    assert_eq!(lines[0], "TITLE: My Show");
    assert_eq!(lines[1], "FCM: NON DROP FRAME");
    assert!(lines[2].starts_with("001 AX V C"));
    assert_eq!(lines[3], "* FROM CLIP NAME: clip 1");
    assert!(lines[4].starts_with("002 BL V D 024"));
    assert_eq!(lines[5], "EFFECTS NAME IS CROSS DISSOLVE");
}

#[test]
fn test_timelineOperations_shouldReportUnsupported() {
    let edl = Edl::from_string(24, common::SAMPLE_EDL).unwrap();
    assert!(matches!(edl.renumbered(), Err(EdlError::Unsupported(_))));
    assert!(matches!(edl.spliced(), Err(EdlError::Unsupported(_))));

    let event = edl.event(1).unwrap();
    assert!(matches!(event.capture_to_tc(), Err(EdlError::Unsupported(_))));
    assert!(matches!(event.capture_to_and_including_tc(), Err(EdlError::Unsupported(_))));
}
