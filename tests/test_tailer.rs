//! Log tailer tests over real files

mod common;

use common::{CELL_LINE, N2_LINE, append_lines, error_line, ue_line};
use gnb_monitor::types::TailLines;
use gnb_monitor::{EventKind, ExtractionState, GnbStatus, LogTailer, TailCursor};
use std::io::Write;

#[test]
fn test_only_new_lines_are_classified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    append_lines(&path, &[CELL_LINE.to_string(), ue_line(1)]);

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();

    let first = tailer.tail(TailCursor::new(), &mut state);
    assert_eq!(first.events.len(), 2);
    assert_eq!(state.status, GnbStatus::Running);
    assert_eq!(state.connection_count, 1);

    append_lines(&path, &[ue_line(2)]);
    let second = tailer.tail(first.cursor, &mut state);
    assert_eq!(second.events.len(), 1);
    assert_eq!(second.events[0].kind, EventKind::UeAttached { total_ues: 2 });
    assert_eq!(state.connection_count, 2);

    let third = tailer.tail(second.cursor, &mut state);
    assert!(third.events.is_empty());
    assert_eq!(state.connection_count, 2);
}

#[test]
fn test_large_backlog_bounded_to_tail_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    let lines: Vec<String> = (1..=500).map(error_line).collect();
    append_lines(&path, &lines);

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();
    let outcome = tailer.tail(TailCursor::new(), &mut state);

    assert_eq!(outcome.lines.len(), 100);
    assert_eq!(outcome.lines[0], error_line(401));
    assert_eq!(outcome.lines[99], error_line(500));
    assert_eq!(state.error_count(), 100);
}

#[test]
fn test_partial_line_waits_for_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{N2_LINE}").unwrap();
    file.flush().unwrap();

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();
    let outcome = tailer.tail(TailCursor::new(), &mut state);
    assert!(outcome.events.is_empty());
    assert_eq!(outcome.cursor.offset(), 0);

    writeln!(file).unwrap();
    file.flush().unwrap();
    let outcome = tailer.tail(outcome.cursor, &mut state);
    assert_eq!(outcome.events.len(), 1);
    assert!(state.core_link_connected());
}

#[test]
fn test_truncated_file_is_reread() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    append_lines(&path, &[ue_line(1), ue_line(2), ue_line(3)]);

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();
    let outcome = tailer.tail(TailCursor::new(), &mut state);
    assert_eq!(state.connection_count, 3);

    std::fs::write(&path, format!("{}\n", ue_line(4))).unwrap();
    let outcome = tailer.tail(outcome.cursor, &mut state);
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(state.connection_count, 4);
}

#[test]
fn test_shrink_with_pending_partial_is_reread() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}\n{}", ue_line(1), &ue_line(2)[..20]).unwrap();
    file.flush().unwrap();

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();
    let outcome = tailer.tail(TailCursor::new(), &mut state);
    assert_eq!(state.connection_count, 1);
    assert!(outcome.cursor.offset() < outcome.cursor.observed_len().unwrap());

    // Shorter than before, still longer than the consumed offset
    std::fs::write(&path, format!("{}\n[RRC] idle\n", ue_line(9))).unwrap();
    assert!(tailer.stat().unwrap().unwrap().len > outcome.cursor.offset());

    let outcome = tailer.tail(outcome.cursor, &mut state);
    assert_eq!(outcome.lines, vec![ue_line(9), "[RRC] idle".to_string()]);
    assert_eq!(state.connection_count, 2);
}

#[cfg(unix)]
#[test]
fn test_rotated_file_is_read_from_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    append_lines(&path, &[ue_line(1)]);

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();
    let outcome = tailer.tail(TailCursor::new(), &mut state);
    assert_eq!(state.connection_count, 1);

    // Same length, new inode
    let rotated = dir.path().join("gnb.log.new");
    append_lines(&rotated, &[ue_line(2)]);
    std::fs::rename(&rotated, &path).unwrap();
    assert!(outcome.cursor.needs_pass(tailer.stat().unwrap()));

    let outcome = tailer.tail(outcome.cursor, &mut state);
    assert_eq!(outcome.lines, vec![ue_line(2)]);
    assert_eq!(state.connection_count, 2);
}

#[test]
fn test_unreadable_path_records_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    std::fs::create_dir(&path).unwrap();
    append_lines(&path.join("entry"), &[ue_line(1)]);

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();
    let outcome = tailer.tail(TailCursor::new(), &mut state);

    assert!(outcome.events.is_empty());
    assert_eq!(state.status, GnbStatus::Error);
    let entry = state.error_log.last().unwrap();
    assert!(entry.message.starts_with("Parser error: failed to read"));
    assert!(entry.message.contains("Is a directory"));
}

#[test]
fn test_missing_then_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();

    let outcome = tailer.tail(TailCursor::new(), &mut state);
    assert_eq!(state.status, GnbStatus::SourceNotFound);
    assert!(outcome.lines.is_empty());
    assert_eq!(tailer.stat().unwrap(), None);

    append_lines(&path, &["[RRC] idle"]);
    tailer.tail(outcome.cursor, &mut state);
    assert_eq!(state.status, GnbStatus::WaitingForSource);
    assert!(state.last_update.is_some());
}

#[test]
fn test_needs_pass_tracks_stamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gnb.log");
    append_lines(&path, &[ue_line(1)]);

    let tailer = LogTailer::new(&path, TailLines::default());
    let mut state = ExtractionState::new();
    let cursor = TailCursor::new();
    assert!(cursor.needs_pass(tailer.stat().unwrap()));

    let cursor = tailer.tail(cursor, &mut state).cursor;
    assert!(!cursor.needs_pass(tailer.stat().unwrap()));

    append_lines(&path, &[ue_line(2)]);
    assert!(cursor.needs_pass(tailer.stat().unwrap()));
}
