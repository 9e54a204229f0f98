//! Trace Reader Tests.

use std::io::{self, BufRead, Read};

use csim_core::common::{ReplayError, TraceFormatKind};
use csim_core::trace::{Operation, TraceReader, TraceRecord};
use pretty_assertions::assert_eq;

fn records(trace: &str) -> Vec<TraceRecord> {
    TraceReader::new(trace.as_bytes())
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn empty_input_yields_nothing() {
    assert!(records("").is_empty());
}

#[test]
fn reads_valgrind_style_lines() {
    let trace = " L 10,1\n M 20,1\n S 18,4\n";
    assert_eq!(
        records(trace),
        vec![
            TraceRecord::new(Operation::Load, 0x10, 1),
            TraceRecord::new(Operation::Modify, 0x20, 1),
            TraceRecord::new(Operation::Store, 0x18, 4),
        ]
    );
}

#[test]
fn last_line_without_newline() {
    assert_eq!(
        records("L 0,1\nS 8,2"),
        vec![
            TraceRecord::new(Operation::Load, 0, 1),
            TraceRecord::new(Operation::Store, 8, 2),
        ]
    );
}

#[test]
fn blank_lines_are_skipped_but_counted() {
    let mut reader = TraceReader::new("\nL 0,1\n   \r\n\nS 4,1\n".as_bytes());
    assert_eq!(
        reader.next().unwrap().unwrap(),
        TraceRecord::new(Operation::Load, 0, 1)
    );
    assert_eq!(reader.lines_read(), 2);
    assert_eq!(
        reader.next().unwrap().unwrap(),
        TraceRecord::new(Operation::Store, 4, 1)
    );
    assert_eq!(reader.lines_read(), 5);
    assert!(reader.next().is_none());
}

#[test]
fn format_error_carries_line_number() {
    let mut reader = TraceReader::new("L 0,1\n\nI 0400d7d4,8\nL 4,1\n".as_bytes());
    assert!(reader.next().unwrap().is_ok());

    match reader.next().unwrap() {
        Err(ReplayError::Format(err)) => {
            assert_eq!(err.line, 3);
            assert_eq!(err.kind, TraceFormatKind::UnknownOperation('I'));
            assert_eq!(err.text, "I 0400d7d4,8");
        }
        other => panic!("expected format error, got {other:?}"),
    }
}

/// A reader that fails on the first read.
struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device unplugged"))
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::Error::other("device unplugged"))
    }

    fn consume(&mut self, _amt: usize) {}
}

#[test]
fn read_failure_is_io_error() {
    let mut reader = TraceReader::new(FailingReader);
    assert!(matches!(reader.next(), Some(Err(ReplayError::Io(_)))));
}

#[test]
fn invalid_utf8_is_io_error() {
    let bytes: &[u8] = b"L 0,1\n\xff\xfe\n";
    let mut reader = TraceReader::new(bytes);
    assert!(reader.next().unwrap().is_ok());
    assert!(matches!(reader.next(), Some(Err(ReplayError::Io(_)))));
}
