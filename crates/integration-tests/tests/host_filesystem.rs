//! TextProcessor against the real filesystem
//!
//! Covers the read/write guarantees end to end with HostFileSystem.

mod common;

use common::ScratchDir;
use textflow_core::{LineEnding, TextError, TextProcessor};

/// Mixed terminators collapse to the host joiner, none trailing
#[test]
fn test_read_mixed_terminators() {
    let dir = ScratchDir::new();
    let source = dir.seed("in.txt", b"a\r\nb\n");
    let processor = TextProcessor::new(&source, dir.file("out.txt"));

    let content = processor.read().unwrap();

    assert_eq!(content, format!("a{}b", LineEnding::native().as_str()));
    println!("✅ read joins lines with the host terminator");
}

#[test]
fn test_read_empty_file() {
    let dir = ScratchDir::new();
    let source = dir.seed("empty.txt", b"");
    let processor = TextProcessor::new(&source, dir.file("out.txt"));

    assert_eq!(processor.read().unwrap(), "");
}

/// `write("hello")` leaves exactly those bytes on disk
#[test]
fn test_write_hello() {
    let dir = ScratchDir::new();
    let destination = dir.file("out.txt");
    let processor = TextProcessor::new(dir.file("in.txt"), &destination);

    processor.write("hello").unwrap();

    assert_eq!(std::fs::read(&destination).unwrap(), b"hello");
}

#[test]
fn test_write_verbatim_with_crlf_configured() {
    let dir = ScratchDir::new();
    let destination = dir.file("out.txt");
    let processor =
        TextProcessor::new(dir.file("in.txt"), &destination).with_line_ending(LineEnding::CrLf);

    processor.write("line one\nline two\n").unwrap();

    assert_eq!(
        std::fs::read(&destination).unwrap(),
        b"line one\nline two\n"
    );
}

#[test]
fn test_write_truncates() {
    let dir = ScratchDir::new();
    let destination = dir.seed("out.txt", b"previous content that is fairly long");
    let processor = TextProcessor::new(dir.file("in.txt"), &destination);

    processor.write("new").unwrap();

    assert_eq!(std::fs::read_to_string(&destination).unwrap(), "new");
}

/// A failed read never creates or touches the destination
#[test]
fn test_read_missing_source() {
    let dir = ScratchDir::new();
    let destination = dir.file("out.txt");
    let processor = TextProcessor::new(dir.file("missing.txt"), &destination);

    let err = processor.read().unwrap_err();

    assert!(matches!(err, TextError::NotFound { .. }));
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!destination.exists());
}

#[test]
fn test_write_missing_directory() {
    let dir = ScratchDir::new();
    let destination = dir.path().join("no-such-dir").join("out.txt");
    let processor = TextProcessor::new(dir.file("in.txt"), &destination);

    let err = processor.write("data").unwrap_err();

    assert!(matches!(err, TextError::PathInvalid { .. }));
    assert_eq!(err.path(), destination.as_path());
}

#[test]
fn test_read_then_write_round_trip() {
    let dir = ScratchDir::new();
    let source = dir.seed("in.txt", b"\xEF\xBB\xBFalpha\rbeta\r\ngamma\n");
    let destination = dir.file("out.txt");
    let processor = TextProcessor::new(&source, &destination).with_line_ending(LineEnding::Lf);

    let content = processor.read().unwrap();
    processor.write(&content).unwrap();

    assert_eq!(std::fs::read(&destination).unwrap(), b"alpha\nbeta\ngamma");
    // Source is never modified
    assert_eq!(
        std::fs::read(&source).unwrap(),
        b"\xEF\xBB\xBFalpha\rbeta\r\ngamma\n"
    );
}

#[tokio::test]
async fn test_read_async_matches_read() {
    let dir = ScratchDir::new();
    let source = dir.seed("in.txt", "one\r\ntwo\rthree\n\nfive".as_bytes());
    let processor = TextProcessor::new(&source, dir.file("out.txt"));

    let sync = processor.read().unwrap();
    let async_result = processor.read_async().await.unwrap();

    assert_eq!(sync, async_result);
}

#[tokio::test]
async fn test_write_async_truncates_and_flushes() {
    let dir = ScratchDir::new();
    let destination = dir.seed("out.txt", b"0123456789");
    let processor = TextProcessor::new(dir.file("in.txt"), &destination);

    processor.write_async("abc").await.unwrap();

    assert_eq!(std::fs::read(&destination).unwrap(), b"abc");
}

#[tokio::test]
async fn test_async_errors() {
    let dir = ScratchDir::new();
    let processor = TextProcessor::new(
        dir.file("missing.txt"),
        dir.path().join("missing-dir").join("out.txt"),
    );

    let read_err = processor.read_async().await.unwrap_err();
    let write_err = processor.write_async("x").await.unwrap_err();

    assert!(matches!(read_err, TextError::NotFound { .. }));
    assert!(matches!(write_err, TextError::PathInvalid { .. }));
}
