//! End-to-end session tests: text writes reaching the transport, the
//! reset-on-read policy applied through the session lock, and failure
//! handling that leaves the session usable.

use std::sync::Arc;

use hid_proflight_protocol::{DecodeOutcome, PanelKind, ProflightError};
use proflight_session::{DeviceSession, SessionError};
use proflight_hid_common::mock::MockFeatureSink;

fn multipanel_session() -> (Arc<MockFeatureSink>, DeviceSession<Arc<MockFeatureSink>>) {
    let sink = Arc::new(MockFeatureSink::new());
    let session = DeviceSession::new(PanelKind::Multipanel, Arc::clone(&sink));
    (sink, session)
}

#[test]
fn test_text_write_reaches_transport() {
    let (sink, session) = multipanel_session();

    let consumed = session
        .on_text_write("12345 -6789 10100000 R\n")
        .expect("valid write");
    // The trailing newline is consumed along with the 22-character body.
    assert_eq!(consumed, 23);

    let reports = sink.sent_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0],
        vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x0E, 0x06, 0x07, 0x08, 0x09, 0x05, 0x00]
    );
}

#[test]
fn test_radiopanel_write_report_size() {
    let sink = Arc::new(MockFeatureSink::new());
    let session = DeviceSession::new(PanelKind::Radiopanel, Arc::clone(&sink));

    let consumed = session
        .on_text_write("118.25     118.70     1100       12.3       R")
        .expect("valid write");
    assert_eq!(consumed, 45);

    let reports = sink.sent_reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].len(), 23);
    assert_eq!(&reports[0][1..6], &[0x01, 0x01, 0x88, 0x02, 0x05]);
}

#[test]
fn test_reset_on_read_through_session() {
    let (_sink, session) = multipanel_session();

    let outcome = session
        .on_raw_report(0, 0, &[0x00, 0x01, 0x00])
        .expect("decode");
    assert_eq!(outcome, DecodeOutcome::Handled);

    // First read reports the press and zeroes the counter as a side effect.
    let text = session.on_text_read();
    assert!(text.contains("HDG:ON 1\n"), "first read: {text}");

    let text = session.on_text_read();
    assert!(text.contains("HDG:ON 0\n"), "second read: {text}");
}

#[test]
fn test_normal_mode_persists_across_reads() {
    let (_sink, session) = multipanel_session();

    session
        .on_text_write("12345 -6789 10100000 N")
        .expect("switch to normal mode");
    session
        .on_raw_report(0, 0, &[0x00, 0x01, 0x00])
        .expect("decode");

    for _ in 0..3 {
        let text = session.on_text_read();
        assert!(text.contains("HDG:ON 1\n"), "persisting read: {text}");
    }
}

#[test]
fn test_foreign_reports_pass_through() {
    let (_sink, session) = multipanel_session();

    let outcome = session
        .on_raw_report(5, 0, &[0xFF, 0xFF, 0xFF])
        .expect("foreign id is not an error");
    assert_eq!(outcome, DecodeOutcome::Passthrough);

    let outcome = session
        .on_raw_report(0, 2, &[0xFF, 0xFF, 0xFF])
        .expect("feature report type is not ours");
    assert_eq!(outcome, DecodeOutcome::Passthrough);

    // Nothing was accumulated.
    let text = session.on_text_read();
    assert!(text.contains("HDG:OFF0\n"), "untouched state: {text}");
}

#[test]
fn test_short_write_sends_nothing() {
    let (sink, session) = multipanel_session();

    let result = session.on_text_write("12345 -6789");
    assert!(matches!(
        result,
        Err(SessionError::Protocol(ProflightError::TextTooShort {
            expected: 22,
            ..
        }))
    ));
    assert!(sink.sent_reports().is_empty());
}

#[test]
fn test_transport_failure_keeps_session_usable() {
    let (sink, session) = multipanel_session();
    sink.disconnect();

    let result = session.on_text_write("12345 -6789 10100000 R");
    assert!(matches!(result, Err(SessionError::Transport(_))));

    // The parse landed before the transport failed; the session is neither
    // poisoned nor holding its lock.
    let text = session.on_text_read();
    assert!(text.starts_with("12345 -6789"), "parsed state kept: {text}");

    sink.reconnect();
    session
        .on_text_write("12345 -6789 10100000 R")
        .expect("write succeeds after reconnect");
    assert_eq!(sink.sent_reports().len(), 1);
}

#[test]
fn test_concurrent_readers_and_reports() {
    let (_sink, session) = multipanel_session();
    let session = Arc::new(session);

    // Normal mode so reads take the shared lock.
    session
        .on_text_write("      -     00000000 N")
        .expect("switch to normal mode");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let session = Arc::clone(&session);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let text = session.on_text_read();
                    assert!(text.contains("MODE:"));
                }
            })
        })
        .collect();

    for i in 0..50u8 {
        session
            .on_raw_report(0, 0, &[0x01, i % 2, 0x00])
            .expect("decode");
    }

    for handle in readers {
        handle.join().expect("reader thread");
    }

    // 25 rising edges saturate the counter; the last report left HDG high.
    let text = session.on_text_read();
    assert!(text.contains("HDG:ON 9\n"), "saturated count: {text}");
}
