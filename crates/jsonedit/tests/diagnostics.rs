#![allow(missing_docs)]

use std::sync::{Mutex, Once};

use jsonedit::{Context, args};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct Capture;

static LINES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static INIT: Once = Once::new();

impl Log for Capture {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        LINES
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn install() {
    INIT.call_once(|| {
        log::set_logger(&Capture).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Lines mentioning `marker`; tests run concurrently and share the logger.
fn lines_with(marker: &str) -> Vec<(Level, String)> {
    LINES
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, line)| line.contains(marker))
        .cloned()
        .collect()
}

#[test]
fn parse_failure_names_the_line() {
    install();
    let doc = "{\"parse_marker\":\n  [1,,2]}";
    assert!(Context::default().get(&args![doc, "a"]).is_err());
    let lines = lines_with("parse_marker");
    assert_eq!(lines.len(), 1);
    let (level, line) = &lines[0];
    assert_eq!(*level, Level::Error);
    assert!(line.starts_with("json_get - '"), "{line}");
    assert!(line.contains("is not valid JSON - line 2: invalid character ','"), "{line}");
}

#[test]
fn type_mismatch_names_the_document() {
    install();
    let err = Context::default()
        .get(&args![r#"["mismatch_marker"]"#, "k"])
        .unwrap_err();
    let lines = lines_with("mismatch_marker");
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].1,
        format!(r#"json_get - {err} (json=["mismatch_marker"])"#)
    );
}

#[test]
fn unsupported_segment_is_a_warning() {
    install();
    let got = Context::default()
        .unset(&args![r#"["unsupported_marker"]"#, "unsupported_marker"])
        .unwrap();
    assert_eq!(got, None);
    assert!(
        LINES
            .lock()
            .unwrap()
            .iter()
            .any(|(level, line)| *level == Level::Warn && line.starts_with("json_unset - ")),
    );
}

#[test]
fn benchmark_logs_timings() {
    install();
    let mut ctx = Context::default();
    ctx.config(&args!["benchmark", "yes"]).unwrap();
    ctx.append(&args!["[]", 1]).unwrap();
    assert!(
        LINES
            .lock()
            .unwrap()
            .iter()
            .any(|(level, line)| *level == Level::Info && line.starts_with("json_append took ")),
    );
}
