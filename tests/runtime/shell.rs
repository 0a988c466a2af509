//! Integration tests for the shell session
//!
//! Runs command scripts against the sample dataset and checks the
//! rendered output and the resulting view state.

use cutoffs_debug::{Tracer, TracerConfig};
use cutoffs_engine::ViewConfig;
use cutoffs_runtime::{Command, DatasetLoader, Reply, Session};

use crate::sample_path;

fn session_with(tracer: Tracer) -> Session {
    let mut loader = DatasetLoader::new();
    loader.add_file(&sample_path()).unwrap();
    Session::new(loader.finish().unwrap(), &ViewConfig::default(), tracer)
}

fn session() -> Session {
    session_with(Tracer::disabled())
}

fn run(session: &mut Session, line: &str) -> String {
    let command: Command = line.parse().unwrap();
    match session.execute(&command).unwrap() {
        Reply::Output(text) => text,
        Reply::Quit => panic!("unexpected quit"),
    }
}

fn keys(session: &Session) -> Vec<String> {
    session
        .snapshot()
        .rows
        .iter()
        .map(|r| r.key().to_string())
        .collect()
}

#[test]
fn initial_table() {
    let mut s = session();
    let out = run(&mut s, "show");
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].contains("OC ▼1"));
    assert!(lines[0].contains("BC ▼2"));
    assert!(!lines[0].contains("MBCV"));
    assert_eq!(lines.len(), 2 + 5 + 1);
    assert_eq!(
        keys(&s),
        vec!["1/CS", "2006/CS", "1/EC", "2025/EC", "2006/ME"]
    );
}

#[test]
fn filtering_and_sorting_script() {
    let mut s = session();
    run(&mut s, "filter branch-code EC");
    run(&mut s, "filter \"Branch Code\" CS");
    assert_eq!(s.snapshot().matched, 4);

    run(&mut s, "sort primary ST");
    run(&mut s, "dir primary asc");
    // ST ascending; the two rows without ST follow, ordered by BC descending
    assert_eq!(keys(&s), vec!["1/EC", "1/CS", "2006/CS", "2025/EC"]);

    let out = run(&mut s, "sort secondary ST");
    assert!(out.starts_with("(primary sort on ST removed)"));
    let out = run(&mut s, "filters");
    assert!(out.contains("[CS] [EC]"));
}

#[test]
fn search_and_values() {
    let mut s = session();
    let out = run(&mut s, "search college-name college");
    assert_eq!(
        out,
        "College Name (2):\n   PSG College of Technology\n   Thiagarajar College of Engineering\n"
    );
    run(&mut s, "filter college-name PSG College of Technology");
    let out = run(&mut s, "values branch-code");
    assert_eq!(out, "Branch Code (2):\n   CS\n   ME\n");
}

#[test]
fn rejected_commands_leave_state_alone() {
    let mut s = session();
    let before = s.snapshot().revision;
    let err = s
        .execute(&"filter college-code 9999".parse().unwrap())
        .unwrap_err();
    assert!(err.to_string().contains("9999"));
    assert!("rows 30".parse::<Command>().is_err());
    assert_eq!(s.snapshot().revision, before);
}

#[test]
fn trace_captures_actions() {
    let mut s = session_with(Tracer::new(TracerConfig::new().enabled()));
    run(&mut s, "filter branch-code ME");
    let out = run(&mut s, "trace last 6");
    assert!(out.contains("ACTION"));
    assert!(out.contains("filter"));
    let stats = s.tracer().stats();
    assert_eq!(stats.event_counts.get("dataset-loaded"), Some(&1));
    assert_eq!(stats.event_counts.get("column-ignored"), Some(&1));
}

#[test]
fn emptying_the_result_is_not_traced_as_a_clamp() {
    let config = TracerConfig::new()
        .enabled()
        .filter_events(vec!["view-action".into(), "page-clamped".into()]);
    let mut s = session_with(Tracer::new(config));
    run(&mut s, "filter branch-code ME");
    run(&mut s, "filter college-code 1");
    run(&mut s, "search college-name x");
    assert_eq!(s.snapshot().matched, 0);

    let buffer = s.tracer().buffer();
    assert_eq!(buffer.by_event_type("view-action").len(), 3);
    assert!(buffer.by_event_type("page-clamped").is_empty());
    assert_eq!(buffer.len(), 3);

    run(&mut s, "page 2");
    assert_eq!(s.tracer().buffer().by_event_type("page-clamped").len(), 1);
}
