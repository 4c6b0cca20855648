#![forbid(unsafe_code)]
mod common;

use common::{file, row};
use std::fs;
use tempfile::tempdir;
use timecard_audit::{
    AuditError, Pipeline, RunSummary, Violation, ViolationKind, ViolationRenderer, REPORT_HEADER,
};

fn audit(input: &str) -> (RunSummary, String) {
    let (summary, out) = Pipeline::default()
        .run_readers(input.as_bytes(), input.as_bytes(), Vec::new())
        .unwrap();
    (summary, String::from_utf8(out).unwrap())
}

fn mixed_timecard() -> String {
    file(&[
        row("Clerk", "01/02/2024 05:00 AM", "01/02/2024 01:00 PM", "Bob"),
        row("Nurse", "01/01/2024 08:00 AM", "01/01/2024 04:00 PM", "Carol"),
        row("Clerk", "01/01/2024 02:00 PM", "01/01/2024 10:00 PM", "Bob"),
        row("Nurse", "01/03/2024 08:00 AM", "01/03/2024 04:00 PM", "Carol"),
        row("Nurse", "01/10/2024 08:00 AM", "01/10/2024 11:00 PM", "Alice"),
        row("Nurse", "01/11/2024 08:00 AM", "01/11/2024 04:00 PM", "Alice"),
        row("Nurse", "01/12/2024 08:00 AM", "01/12/2024 04:00 PM", "Alice"),
        "WFS000009,Nurse".to_string(),
    ])
}

#[test]
fn report_lists_violations_in_detection_order() {
    let (summary, report) = audit(&mixed_timecard());

    insta::assert_snapshot!(report, @r"
    Employee Name,Position,Consecutive Days Worked,Hours Between Shifts,Single Shift Duration
    Bob (Position: Clerk) has less than 10 hours between shifts.
    Alice (Position: Nurse) worked for 7 consecutive days.
    Alice (Position: Nurse) worked for more than 14 hours in a single shift.
    ");

    assert_eq!(
        summary,
        RunSummary {
            rows_read: 8,
            records: 3,
            skipped: 0,
            consumed_by_lookahead: 5,
            consecutive_days: 1,
            short_rest: 1,
            long_shift: 1,
            longest_streak: 2,
        }
    );
    assert_eq!(summary.violations(), 3);
}

#[test]
fn bad_rows_are_skipped_without_aborting() {
    let input = file(&[
        "WFS000001,Nurse,01/01/2024 08:00 AM".to_string(),
        row("Nurse", "Time", "Time Out", "Alice"),
        row("Nurse", "13/45/2024 25:99 XM", "01/01/2024 11:00 PM", "Alice"),
        row("Nurse", "", "01/01/2024 11:00 PM", "Alice"),
    ]);
    let (summary, report) = audit(&input);

    assert_eq!(report, format!("{REPORT_HEADER}\n"));
    assert_eq!(summary.rows_read, 4);
    assert_eq!(summary.skipped, 4);
    assert_eq!(summary.records, 0);
}

#[test]
fn header_is_always_skipped() {
    // la première ligne est ignorée même si elle ressemble à un shift
    let input = format!(
        "{}\n",
        row("Nurse", "01/01/2024 08:00 AM", "01/01/2024 11:00 PM", "Alice")
    );
    let (summary, report) = audit(&input);
    assert_eq!(report, format!("{REPORT_HEADER}\n"));
    assert_eq!(summary.rows_read, 0);
}

#[test]
fn nameless_row_is_audited_and_consumes_following_rows() {
    let input = file(&[
        row("Nurse", "01/01/2024 08:00 AM", "01/01/2024 04:00 PM", ""),
        row("Nurse", "01/05/2024 08:00 AM", "01/05/2024 11:00 PM", "Alice"),
    ]);
    let (summary, report) = audit(&input);

    // la ligne d'Alice est absorbée par la lecture anticipée
    assert_eq!(report, format!("{REPORT_HEADER}\n"));
    assert_eq!(summary.records, 1);
    assert_eq!(summary.consumed_by_lookahead, 1);
}

#[test]
fn blank_first_line_is_the_header() {
    let input = format!(
        "\n{}\n",
        row("Nurse", "01/01/2024 08:00 AM", "01/01/2024 11:00 PM", "Alice")
    );
    let (summary, report) = audit(&input);

    assert_eq!(summary.records, 1);
    assert_eq!(summary.long_shift, 1);
    assert!(report.ends_with("Alice (Position: Nurse) worked for more than 14 hours in a single shift.\n"));
}

#[test]
fn blank_first_line_with_crlf_is_the_header() {
    let input = format!(
        "\r\n{}\r\n",
        row("Nurse", "01/01/2024 08:00 AM", "01/01/2024 11:00 PM", "Alice")
    );
    let (summary, _) = audit(&input);
    assert_eq!(summary.rows_read, 1);
    assert_eq!(summary.long_shift, 1);
}

struct KindOnly;

impl ViolationRenderer for KindOnly {
    fn render(&self, violation: &Violation) -> String {
        let kind = match violation.kind {
            ViolationKind::ConsecutiveDays { streak_days } => format!("streak={streak_days}"),
            ViolationKind::ShortRest { gap_hours } => format!("rest={gap_hours}"),
            ViolationKind::LongShift { hours } => format!("long={hours}"),
        };
        format!("{};{kind}", violation.employee)
    }
}

#[test]
fn custom_renderer_controls_report_lines() {
    let input = mixed_timecard();
    let (_, out) = Pipeline::default()
        .with_renderer(KindOnly)
        .run_readers(input.as_bytes(), input.as_bytes(), Vec::new())
        .unwrap();

    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![REPORT_HEADER, "Bob;rest=7", "Alice;streak=2", "Alice;long=15"]
    );
}

#[test]
fn empty_input_still_writes_header() {
    let (summary, report) = audit("");
    assert_eq!(report, format!("{REPORT_HEADER}\n"));
    assert_eq!(summary, RunSummary::default());
}

#[test]
fn crlf_input_is_accepted() {
    let input = mixed_timecard().replace('\n', "\r\n");
    let (summary, _) = audit(&input);
    assert_eq!(summary.violations(), 3);
}

#[test]
fn file_run_is_idempotent() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Assignment_Timecard.csv");
    let output = dir.path().join("output.txt");
    fs::write(&input, mixed_timecard()).unwrap();

    let pipeline = Pipeline::default();
    let first = pipeline.run_paths(&input, &output).unwrap();
    let bytes_first = fs::read(&output).unwrap();
    let second = pipeline.run_paths(&input, &output).unwrap();
    let bytes_second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert_eq!(bytes_first, bytes_second);
    assert!(String::from_utf8(bytes_first)
        .unwrap()
        .starts_with(REPORT_HEADER));
}

#[test]
fn missing_input_is_fatal_and_leaves_output_alone() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("output.txt");
    fs::write(&output, "previous report\n").unwrap();

    let err = Pipeline::default()
        .run_paths(dir.path().join("absent.csv"), &output)
        .unwrap_err();
    assert!(matches!(err, AuditError::OpenInput { .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous report\n");
    // aucun fichier temporaire oublié
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn unwritable_output_is_fatal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Assignment_Timecard.csv");
    fs::write(&input, mixed_timecard()).unwrap();

    let err = Pipeline::default()
        .run_paths(&input, dir.path().join("missing-dir").join("output.txt"))
        .unwrap_err();
    assert!(matches!(err, AuditError::CreateReport { .. }));
}
