#![forbid(unsafe_code)]
//! Timecard audit — bibliothèque d'audit de pointages (CSV, sans BD).
//!
//! - Lecture CSV ligne à ligne, sans quoting.
//! - Trois règles : jours consécutifs, repos entre deux shifts, shift trop long.
//! - Rapport texte, une ligne par violation, dans l'ordre de détection.
//! - Horodatages naïfs (`MM/DD/YYYY hh:mm AM|PM`), aucun fuseau.

pub mod audit;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod timestamp;

pub use audit::{AuditError, AuditOptions, Auditor, ShiftIndex};
pub use io::{parse_record, RawRow, RowCursor, SkipReason};
pub use model::{ShiftRecord, Violation, ViolationKind};
pub use pipeline::{Pipeline, RunSummary, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use report::{ReportWriter, TextRenderer, ViolationRenderer, REPORT_HEADER};
pub use timestamp::{normalize, parse_timestamp, TimestampError, TIMESTAMP_FORMAT};
