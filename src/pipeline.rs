use crate::audit::{AuditError, AuditOptions, Auditor, ShiftIndex};
use crate::io::{parse_record, RowCursor};
use crate::model::{Violation, ViolationKind};
use crate::report::{FileReport, ReportWriter, TextRenderer, ViolationRenderer};
use std::io::{Read, Write};
use std::path::Path;
#[cfg(feature = "serde")]
use anyhow::Context;
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, info, warn};

/// Fichier de pointage lu quand aucun chemin n'est donné.
pub const DEFAULT_INPUT: &str = "Assignment_Timecard.csv";
/// Rapport écrit quand aucun chemin n'est donné.
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Compteurs d'un run (diagnostic uniquement, hors rapport).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunSummary {
    /// Lignes lues par le curseur principal, en-tête exclu.
    pub rows_read: u64,
    pub records: u64,
    pub skipped: u64,
    /// Lignes absorbées par la lecture anticipée des jours consécutifs.
    pub consumed_by_lookahead: u64,
    pub consecutive_days: u64,
    pub short_rest: u64,
    pub long_shift: u64,
    pub longest_streak: u32,
}

impl RunSummary {
    pub fn violations(&self) -> u64 {
        self.consecutive_days + self.short_rest + self.long_shift
    }

    fn record(&mut self, violation: &Violation) {
        match violation.kind {
            ViolationKind::ConsecutiveDays { streak_days } => {
                self.consecutive_days += 1;
                self.longest_streak = self.longest_streak.max(streak_days);
            }
            ViolationKind::ShortRest { .. } => self.short_rest += 1,
            ViolationKind::LongShift { .. } => self.long_shift += 1,
        }
    }
}

/// Pilote : lecture séquentielle, règles, rapport.
pub struct Pipeline {
    auditor: Auditor,
    renderer: Box<dyn ViolationRenderer>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(AuditOptions::default())
    }
}

impl Pipeline {
    pub fn new(opts: AuditOptions) -> Self {
        Self {
            auditor: Auditor::new(opts),
            renderer: Box::new(TextRenderer::new(&opts)),
        }
    }

    pub fn with_renderer<V: ViolationRenderer + 'static>(mut self, renderer: V) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn auditor(&self) -> &Auditor {
        &self.auditor
    }

    /// Audite `input` et remplace `output` par le rapport complet.
    pub fn run_paths<I: AsRef<Path>, O: AsRef<Path>>(
        &self,
        input: I,
        output: O,
    ) -> Result<RunSummary, AuditError> {
        let input = input.as_ref();
        self.auditor.options().validate()?;

        let mut cursor = RowCursor::from_path(input)?;
        let mut report = FileReport::create(output)?;
        let index = ShiftIndex::build(RowCursor::from_path(input)?)?;
        debug!(employees = index.len(), "gap index built");

        let summary = self.drive(&mut cursor, &index, report.writer())?;
        let path = report.persist()?;
        info!(report = %path.display(), ?summary, "audit complete");
        Ok(summary)
    }

    /// Variante en mémoire : `rows` est lu par le pilote, `index_source` par la
    /// passe indépendante ; les deux doivent contenir les mêmes données.
    pub fn run_readers<R: Read, S: Read, W: Write>(
        &self,
        rows: R,
        index_source: S,
        out: W,
    ) -> Result<(RunSummary, W), AuditError> {
        self.auditor.options().validate()?;
        let index = ShiftIndex::build(RowCursor::from_reader(index_source))?;
        let mut cursor = RowCursor::from_reader(rows);
        let mut report = ReportWriter::new(out);
        let summary = self.drive(&mut cursor, &index, &mut report)?;
        Ok((summary, report.finish()?))
    }

    fn drive<R: Read, W: Write>(
        &self,
        cursor: &mut RowCursor<R>,
        index: &ShiftIndex,
        report: &mut ReportWriter<W>,
    ) -> Result<RunSummary, AuditError> {
        report.write_header()?;
        let mut summary = RunSummary::default();
        if !cursor.skip_header()? {
            return Ok(summary);
        }

        while let Some(row) = cursor.next_row()? {
            let record = match parse_record(&row) {
                Ok(record) => record,
                Err(reason) => {
                    summary.skipped += 1;
                    if reason.is_malformed() {
                        warn!(line = row.line(), %reason, "skipping row");
                    } else {
                        info!(line = row.line(), %reason, "skipping row");
                    }
                    continue;
                }
            };
            summary.records += 1;

            let before = cursor.rows_read();
            let violations = self.auditor.audit_record(&record, cursor, index)?;
            summary.consumed_by_lookahead += cursor.rows_read() - before;

            for violation in &violations {
                let line = self.renderer.render(violation);
                if matches!(violation.kind, ViolationKind::LongShift { .. }) {
                    info!("{line}");
                }
                report.write_line(&line)?;
                summary.record(violation);
            }
        }

        summary.rows_read = cursor.rows_read().saturating_sub(1);
        Ok(summary)
    }
}

/// Export JSON du résumé (jolie mise en forme).
#[cfg(feature = "serde")]
pub fn export_summary_json<P: AsRef<Path>>(path: P, summary: &RunSummary) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).with_context(|| format!("writing summary {}", path.display()))?;
    Ok(())
}
