use crate::audit::{AuditError, AuditOptions};
use crate::model::{Violation, ViolationKind};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// En-tête écrit une seule fois, avant toute violation.
pub const REPORT_HEADER: &str =
    "Employee Name,Position,Consecutive Days Worked,Hours Between Shifts,Single Shift Duration";

/// Nombre de jours annoncé dans le message, quelle que soit la longueur réelle.
pub const REPORTED_STREAK_DAYS: u32 = 7;

/// Permet de customiser le rendu d'une violation (texte, CSV, etc.).
pub trait ViolationRenderer {
    fn render(&self, violation: &Violation) -> String;
}

/// Phrases du rapport texte.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    max_gap_hours: u32,
    max_shift_hours: u32,
}

impl TextRenderer {
    pub fn new(opts: &AuditOptions) -> Self {
        Self {
            max_gap_hours: opts.max_gap_hours,
            max_shift_hours: opts.max_shift_hours,
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(&AuditOptions::default())
    }
}

impl ViolationRenderer for TextRenderer {
    fn render(&self, violation: &Violation) -> String {
        let who = format!(
            "{name} (Position: {position})",
            name = violation.employee,
            position = violation.position
        );
        match violation.kind {
            ViolationKind::ConsecutiveDays { .. } => {
                format!("{who} worked for {REPORTED_STREAK_DAYS} consecutive days.")
            }
            ViolationKind::ShortRest { .. } => format!(
                "{who} has less than {} hours between shifts.",
                self.max_gap_hours
            ),
            ViolationKind::LongShift { .. } => format!(
                "{who} worked for more than {} hours in a single shift.",
                self.max_shift_hours
            ),
        }
    }
}

/// Écrit le rapport ligne à ligne ; seul propriétaire de la sortie.
pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_header(&mut self) -> Result<(), AuditError> {
        self.write_line(REPORT_HEADER)
    }

    pub fn write_line(&mut self, line: &str) -> Result<(), AuditError> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W, AuditError> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Rapport fichier, remplacé de manière atomique à la fin du run.
///
/// Tant que [`FileReport::persist`] n'est pas appelé, la sortie existante reste
/// intacte ; le fichier temporaire est supprimé au drop.
pub struct FileReport {
    path: PathBuf,
    writer: ReportWriter<BufWriter<NamedTempFile>>,
}

impl FileReport {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir).map_err(|source| AuditError::CreateReport {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            writer: ReportWriter::new(BufWriter::new(tmp)),
        })
    }

    pub fn writer(&mut self) -> &mut ReportWriter<BufWriter<NamedTempFile>> {
        &mut self.writer
    }

    pub fn persist(self) -> Result<PathBuf, AuditError> {
        let tmp = self
            .writer
            .finish()?
            .into_inner()
            .map_err(|e| AuditError::Write(e.into_error()))?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| AuditError::PersistReport {
                path: self.path.clone(),
                source: e.error,
            })?;
        Ok(self.path)
    }
}
