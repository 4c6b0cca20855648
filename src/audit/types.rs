use std::path::PathBuf;
use thiserror::Error;

/// Seuils des règles (bornes exclusives).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    pub min_gap_hours: u32,
    pub max_gap_hours: u32,
    pub max_shift_hours: u32,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            min_gap_hours: 1,
            max_gap_hours: 10,
            max_shift_hours: 14,
        }
    }
}

impl AuditOptions {
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.min_gap_hours >= self.max_gap_hours {
            return Err(AuditError::InvalidOptions(
                "min_gap_hours must be below max_gap_hours",
            ));
        }
        if self.max_shift_hours == 0 {
            return Err(AuditError::InvalidOptions("max_shift_hours must be > 0"));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("cannot open timecard file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot create report {}: {source}", .path.display())]
    CreateReport {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot persist report {}: {source}", .path.display())]
    PersistReport {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("reading timecard rows: {0}")]
    Read(#[from] csv::Error),
    #[error("writing report: {0}")]
    Write(#[from] std::io::Error),
    #[error("invalid audit options: {0}")]
    InvalidOptions(&'static str),
}
