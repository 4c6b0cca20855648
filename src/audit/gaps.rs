use super::{util, AuditError};
use crate::io::{RowCursor, EMPLOYEE_COL, MIN_FIELDS, START_COL};
use crate::model::ShiftRecord;
use crate::timestamp::normalize;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Premier début de shift valide de chaque employé, dans l'ordre du fichier.
///
/// Construit en une passe indépendante du curseur principal, depuis la toute
/// première ligne (en-tête comprise). Pour un employé donné, la « prochaine »
/// prise de poste est toujours la première occurrence du fichier.
#[derive(Debug, Clone, Default)]
pub struct ShiftIndex {
    first_start: HashMap<String, NaiveDateTime>,
}

impl ShiftIndex {
    pub fn build<R: Read>(cursor: RowCursor<R>) -> Result<Self, AuditError> {
        let mut index = Self::default();
        for row in cursor {
            let row = row?;
            if row.len() < MIN_FIELDS {
                debug!(line = row.line(), fields = ?row.fields(), "gap index: skipping short row");
                continue;
            }
            let employee = row.get(EMPLOYEE_COL).unwrap_or("");
            if let Some(start) = row.get(START_COL).and_then(normalize) {
                index.insert(employee, start);
            }
        }
        Ok(index)
    }

    /// Enregistre `start` sauf si l'employé a déjà une occurrence.
    pub fn insert<S: Into<String>>(&mut self, employee: S, start: NaiveDateTime) {
        self.first_start.entry(employee.into()).or_insert(start);
    }

    pub fn first_start(&self, employee: &str) -> Option<NaiveDateTime> {
        self.first_start.get(employee).copied()
    }

    pub fn len(&self) -> usize {
        self.first_start.len()
    }
    pub fn is_empty(&self) -> bool {
        self.first_start.is_empty()
    }
}

/// Heures (tronquées) entre la fin de `record` et la prochaine prise de poste.
pub(super) fn rest_hours(record: &ShiftRecord, index: &ShiftIndex) -> Option<i64> {
    index
        .first_start(&record.employee)
        .map(|next| util::whole_hours(record.end, next))
}
