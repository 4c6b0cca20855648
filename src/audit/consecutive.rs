use super::{util, AuditError};
use crate::io::{RawRow, RowCursor, END_COL, EMPLOYEE_COL, START_COL};
use crate::model::ShiftRecord;
use crate::timestamp::normalize;
use chrono::{Duration, NaiveDateTime};
use std::io::Read;

/// Fin de shift « vide » exportée par la pointeuse.
pub const NO_SHIFT_END: &str = "0:00";

/// Lignes regardées par la lecture anticipée.
enum Lookahead<'a> {
    /// Ligne sans shift exploitable : on continue.
    Ignored,
    Candidate {
        employee: Option<&'a str>,
        start: Option<NaiveDateTime>,
    },
}

fn classify(row: &RawRow) -> Lookahead<'_> {
    let (Some(start), Some(end)) = (row.get(START_COL), row.get(END_COL)) else {
        return Lookahead::Ignored;
    };
    if start.is_empty() || end.is_empty() || end == NO_SHIFT_END {
        return Lookahead::Ignored;
    }
    Lookahead::Candidate {
        employee: row.get(EMPLOYEE_COL),
        start: normalize(start),
    }
}

/// Compte les jours qui suivent immédiatement `record`, en consommant le curseur.
///
/// La première ligne exploitable qui ne correspond pas (autre employé, autre
/// jour, date illisible) arrête la série ; elle est consommée elle aussi.
pub(super) fn streak_after<R: Read>(
    record: &ShiftRecord,
    cursor: &mut RowCursor<R>,
) -> Result<u32, AuditError> {
    let mut expected = record.start + Duration::days(1);
    let mut streak = 0u32;

    while let Some(row) = cursor.next_row()? {
        match classify(&row) {
            Lookahead::Ignored => continue,
            Lookahead::Candidate {
                employee: Some(employee),
                start: Some(start),
            } if employee == record.employee && util::same_day(start, expected) => {
                streak += 1;
                expected += Duration::days(1);
            }
            Lookahead::Candidate { .. } => break,
        }
    }

    Ok(streak)
}
