mod consecutive;
mod duration;
mod gaps;
mod types;
mod util;

pub use consecutive::NO_SHIFT_END;
pub use gaps::ShiftIndex;
pub use types::{AuditError, AuditOptions};

use crate::io::RowCursor;
use crate::model::{ShiftRecord, Violation, ViolationKind};
use std::io::Read;

/// Auditor : applique les trois règles à chaque shift lu.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    opts: AuditOptions,
}

impl Auditor {
    pub fn new(opts: AuditOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &AuditOptions {
        &self.opts
    }

    /// Jours consécutifs : consomme les lignes suivantes du curseur partagé.
    pub fn consecutive_days<R: Read>(
        &self,
        record: &ShiftRecord,
        cursor: &mut RowCursor<R>,
    ) -> Result<Option<Violation>, AuditError> {
        let streak_days = consecutive::streak_after(record, cursor)?;
        Ok((streak_days > 0)
            .then(|| Violation::new(record, ViolationKind::ConsecutiveDays { streak_days })))
    }

    /// Repos insuffisant avant la prochaine prise de poste connue de l'index.
    pub fn short_rest(&self, record: &ShiftRecord, index: &ShiftIndex) -> Option<Violation> {
        let gap_hours = gaps::rest_hours(record, index)?;
        util::strictly_between(gap_hours, self.opts.min_gap_hours, self.opts.max_gap_hours)
            .then(|| Violation::new(record, ViolationKind::ShortRest { gap_hours }))
    }

    pub fn long_shift(&self, record: &ShiftRecord) -> Option<Violation> {
        let hours = duration::shift_hours(record);
        (hours > i64::from(self.opts.max_shift_hours))
            .then(|| Violation::new(record, ViolationKind::LongShift { hours }))
    }

    /// Les trois règles, dans l'ordre du rapport.
    pub fn audit_record<R: Read>(
        &self,
        record: &ShiftRecord,
        cursor: &mut RowCursor<R>,
        index: &ShiftIndex,
    ) -> Result<Vec<Violation>, AuditError> {
        let mut out = Vec::new();
        out.extend(self.consecutive_days(record, cursor)?);
        out.extend(self.short_rest(record, index));
        out.extend(self.long_shift(record));
        Ok(out)
    }
}
