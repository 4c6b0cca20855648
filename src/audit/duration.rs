use super::util;
use crate::model::ShiftRecord;

pub(super) fn shift_hours(record: &ShiftRecord) -> i64 {
    util::whole_hours(record.start, record.end)
}
