use chrono::NaiveDateTime;

/// Heures entières écoulées de `from` à `to` (troncature vers zéro, signée).
pub(super) fn whole_hours(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_hours()
}

/// Strictement entre les deux bornes.
pub(super) fn strictly_between(value: i64, low: u32, high: u32) -> bool {
    value > i64::from(low) && value < i64::from(high)
}

pub(super) fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}
