#![allow(dead_code)]

pub const HEADER: &str = "Position ID,Position Status,Time,Time Out,Timecard Hours (as Time),Pay Cycle Start Date,Pay Cycle End Date,Employee Name,File Number";

/// Ligne de pointage au format de l'export (nom en colonne 7).
pub fn row(position: &str, start: &str, end: &str, name: &str) -> String {
    format!("WFS000001,{position},{start},{end},8:00,01/01/2024,01/14/2024,{name},FN1")
}

pub fn file(rows: &[String]) -> String {
    let mut out = String::from(HEADER);
    for r in rows {
        out.push('\n');
        out.push_str(r);
    }
    out.push('\n');
    out
}
