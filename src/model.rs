use chrono::NaiveDateTime;

/// Un shift valide extrait d'une ligne du fichier de pointage.
///
/// Les deux horodatages sont toujours présents : une ligne sans début ou sans
/// fin n'est jamais convertie en `ShiftRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRecord {
    pub employee: String,
    pub position: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ShiftRecord {
    pub fn new<E: Into<String>, P: Into<String>>(
        employee: E,
        position: P,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            employee: employee.into(),
            position: position.into(),
            start,
            end,
        }
    }

    /// Durée en heures entières (troncature vers zéro).
    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Nombre de jours suivant immédiatement le shift courant.
    ConsecutiveDays { streak_days: u32 },
    /// Repos trop court avant la « prochaine » prise de poste.
    ShortRest { gap_hours: i64 },
    LongShift { hours: i64 },
}

/// Violation détectée pour un shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub employee: String,
    pub position: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(record: &ShiftRecord, kind: ViolationKind) -> Self {
        Self {
            employee: record.employee.clone(),
            position: record.position.clone(),
            kind,
        }
    }
}
