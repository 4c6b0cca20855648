use chrono::NaiveDateTime;
use thiserror::Error;

/// Format unique accepté : `MM/DD/YYYY hh:mm AM|PM` (horloge 12 h).
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Valeur « d'en-tête » rencontrée à la place d'un horodatage.
pub const SENTINEL: &str = "Time";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("empty timestamp")]
    Blank,
    #[error("sentinel value {0:?} is not a timestamp")]
    Sentinel(String),
    #[error("unparseable timestamp {raw:?}: {source}")]
    Malformed {
        raw: String,
        source: chrono::ParseError,
    },
}

/// Parse un horodatage en exposant la raison de l'échec.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    if raw.trim().is_empty() {
        return Err(TimestampError::Blank);
    }
    if raw.eq_ignore_ascii_case(SENTINEL) {
        return Err(TimestampError::Sentinel(raw.to_string()));
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|source| {
        TimestampError::Malformed {
            raw: raw.to_string(),
            source,
        }
    })
}

/// Version tolérante : `None` pour vide, sentinelle ou format invalide.
pub fn normalize(raw: &str) -> Option<NaiveDateTime> {
    parse_timestamp(raw).ok()
}
