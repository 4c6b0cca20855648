use crate::audit::AuditError;
use crate::model::ShiftRecord;
use crate::timestamp::{parse_timestamp, TimestampError};
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

pub const POSITION_COL: usize = 1;
pub const START_COL: usize = 2;
pub const END_COL: usize = 3;
pub const EMPLOYEE_COL: usize = 7;
/// Nombre minimal de champs pour qu'une ligne soit un shift.
pub const MIN_FIELDS: usize = EMPLOYEE_COL + 1;

/// Ligne brute découpée sur `,` (pas de quoting).
///
/// Les champs vides en fin de ligne sont ignorés : `a,b,,` compte 2 champs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    line: u64,
    fields: Vec<String>,
}

impl RawRow {
    /// Découpe une ligne de texte telle qu'elle apparaît dans le fichier.
    pub fn from_line(line: u64, raw: &str) -> Self {
        Self::from_fields(line, raw.split(',').map(str::to_string).collect())
    }

    fn from_record(line: u64, record: &ByteRecord) -> Self {
        let fields = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        Self::from_fields(line, fields)
    }

    fn from_fields(line: u64, mut fields: Vec<String>) -> Self {
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        Self { line, fields }
    }

    /// Numéro de ligne (1 = en-tête) quand il est connu.
    pub fn line(&self) -> u64 {
        self.line
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Curseur de lecture partagé sur le fichier de pointage.
///
/// Toute ligne rendue par [`RowCursor::next_row`] est consommée : un appelant
/// qui passe le curseur à une règle reprend la lecture *après* les lignes que
/// cette règle a lues.
pub struct RowCursor<R> {
    reader: csv::Reader<BufReader<R>>,
    buf: ByteRecord,
    rows_read: u64,
    /// Lignes physiques lues hors du lecteur CSV (en-tête).
    line_offset: u64,
}

impl RowCursor<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AuditError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: std::io::Read> RowCursor<R> {
    pub fn from_reader(rdr: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(b',')
            .from_reader(BufReader::new(rdr));
        Self {
            reader,
            buf: ByteRecord::new(),
            rows_read: 0,
            line_offset: 0,
        }
    }

    /// Lit la ligne suivante ; `None` en fin de fichier.
    pub fn next_row(&mut self) -> Result<Option<RawRow>, AuditError> {
        if !self.reader.read_byte_record(&mut self.buf)? {
            return Ok(None);
        }
        self.rows_read += 1;
        let line = self
            .buf
            .position()
            .map(|pos| pos.line() + self.line_offset)
            .unwrap_or(self.rows_read);
        Ok(Some(RawRow::from_record(line, &self.buf)))
    }

    /// Saute la première ligne physique (en-tête), même vide, sans la regarder.
    ///
    /// Le lecteur CSV ignore les lignes vides : la ligne est donc consommée
    /// directement sur la source, avant toute lecture CSV. Appelée après
    /// [`RowCursor::next_row`], elle saute simplement la ligne suivante.
    pub fn skip_header(&mut self) -> Result<bool, AuditError> {
        if self.rows_read > 0 {
            return Ok(self.next_row()?.is_some());
        }
        let seen = skip_line(self.reader.get_mut()).map_err(csv::Error::from)?;
        if seen {
            self.rows_read += 1;
            self.line_offset += 1;
        }
        Ok(seen)
    }

    /// Nombre de lignes consommées depuis l'ouverture.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl<R: std::io::Read> Iterator for RowCursor<R> {
    type Item = Result<RawRow, AuditError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// Consomme une ligne terminée par `\n`, `\r\n` ou `\r` ; faux si la source est vide.
fn skip_line<B: BufRead>(src: &mut B) -> std::io::Result<bool> {
    let mut seen = false;
    loop {
        let (consumed, terminator) = {
            let buf = src.fill_buf()?;
            if buf.is_empty() {
                return Ok(seen);
            }
            match buf.iter().position(|b| *b == b'\n' || *b == b'\r') {
                Some(i) => (i + 1, Some(buf[i])),
                None => (buf.len(), None),
            }
        };
        seen = true;
        src.consume(consumed);
        match terminator {
            Some(b'\r') => {
                if src.fill_buf()?.first() == Some(&b'\n') {
                    src.consume(1);
                }
                return Ok(true);
            }
            Some(_) => return Ok(true),
            None => {}
        }
    }
}

/// Raison pour laquelle une ligne n'a pas produit de shift.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("expected at least {} fields, found {0}", MIN_FIELDS)]
    TooFewFields(usize),
    #[error("empty start time field")]
    EmptyStart,
    #[error("empty end time field")]
    EmptyEnd,
    #[error("invalid start time: {0}")]
    InvalidStart(TimestampError),
    #[error("invalid end time: {0}")]
    InvalidEnd(TimestampError),
}

impl SkipReason {
    /// Vrai quand un horodatage était présent mais illisible.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            SkipReason::InvalidStart(TimestampError::Malformed { .. })
                | SkipReason::InvalidEnd(TimestampError::Malformed { .. })
        )
    }
}

/// Convertit une ligne brute en shift, ou indique pourquoi elle est ignorée.
pub fn parse_record(row: &RawRow) -> Result<ShiftRecord, SkipReason> {
    if row.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields(row.len()));
    }
    let field = |idx| row.get(idx).unwrap_or("");

    let (start_raw, end_raw) = (field(START_COL), field(END_COL));
    if start_raw.is_empty() {
        return Err(SkipReason::EmptyStart);
    }
    if end_raw.is_empty() {
        return Err(SkipReason::EmptyEnd);
    }
    let start = parse_timestamp(start_raw).map_err(SkipReason::InvalidStart)?;
    let end = parse_timestamp(end_raw).map_err(SkipReason::InvalidEnd)?;
    Ok(ShiftRecord::new(
        field(EMPLOYEE_COL),
        field(POSITION_COL),
        start,
        end,
    ))
}
