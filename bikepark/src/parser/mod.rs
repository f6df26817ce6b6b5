//! Parsers des deux formes d'export (structurée et WKT historique)

pub mod legacy;
pub mod structured;

use tracing::{debug, trace, warn};

use crate::types::{ParkingType, PointRecord, RowShape};
use crate::SurveyError;

/// Options de parsing
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// La première ligne non vide est un en-tête de colonnes
    pub skip_header: bool,
}

/// Enregistrement WKT dont la capacité est attendue sur la ligne suivante
#[derive(Debug)]
struct PendingRecord(PointRecord);

/// Accumulateur ligne à ligne
#[derive(Debug, Default)]
struct Accumulator {
    records: Vec<PointRecord>,
    pending: Option<PendingRecord>,
}

impl Accumulator {
    /// Émet l'enregistrement en attente tel quel
    fn flush(&mut self) {
        if let Some(PendingRecord(record)) = self.pending.take() {
            self.records.push(record);
        }
    }

    fn push_legacy(&mut self, record: PointRecord) {
        self.flush();
        if record.capacity.is_none() && record.parking_type != ParkingType::RepairStation {
            trace!(line = record.line, "Capacity expected on continuation row");
            self.pending = Some(PendingRecord(record));
        } else {
            self.records.push(record);
        }
    }

    fn continuation(&mut self, line: usize, row: &str) -> Result<(), SurveyError> {
        match self.pending.take() {
            Some(PendingRecord(mut record)) => {
                record.capacity = Some(legacy::parse_continuation(line, row)?);
                self.records.push(record);
            }
            None => warn!(line, "Continuation row without pending record, ignored"),
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<PointRecord> {
        self.flush();
        self.records
    }
}

/// Détecte la forme d'un fichier depuis sa première ligne de données
pub fn detect_shape(first_row: &str) -> RowShape {
    if legacy::is_record_start(first_row) {
        RowShape::LegacyWkt
    } else {
        RowShape::Structured
    }
}

/// Parse le contenu texte d'un export, dans l'ordre des lignes
pub fn parse_str(content: &str, options: &ParseOptions) -> Result<Vec<PointRecord>, SurveyError> {
    let mut rows = content
        .lines()
        .enumerate()
        .map(|(i, row)| (i + 1, row.trim_end_matches('\r')))
        .filter(|(_, row)| !row.trim().is_empty())
        .peekable();

    if options.skip_header {
        if let Some((line, header)) = rows.next() {
            debug!(line, header, "Skipping header row");
        }
    }

    let shape = match rows.peek() {
        Some((_, first)) => detect_shape(first),
        None => return Err(SurveyError::EmptyInput),
    };
    debug!(?shape, "Detected row shape");

    if shape == RowShape::Structured {
        return structured::parse_records(content, options);
    }

    let mut acc = Accumulator::default();
    for (line, row) in rows {
        if legacy::is_record_start(row) {
            acc.push_legacy(legacy::parse_start_row(line, row)?);
        } else {
            acc.continuation(line, row)?;
        }
    }

    Ok(acc.finish())
}

/// Parse une coordonnée décimale
pub(crate) fn parse_coord(line: usize, field: &'static str, value: &str) -> Result<f64, SurveyError> {
    let value = value.trim();
    fast_float::parse(value).map_err(|_| SurveyError::invalid_number(line, field, value))
}

/// Parse une capacité entière
pub(crate) fn parse_capacity(line: usize, value: &str) -> Result<u32, SurveyError> {
    let value = value.trim();
    value
        .parse()
        .map_err(|_| SurveyError::invalid_number(line, "capacity", value))
}
