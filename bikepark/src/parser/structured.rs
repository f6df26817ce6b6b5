//! Parser pour l'export structuré (CSV)
//!
//! Format positionnel, séparé par des virgules, champs éventuellement entre
//! guillemets (exports tableur):
//! `longitude,latitude,type,capacité,obstruction,vue_dégagée,vue_entrée`

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::parser::{parse_capacity, parse_coord, ParseOptions};
use crate::types::{Obstruction, ParkingType, PointRecord};
use crate::SurveyError;

/// Parse un export structuré complet, dans l'ordre du fichier
pub fn parse_records(content: &str, options: &ParseOptions) -> Result<Vec<PointRecord>, SurveyError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(options.skip_header)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        // Ligne ne contenant que des espaces
        if row.iter().all(str::is_empty) {
            continue;
        }
        let line = row.position().map_or(0, |p| p.line() as usize);
        records.push(parse_record(line, &row)?);
    }

    Ok(records)
}

/// Parse un enregistrement CSV, champ par champ
pub fn parse_record(line: usize, row: &StringRecord) -> Result<PointRecord, SurveyError> {
    let mut fields = row.iter();

    let longitude = fields
        .next()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| SurveyError::missing_field(line, "longitude"))?;
    let latitude = fields
        .next()
        .ok_or_else(|| SurveyError::missing_field(line, "latitude"))?;
    let label = fields
        .next()
        .ok_or_else(|| SurveyError::missing_field(line, "type"))?;

    let longitude = parse_coord(line, "longitude", longitude)?;
    let latitude = parse_coord(line, "latitude", latitude)?;
    let parking_type = ParkingType::from_label(label);

    // La capacité n'a pas de sens pour une station de réparation
    let capacity = match fields.next() {
        Some(value) if parking_type != ParkingType::RepairStation && !value.is_empty() => {
            Some(parse_capacity(line, value)?)
        }
        _ => None,
    };

    let mut record = PointRecord::new(line, longitude, latitude, parking_type, capacity);
    record.obstruction = fields.next().map(Obstruction::from_label);
    record.within_plain_sight = fields.next().map(parse_flag);
    record.within_view_of_entrance = fields.next().map(parse_flag);

    Ok(record)
}

/// Seul le littéral "1" vaut vrai
fn parse_flag(value: &str) -> bool {
    value == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_row(content: &str) -> Result<PointRecord, SurveyError> {
        let mut records = parse_records(content, &ParseOptions::default())?;
        assert_eq!(records.len(), 1);
        Ok(records.remove(0))
    }

    #[test]
    fn test_parse_full_row() {
        let record = parse_row("-105.1,39.7,Bollard,1,none,1,1").unwrap();
        assert_eq!(record.longitude, -105.1);
        assert_eq!(record.latitude, 39.7);
        assert_eq!(record.parking_type, ParkingType::Bollard);
        assert_eq!(record.capacity, Some(1));
        assert_eq!(record.obstruction, Some(Obstruction::None));
        assert_eq!(record.within_plain_sight, Some(true));
        assert_eq!(record.within_view_of_entrance, Some(true));
        assert_eq!(record.line, 1);
    }

    #[test]
    fn test_quoted_fields() {
        let record =
            parse_row(r#"-105.1,39.7,"Inverted U",4,"Payment Required",1,1"#).unwrap();
        assert_eq!(record.parking_type, ParkingType::InvertedU);
        assert_eq!(record.capacity, Some(4));
        assert_eq!(record.obstruction, Some(Obstruction::PaymentRequired));
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = parse_row(" -105.1 , 39.7 , Wave , 6 ").unwrap();
        assert_eq!(record.parking_type, ParkingType::Wave);
        assert_eq!(record.capacity, Some(6));
    }

    #[test]
    fn test_parse_flags_only_literal_one() {
        let record = parse_row("-105.1,39.7,Wave,6,Medium,yes,").unwrap();
        assert_eq!(record.obstruction, Some(Obstruction::Medium));
        assert_eq!(record.within_plain_sight, Some(false));
        assert_eq!(record.within_view_of_entrance, Some(false));
    }

    #[test]
    fn test_repair_station_ignores_capacity() {
        let record = parse_row("-105.1,39.7,Repair Station,12,none,1,0").unwrap();
        assert_eq!(record.parking_type, ParkingType::RepairStation);
        assert_eq!(record.capacity, None);

        // Même une valeur non numérique est ignorée
        let record = parse_row("-105.1,39.7,Repair Station,n/a,none,1,0").unwrap();
        assert_eq!(record.capacity, None);
    }

    #[test]
    fn test_unknown_label() {
        let record = parse_row("-105.1,39.7,garbage,2,none,0,0").unwrap();
        assert_eq!(record.parking_type, ParkingType::Unknown);
        assert_eq!(record.capacity, Some(2));
    }

    #[test]
    fn test_empty_capacity_is_absent() {
        let record = parse_row("-105.1,39.7,Inverted U,,low,1,1").unwrap();
        assert_eq!(record.capacity, None);
        assert!(!record.is_valid_for_upload());
    }

    #[test]
    fn test_short_row_has_no_extended_attributes() {
        let record = parse_row("-105.1,39.7,Spiral,3").unwrap();
        assert_eq!(record.capacity, Some(3));
        assert_eq!(record.obstruction, None);
        assert_eq!(record.within_plain_sight, None);
    }

    #[test]
    fn test_rows_of_varying_length() {
        let content = "-105.1,39.7,Spiral,3\n-105.2,39.8,Bollard,1,none,1,1\n";
        let records = parse_records(content, &ParseOptions::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].line, 2);
    }

    #[test]
    fn test_invalid_capacity_is_fatal() {
        let content = "-105.1,39.7,Bollard,1,none,1,1\n-105.1,39.7,Bollard,two,none,1,1\n";
        let err = parse_records(content, &ParseOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InvalidNumber { line: 2, field: "capacity", .. }
        ));
    }

    #[test]
    fn test_invalid_coordinate_is_fatal() {
        let err = parse_row("abc,39.7,Bollard,1").unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InvalidNumber { line: 1, field: "longitude", .. }
        ));
    }

    #[test]
    fn test_missing_label() {
        let err = parse_row("-105.1,39.7").unwrap_err();
        assert!(matches!(err, SurveyError::MissingField { field: "type", .. }));
    }
}
