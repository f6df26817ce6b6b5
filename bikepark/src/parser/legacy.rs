//! Parser pour l'ancien export WKT
//!
//! Une ligne d'ouverture commence par `"POINT` et se découpe sur les espaces:
//!
//! ```text
//! "POINT(-105.1 39.7,Bollard,Capacity: 2)"        -> 3 tokens
//! "POINT(-105.1 39.7,Inverted U,Capacity: 4)"     -> 4 tokens
//! "POINT(-105.1 39.7,Inverted U, Capacity: 4)"    -> 5 tokens
//! "POINT(-105.1 39.7,Inverted U,                  -> capacité sur la ligne suivante
//! Capacity: 4)"
//! ```

use crate::parser::{parse_capacity, parse_coord};
use crate::types::{ParkingType, PointRecord};
use crate::SurveyError;

/// Préfixe d'une ligne qui ouvre un enregistrement
pub const RECORD_PREFIX: &str = "\"POINT";

const CAPACITY_MARKER: &str = "Capacity:";

/// Indique si la ligne ouvre un nouvel enregistrement
pub fn is_record_start(row: &str) -> bool {
    row.starts_with(RECORD_PREFIX)
}

/// Parse une ligne d'ouverture
///
/// La capacité reste `None` si elle n'est pas sur cette ligne; l'appelant
/// décide alors s'il attend une ligne de continuation.
pub fn parse_start_row(line: usize, row: &str) -> Result<PointRecord, SurveyError> {
    let tokens: Vec<&str> = row.split(' ').filter(|t| !t.is_empty()).collect();

    // Token 0: "POINT(<lon>
    let longitude = tokens
        .first()
        .and_then(|t| t.split(['(', ')', ',']).nth(1))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SurveyError::missing_field(line, "longitude"))?;

    // Token 1: <lat>,<fragment de libellé>[,...]
    let mut payload = tokens
        .get(1)
        .ok_or_else(|| SurveyError::missing_field(line, "latitude"))?
        .split(['(', ')', ',']);
    let latitude = payload.next().unwrap_or_default();
    let fragment = payload.next().unwrap_or_default().trim_matches('"');

    let longitude = parse_coord(line, "longitude", longitude)?;
    let latitude = parse_coord(line, "latitude", latitude)?;
    let parking_type = resolve_label(fragment, tokens.get(2).copied());

    let capacity = if parking_type == ParkingType::RepairStation {
        None
    } else {
        match tokens.len() {
            // Ligne à largeur fixe: la capacité est toujours le dernier champ
            5 => Some(parse_capacity(line, strip_capacity(tokens[4]))?),
            3 | 4 if has_capacity_marker(tokens[tokens.len() - 2]) => Some(parse_capacity(
                line,
                strip_capacity(tokens[tokens.len() - 1]),
            )?),
            _ => None,
        }
    };

    Ok(PointRecord::new(
        line,
        longitude,
        latitude,
        parking_type,
        capacity,
    ))
}

/// Parse la capacité portée par une ligne de continuation
pub fn parse_continuation(line: usize, row: &str) -> Result<u32, SurveyError> {
    let value = row
        .split(' ')
        .filter(|t| !t.is_empty())
        .last()
        .ok_or_else(|| SurveyError::missing_field(line, "capacity"))?;
    parse_capacity(line, strip_capacity(value))
}

/// Reconstitue un libellé contenant un espace ("Inverted" + "U," -> "Inverted U")
///
/// Le token suivant n'est concaténé que si le résultat est un libellé connu.
fn resolve_label(fragment: &str, next_token: Option<&str>) -> ParkingType {
    if let Some(next) = next_token {
        let extension = next.split([',', ')', '"']).next().unwrap_or_default();
        if !extension.is_empty() {
            let candidate = ParkingType::from_label(&format!("{fragment} {extension}"));
            if candidate.is_known() {
                return candidate;
            }
        }
    }
    ParkingType::from_label(fragment)
}

fn has_capacity_marker(token: &str) -> bool {
    token
        .rsplit(',')
        .next()
        .is_some_and(|part| part.starts_with(CAPACITY_MARKER))
}

fn strip_capacity(value: &str) -> &str {
    value
        .trim()
        .trim_start_matches(CAPACITY_MARKER)
        .trim_end_matches(['"', ')', ','])
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_row_with_capacity() {
        let record = parse_start_row(1, r#""POINT(-105.1 39.7,Bollard,Capacity: 2)""#).unwrap();
        assert_eq!(record.longitude, -105.1);
        assert_eq!(record.latitude, 39.7);
        assert_eq!(record.parking_type, ParkingType::Bollard);
        assert_eq!(record.capacity, Some(2));
    }

    #[test]
    fn test_two_word_label_with_capacity() {
        let record =
            parse_start_row(1, r#""POINT(-105.1 39.7,Inverted U,Capacity: 4)""#).unwrap();
        assert_eq!(record.parking_type, ParkingType::InvertedU);
        assert_eq!(record.capacity, Some(4));
    }

    #[test]
    fn test_label_reconstruction_with_trailing_comma() {
        let record = parse_start_row(1, r#""POINT(-105.1 39.7,Inverted U,"#).unwrap();
        assert_eq!(record.parking_type, ParkingType::InvertedU);
        assert_eq!(record.capacity, None);
    }

    #[test]
    fn test_label_not_merged_with_unrelated_token() {
        let record =
            parse_start_row(1, r#""POINT(-105.1 39.7,Bollard, Capacity: 2)""#).unwrap();
        assert_eq!(record.parking_type, ParkingType::Bollard);
        assert_eq!(record.capacity, Some(2));
    }

    #[test]
    fn test_resolve_label_is_conservative() {
        assert_eq!(resolve_label("Inverted", Some("U,")), ParkingType::InvertedU);
        assert_eq!(resolve_label("Bike", Some("Locker,")), ParkingType::BikeLocker);
        assert_eq!(resolve_label("Bollard", Some("U,")), ParkingType::Bollard);
        assert_eq!(resolve_label("Bollard", None), ParkingType::Bollard);
        assert_eq!(resolve_label("Inverted", None), ParkingType::Unknown);
    }

    #[test]
    fn test_fixed_width_row_takes_last_field() {
        // Arité 5: pas de vérification du marqueur Capacity:
        let record =
            parse_start_row(1, r#""POINT(-105.1 39.7,Inverted U, Capacity: 4)""#).unwrap();
        assert_eq!(record.parking_type, ParkingType::InvertedU);
        assert_eq!(record.capacity, Some(4));

        let record = parse_start_row(1, r#""POINT(-105.1 39.7,Inverted U, Count: 6)""#).unwrap();
        assert_eq!(record.capacity, Some(6));
    }

    #[test]
    fn test_repair_station_has_no_capacity() {
        let record = parse_start_row(1, r#""POINT(-105.1 39.7,Repair Station)""#).unwrap();
        assert_eq!(record.parking_type, ParkingType::RepairStation);
        assert_eq!(record.capacity, None);
    }

    #[test]
    fn test_missing_marker_leaves_capacity_unset() {
        let record = parse_start_row(1, r#""POINT(-105.1 39.7,Wave,"#).unwrap();
        assert_eq!(record.parking_type, ParkingType::Wave);
        assert_eq!(record.capacity, None);
    }

    #[test]
    fn test_invalid_coordinate_is_fatal() {
        let err = parse_start_row(4, r#""POINT(west 39.7,Wave,Capacity: 2)""#).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::InvalidNumber { line: 4, field: "longitude", .. }
        ));
    }

    #[test]
    fn test_parse_continuation() {
        assert_eq!(parse_continuation(2, r#"Capacity: 4)""#).unwrap(), 4);
        assert_eq!(parse_continuation(2, r#"12)""#).unwrap(), 12);
        assert!(parse_continuation(2, r#"Capacity: lots)""#).is_err());
    }
}
