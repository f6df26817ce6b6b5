//! Liste d'exclusion des points déjà présents dans OSM
//!
//! Ces points proviennent d'une autre source et existent déjà côté OSM: ils
//! sont ignorés à chaque exécution. La comparaison est une égalité exacte.

use std::str::FromStr;

use bikepark::PointRecord;

/// Doublons connus, (latitude, longitude)
pub const KNOWN_DUPLICATES: &[(f64, f64)] = &[
    (39.7392358, -104.990251),
    (39.7405212, -104.9847033),
    (39.7508006, -104.9965947),
    (39.7474856, -105.0005713),
    (39.7320318, -104.9592749),
];

/// Coordonnée exclue (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExcludedPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl FromStr for ExcludedPoint {
    type Err = String;

    /// Format `LAT,LON`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("Invalid exclusion '{}'. Use: LAT,LON", s))?;
        let latitude = lat
            .trim()
            .parse()
            .map_err(|_| format!("Invalid latitude in exclusion: {}", lat))?;
        let longitude = lon
            .trim()
            .parse()
            .map_err(|_| format!("Invalid longitude in exclusion: {}", lon))?;
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Ensemble des coordonnées à ignorer
#[derive(Debug, Clone)]
pub struct ExclusionList {
    points: Vec<ExcludedPoint>,
}

impl Default for ExclusionList {
    fn default() -> Self {
        Self::from_pairs(KNOWN_DUPLICATES)
    }
}

impl ExclusionList {
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self {
            points: pairs
                .iter()
                .map(|&(latitude, longitude)| ExcludedPoint {
                    latitude,
                    longitude,
                })
                .collect(),
        }
    }

    /// Ajoute des exclusions (ex: `--exclude` en ligne de commande)
    pub fn with_extra(mut self, extra: impl IntoIterator<Item = ExcludedPoint>) -> Self {
        self.points.extend(extra);
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Égalité flottante exacte sur les deux coordonnées
    #[allow(clippy::float_cmp)]
    pub fn contains(&self, record: &PointRecord) -> bool {
        self.points
            .iter()
            .any(|p| p.latitude == record.latitude && p.longitude == record.longitude)
    }
}
