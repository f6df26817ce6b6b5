//! Types de données pour le crate bikepark

use std::fmt;

/// Type physique d'un arceau / support vélo relevé lors de l'enquête
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParkingType {
    SchoolYard,
    Bollard,
    CoatHanger,
    InvertedU,
    Wave,
    BikeLocker,
    Horned,
    Spiral,
    WheelWell,
    RepairStation,
    Vertical,
    Special,
    /// Libellé présent dans la source mais non reconnu
    Unknown,
}

/// Table des libellés de l'export (sensible à la casse)
const LABELS: &[(&str, ParkingType)] = &[
    ("Schoolyard", ParkingType::SchoolYard),
    ("Bollard", ParkingType::Bollard),
    ("Coat Hanger", ParkingType::CoatHanger),
    ("Inverted U", ParkingType::InvertedU),
    ("Wave", ParkingType::Wave),
    ("Bike Locker", ParkingType::BikeLocker),
    ("Horned", ParkingType::Horned),
    ("Spiral", ParkingType::Spiral),
    ("Wheel Well", ParkingType::WheelWell),
    ("Repair Station", ParkingType::RepairStation),
    ("Vertical", ParkingType::Vertical),
    ("Special", ParkingType::Special),
];

impl ParkingType {
    /// Tous les types reconnus (hors `Unknown`)
    pub const ALL: [ParkingType; 12] = [
        ParkingType::SchoolYard,
        ParkingType::Bollard,
        ParkingType::CoatHanger,
        ParkingType::InvertedU,
        ParkingType::Wave,
        ParkingType::BikeLocker,
        ParkingType::Horned,
        ParkingType::Spiral,
        ParkingType::WheelWell,
        ParkingType::RepairStation,
        ParkingType::Vertical,
        ParkingType::Special,
    ];

    /// Résout un libellé d'export, `Unknown` si non reconnu
    pub fn from_label(label: &str) -> Self {
        LABELS
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, t)| *t)
            .unwrap_or(ParkingType::Unknown)
    }

    /// Libellé d'export correspondant
    pub fn label(self) -> &'static str {
        LABELS
            .iter()
            .find(|(_, t)| *t == self)
            .map(|(l, _)| *l)
            .unwrap_or("Unknown")
    }

    pub fn is_known(self) -> bool {
        self != ParkingType::Unknown
    }
}

impl fmt::Display for ParkingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Niveau d'obstruction visuelle / physique (export étendu uniquement)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Obstruction {
    #[default]
    None,
    Low,
    Medium,
    High,
    PaymentRequired,
}

impl Obstruction {
    /// Résout un libellé (insensible à la casse), `None` par défaut
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Obstruction::Low,
            "medium" => Obstruction::Medium,
            "high" => Obstruction::High,
            "payment required" => Obstruction::PaymentRequired,
            _ => Obstruction::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Obstruction::None => "none",
            Obstruction::Low => "low",
            Obstruction::Medium => "medium",
            Obstruction::High => "high",
            Obstruction::PaymentRequired => "payment required",
        }
    }
}

/// Forme des lignes d'un fichier d'export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// `lon,lat,type,capacité,obstruction,vue,entrée`
    Structured,
    /// `"POINT(lon lat,type,Capacity: n)"`, éventuellement sur deux lignes
    LegacyWkt,
}

/// Un point relevé lors de l'enquête
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub latitude: f64,
    pub longitude: f64,

    pub parking_type: ParkingType,

    /// Nombre de vélos; toujours absent pour `RepairStation`
    pub capacity: Option<u32>,

    pub obstruction: Option<Obstruction>,
    pub within_plain_sight: Option<bool>,
    pub within_view_of_entrance: Option<bool>,

    /// Numéro (1-based) de la ligne physique qui ouvre l'enregistrement
    pub line: usize,
}

impl PointRecord {
    /// Crée un enregistrement sans attributs étendus
    pub fn new(
        line: usize,
        longitude: f64,
        latitude: f64,
        parking_type: ParkingType,
        capacity: Option<u32>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            parking_type,
            capacity,
            obstruction: None,
            within_plain_sight: None,
            within_view_of_entrance: None,
            line,
        }
    }

    /// Un enregistrement est publiable si son type est connu et que la
    /// capacité est renseignée (sauf station de réparation)
    pub fn is_valid_for_upload(&self) -> bool {
        self.parking_type.is_known()
            && (self.capacity.is_some() || self.parking_type == ParkingType::RepairStation)
    }
}
