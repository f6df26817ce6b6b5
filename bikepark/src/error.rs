//! Types d'erreurs pour le crate bikepark

use thiserror::Error;

/// Erreurs pouvant survenir lors du parsing d'un export d'enquête
///
/// Toutes ces erreurs sont fatales: aucun enregistrement n'est produit.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Erreur d'I/O lors de la lecture du fichier
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export structuré illisible en CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Champ numérique illisible (coordonnée ou capacité)
    #[error("Line {line}: invalid {field} value '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Champ obligatoire absent de la ligne
    #[error("Line {line}: missing {field} field")]
    MissingField { line: usize, field: &'static str },

    /// Aucune ligne de données
    #[error("Input contains no data rows")]
    EmptyInput,
}

impl SurveyError {
    /// Crée une erreur de champ numérique invalide
    pub fn invalid_number(line: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            line,
            field,
            value: value.into(),
        }
    }

    /// Crée une erreur de champ manquant
    pub fn missing_field(line: usize, field: &'static str) -> Self {
        Self::MissingField { line, field }
    }
}
