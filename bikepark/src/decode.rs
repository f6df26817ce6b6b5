//! Lecture et décodage des fichiers d'export

use std::path::Path;

use tracing::debug;

use crate::SurveyError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Lit un fichier d'export et le décode en texte
pub fn read(path: &Path) -> Result<String, SurveyError> {
    let data = std::fs::read(path)?;
    Ok(decode(&data))
}

/// Décode les bytes d'un export
///
/// UTF-8 si valide (BOM retiré), sinon Windows-1252 (exports tableur).
pub fn decode(data: &[u8]) -> String {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    // Validation SIMD rapide du cas courant
    if let Ok(text) = simdutf8::basic::from_utf8(data) {
        return text.to_string();
    }

    debug!("Input is not valid UTF-8, decoding as Windows-1252");
    let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(data);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode("-105.1,39.7,Bollard".as_bytes()), "-105.1,39.7,Bollard");
    }

    #[test]
    fn test_decode_strips_bom() {
        let data = b"\xEF\xBB\xBF-105.1,39.7";
        assert_eq!(decode(data), "-105.1,39.7");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Caf\xE9" n'est pas de l'UTF-8 valide
        let data = b"Caf\xE9";
        assert_eq!(decode(data), "Café");
    }
}
