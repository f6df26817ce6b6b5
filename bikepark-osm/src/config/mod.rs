//! Configuration depuis l'environnement (.env chargé au démarrage)

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.openstreetmap.org";
pub const DEFAULT_AUTH_URL: &str = "https://www.openstreetmap.org";

/// Identifiants de l'application OAuth2 OSM
///
/// Valeurs opaques: jamais loggées.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Lit `OSM_CLIENT_ID` et `OSM_CLIENT_SECRET`
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required_var("OSM_CLIENT_ID")?,
            client_secret: required_var("OSM_CLIENT_SECRET")?,
        })
    }
}

/// Points d'accès OSM
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base de l'API d'édition (ex: serveur de dev)
    pub api_url: String,
    /// Base du serveur OAuth2
    pub auth_url: String,
    /// Jeton déjà obtenu: saute l'autorisation interactive
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            auth_url: DEFAULT_AUTH_URL.into(),
            access_token: None,
        }
    }
}

impl ApiConfig {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("OSM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
            auth_url: std::env::var("OSM_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
            access_token: std::env::var("OSM_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
        }
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .context(format!("Missing environment variable {} (set it or add it to .env)", name))
}
