//! Autorisation OAuth2 (authorization code, redirection hors bande)
//!
//! L'URL d'autorisation est affichée, l'utilisateur colle le code obtenu.

use anyhow::{Context, Result};
use dialoguer::Input;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{ApiConfig, Credentials};

/// Redirection hors bande: OSM affiche le code à copier
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
pub const SCOPE: &str = "write_api";

/// Session authentifiée auprès de l'API
pub struct Session {
    pub http: reqwest::Client,
    pub api_url: String,
    pub access_token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// URL d'autorisation à ouvrir dans un navigateur
pub fn authorization_url(credentials: &Credentials, config: &ApiConfig) -> Result<Url> {
    let base = format!("{}/oauth2/authorize", config.auth_url.trim_end_matches('/'));
    Url::parse_with_params(
        &base,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("redirect_uri", OOB_REDIRECT_URI),
            ("response_type", "code"),
            ("scope", SCOPE),
        ],
    )
    .context(format!("Invalid OSM_AUTH_URL: {}", config.auth_url))
}

/// Obtient une session authentifiée
///
/// Utilise `OSM_ACCESS_TOKEN` s'il est défini, sinon déroule l'échange
/// interactif.
pub async fn authorize(credentials: &Credentials, config: &ApiConfig) -> Result<Session> {
    let http = http_client()?;

    if let Some(ref token) = config.access_token {
        info!("Using access token from environment");
        return Ok(Session {
            http,
            api_url: config.api_url.clone(),
            access_token: token.clone(),
        });
    }

    let url = authorization_url(credentials, config)?;
    println!("Open this URL in a browser and authorize the application:");
    println!();
    println!("  {}", url);
    println!();

    let code: String = Input::new()
        .with_prompt("Authorization code")
        .interact_text()
        .context("Failed to read authorization code")?;

    let access_token = exchange_code(&http, credentials, config, code.trim()).await?;
    info!("Authorization successful");

    Ok(Session {
        http,
        api_url: config.api_url.clone(),
        access_token,
    })
}

/// Échange le code d'autorisation contre un jeton d'accès
async fn exchange_code(
    http: &reqwest::Client,
    credentials: &Credentials,
    config: &ApiConfig,
    code: &str,
) -> Result<String> {
    let url = format!("{}/oauth2/token", config.auth_url.trim_end_matches('/'));

    let response = http
        .post(&url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", OOB_REDIRECT_URI),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ])
        .send()
        .await
        .context("Token request failed")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Token exchange rejected ({}): {}", status, body);
    }

    let token: TokenResponse = response
        .json()
        .await
        .context("Failed to parse token response")?;
    debug!(token_type = ?token.token_type, scope = ?token.scope, "Token received");

    Ok(token.access_token)
}

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("bikepark-osm/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url() {
        let credentials = Credentials {
            client_id: "abc123".into(),
            client_secret: "secret".into(),
        };
        let config = ApiConfig {
            auth_url: "https://master.apis.dev.openstreetmap.org/".into(),
            ..Default::default()
        };

        let url = authorization_url(&credentials, &config).unwrap();
        assert_eq!(url.path(), "/oauth2/authorize");
        assert_eq!(url.host_str(), Some("master.apis.dev.openstreetmap.org"));

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(params.contains(&("client_id".into(), "abc123".into())));
        assert!(params.contains(&("response_type".into(), "code".into())));
        assert!(params.contains(&("scope".into(), "write_api".into())));
        assert!(params.contains(&("redirect_uri".into(), OOB_REDIRECT_URI.into())));
        // Le secret ne doit jamais apparaître dans l'URL
        assert!(!url.as_str().contains("secret"));
    }

    #[tokio::test]
    async fn test_authorize_with_env_token() {
        let credentials = Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
        };
        let config = ApiConfig {
            access_token: Some("tok".into()),
            ..Default::default()
        };

        let session = authorize(&credentials, &config).await.unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.api_url, "https://api.openstreetmap.org");
    }
}
