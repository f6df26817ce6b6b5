//! Client HTTP de l'API OSM v0.6

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, trace};

use crate::changes::FeatureTags;
use crate::oauth::Session;
use crate::osm::{xml, ApiError, ChangesetId, ChangesetMetadata, MapApi, NodeId};

/// Client authentifié (jeton OAuth2 bearer)
pub struct OsmClient {
    http: reqwest::Client,
    api_url: String,
    access_token: String,
}

impl OsmClient {
    pub fn new(session: Session) -> Self {
        Self {
            http: session.http,
            api_url: session.api_url.trim_end_matches('/').to_string(),
            access_token: session.access_token,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/0.6/{}", self.api_url, path)
    }

    /// PUT authentifié, retourne le corps texte de la réponse
    async fn put(&self, path: &str, body: Option<String>) -> Result<String, ApiError> {
        let url = self.endpoint(path);
        trace!(url = %url, "PUT");

        let mut request = self
            .http
            .put(&url)
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8");
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

/// Les créations OSM retournent l'identifiant en texte brut
fn parse_id(text: &str) -> Result<u64, ApiError> {
    text.trim()
        .parse()
        .map_err(|_| ApiError::InvalidResponse(format!("expected numeric id, got '{}'", text)))
}

#[async_trait]
impl MapApi for OsmClient {
    async fn open_changeset(&self, metadata: &ChangesetMetadata) -> Result<ChangesetId, ApiError> {
        let body = xml::changeset_body(metadata)?;
        let text = self.put("changeset/create", Some(body)).await?;
        let id = ChangesetId(parse_id(&text)?);
        debug!(changeset = %id, "Changeset created");
        Ok(id)
    }

    async fn create_node(
        &self,
        changeset: ChangesetId,
        latitude: f64,
        longitude: f64,
        tags: &FeatureTags,
    ) -> Result<NodeId, ApiError> {
        let body = xml::node_body(changeset, latitude, longitude, tags)?;
        let text = self.put("node/create", Some(body)).await?;
        Ok(NodeId(parse_id(&text)?))
    }

    async fn close_changeset(&self, changeset: ChangesetId) -> Result<(), ApiError> {
        self.put(&format!("changeset/{}/close", changeset), None)
            .await?;
        Ok(())
    }
}
