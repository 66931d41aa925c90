use async_trait::async_trait;
use color_eyre::eyre::Result;
use tracing::{debug, instrument};

use crate::{
    config::PlacesConfig,
    types::dto::places::{PlaceResults, PlacesResponse},
};

/// The places search collaborator. Errors and non-200 statuses both count as a failed search.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search(&self, text: &str) -> Result<PlacesResponse>;
}

pub struct PlacesClient {
    client: reqwest::Client,
    config: PlacesConfig,
}

impl PlacesClient {
    pub fn new(client: reqwest::Client, config: PlacesConfig) -> Self {
        PlacesClient { client, config }
    }
}

#[async_trait]
impl PlacesSearch for PlacesClient {
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<PlacesResponse> {
        let limit = self.config.limit.to_string();
        let response = self
            .client
            .get(&self.config.url)
            .query(&[
                ("key", self.config.key.as_str()),
                ("q", text),
                ("limit", limit.as_str()),
                ("collection", self.config.collections.as_str()),
            ])
            .send()
            .await?;
        let status = response.status().as_u16();
        debug!(status, "places response");
        if status != 200 {
            return Ok(PlacesResponse::with_status(status));
        }
        Ok(PlacesResponse {
            status,
            data: Some(response.json::<PlaceResults>().await?),
        })
    }
}
