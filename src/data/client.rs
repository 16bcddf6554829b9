//! PokeAPI HTTP client.

use crate::config::ApiConfig;
use crate::data::DataSource;
use crate::errors::{DataResult, DataSourceError};
use async_trait::async_trait;
use schema::{NamedApiResourceList, SpeciesRecord, TypeRelationsRecord};
use serde::de::DeserializeOwned;

/// Upper bound on type names requested; the API lists a few more than the
/// 18 elemental types.
const TYPE_LIST_LIMIT: u32 = 100;

/// PokeAPI client over `reqwest`. Every request carries the configured timeout.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl PokeApiClient {
    pub fn new(config: &ApiConfig) -> DataResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| DataSourceError::Network {
                url: base_url.clone(),
                message: format!("failed to build HTTP client: {}", err),
            })?;
        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> DataResult<T> {
        tracing::debug!(url, "GET");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|err| DataSourceError::Network {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| DataSourceError::Network {
                url: url.to_string(),
                message: format!("failed to read body: {}", err),
            })?;

        decode_body(url, &body)
    }
}

/// Parse a response body. Valid JSON of the wrong shape is `DataIncomplete`;
/// anything else is `Decode`.
pub(crate) fn decode_body<T: DeserializeOwned>(url: &str, body: &str) -> DataResult<T> {
    serde_json::from_str(body).map_err(|err| {
        if err.is_data() {
            DataSourceError::DataIncomplete {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            DataSourceError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    })
}

#[async_trait]
impl DataSource for PokeApiClient {
    async fn fetch_roster(&self, limit: u32) -> DataResult<NamedApiResourceList> {
        self.get_json(&self.endpoint(&format!("pokemon?limit={}", limit)))
            .await
    }

    async fn fetch_species(&self, id: u32) -> DataResult<SpeciesRecord> {
        self.get_json(&self.endpoint(&format!("pokemon/{}", id))).await
    }

    async fn fetch_species_by_url(&self, url: &str) -> DataResult<SpeciesRecord> {
        self.get_json(url).await
    }

    async fn fetch_type_list(&self) -> DataResult<NamedApiResourceList> {
        self.get_json(&self.endpoint(&format!("type?limit={}", TYPE_LIST_LIMIT)))
            .await
    }

    async fn fetch_type_relations(&self, name: &str) -> DataResult<TypeRelationsRecord> {
        self.get_json(&self.endpoint(&format!("type/{}", name))).await
    }
}
