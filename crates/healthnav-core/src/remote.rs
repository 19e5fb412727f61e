use async_trait::async_trait;
use healthnav_api::{ApiClient, HealthCheck};
use serde::Serialize;

use crate::models::{Hospital, Pharmacy, Provider, SearchQuery};
use crate::Result;

/// The remote data service, seen from the core
///
/// One trait so the arbitration layer can be exercised against stubs.
/// Every read is an idempotent GET-style call; a missing resource comes
/// back as `None`, never as an error.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn health(&self) -> Result<HealthCheck>;
    async fn providers(&self) -> Result<Vec<Provider>>;
    async fn provider(&self, id: &str) -> Result<Option<Provider>>;
    async fn hospitals(&self) -> Result<Vec<Hospital>>;
    async fn hospital(&self, id: &str) -> Result<Option<Hospital>>;
    async fn specialties(&self) -> Result<Vec<String>>;
    /// Server-side symptom search; ranking is the backend's business
    async fn search_by_symptom(&self, query: &SearchQuery) -> Result<Vec<Provider>>;
    async fn pharmacies(&self, lat: f64, lng: f64, radius: f64) -> Result<Vec<Pharmacy>>;
}

/// Body for the backend symptom-search endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SymptomSearchRequest<'a> {
    symptom: &'a str,
    radius: f64,
    min_hcahps: u8,
}

/// `Directory` over the real HTTP backend
pub struct BackendClient {
    api: ApiClient,
}

impl BackendClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Directory for BackendClient {
    async fn health(&self) -> Result<HealthCheck> {
        Ok(self.api.health().await?)
    }

    async fn providers(&self) -> Result<Vec<Provider>> {
        Ok(self.api.get_json("/providers").await?)
    }

    async fn provider(&self, id: &str) -> Result<Option<Provider>> {
        Ok(self.api.get_json_opt(&format!("/providers/{}", id)).await?)
    }

    async fn hospitals(&self) -> Result<Vec<Hospital>> {
        Ok(self.api.get_json("/hospitals").await?)
    }

    async fn hospital(&self, id: &str) -> Result<Option<Hospital>> {
        Ok(self.api.get_json_opt(&format!("/hospitals/{}", id)).await?)
    }

    async fn specialties(&self) -> Result<Vec<String>> {
        Ok(self.api.get_json("/specialties").await?)
    }

    async fn search_by_symptom(&self, query: &SearchQuery) -> Result<Vec<Provider>> {
        let request = SymptomSearchRequest {
            symptom: &query.symptom,
            radius: query.radius,
            min_hcahps: query.min_hcahps,
        };
        Ok(self.api.post_json("/search/symptom", &request).await?)
    }

    async fn pharmacies(&self, lat: f64, lng: f64, radius: f64) -> Result<Vec<Pharmacy>> {
        Ok(self
            .api
            .get_json_with_query(
                "/pharmacies",
                &[
                    ("lat", lat.to_string()),
                    ("lng", lng.to_string()),
                    ("radius", radius.to_string()),
                ],
            )
            .await?)
    }
}
