use std::sync::Mutex;

use tracing::{debug, warn};

use crate::bundled::BundledData;
use crate::config::Config;
use crate::filter::evaluate;
use crate::models::{Hospital, Pharmacy, Provider, SearchQuery};
use crate::remote::Directory;
use crate::Error;

/// Last-known state of one data domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceState {
    /// No fetch attempted yet
    #[default]
    Unknown,
    /// Last fetch came back from the backend
    Online,
    /// Last fetch failed; serving bundled data (or nothing)
    Offline,
}

/// Per-domain availability snapshot; domains update independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    pub providers: SourceState,
    pub hospitals: SourceState,
    pub specialties: SourceState,
}

/// A value plus where it came from
///
/// Callers branch on `using_mock_data` explicitly instead of inferring
/// fallback from an absent value. The error, when present, is advisory -
/// the data field is always usable.
#[derive(Debug)]
pub struct Fetched<T> {
    pub data: T,
    pub using_mock_data: bool,
    pub error: Option<Error>,
}

impl<T> Fetched<T> {
    fn remote(data: T) -> Self {
        Self {
            data,
            using_mock_data: false,
            error: None,
        }
    }

    fn mock(data: T, error: Option<Error>) -> Self {
        Self {
            data,
            using_mock_data: true,
            error,
        }
    }

    fn empty(data: T, error: Error) -> Self {
        Self {
            data,
            using_mock_data: false,
            error: Some(error),
        }
    }
}

/// Advisory backend connectivity, for banner display only
///
/// Does not gate the per-domain fallback decisions - those are made
/// independently on every request.
#[derive(Debug, Clone, Default)]
pub struct BackendStatus {
    pub is_online: bool,
    pub status: String,
    pub graphdb_connected: bool,
    pub mongodb_connected: bool,
}

/// Remote/local arbitration for every data domain
///
/// Tries the backend first; on any failure substitutes the bundled demo
/// dataset (when fallback is enabled) and records the domain as offline.
/// Nothing throws past this boundary - the worst case is silently serving
/// demo data.
pub struct DataSources {
    remote: Box<dyn Directory>,
    bundled: BundledData,
    mock_fallback: bool,
    default_radius: f64,
    availability: Mutex<Availability>,
}

impl DataSources {
    pub fn new(remote: Box<dyn Directory>, config: &Config) -> Self {
        Self {
            remote,
            bundled: BundledData::new(),
            mock_fallback: config.enable_mock_fallback,
            default_radius: config.default_radius,
            availability: Mutex::new(Availability::default()),
        }
    }

    pub async fn providers(&self) -> Fetched<Vec<Provider>> {
        match self.remote.providers().await {
            Ok(data) => {
                self.mark(|a| a.providers = SourceState::Online);
                Fetched::remote(data)
            }
            Err(e) => {
                self.mark(|a| a.providers = SourceState::Offline);
                if self.mock_fallback {
                    warn!("Provider fetch failed, serving bundled data: {}", e);
                    Fetched::mock(self.bundled.providers.clone(), Some(e))
                } else {
                    Fetched::empty(Vec::new(), e)
                }
            }
        }
    }

    pub async fn provider_by_id(&self, id: &str) -> Fetched<Option<Provider>> {
        match self.remote.provider(id).await {
            // An absent id is a successful answer, not a failure
            Ok(found) => {
                self.mark(|a| a.providers = SourceState::Online);
                Fetched::remote(found)
            }
            Err(e) => {
                self.mark(|a| a.providers = SourceState::Offline);
                if self.mock_fallback {
                    warn!("Provider lookup failed, searching bundled data: {}", e);
                    let found = self.bundled.providers.iter().find(|p| p.id == id).cloned();
                    Fetched::mock(found, Some(e))
                } else {
                    Fetched::empty(None, e)
                }
            }
        }
    }

    pub async fn hospitals(&self) -> Fetched<Vec<Hospital>> {
        match self.remote.hospitals().await {
            Ok(data) => {
                self.mark(|a| a.hospitals = SourceState::Online);
                Fetched::remote(data)
            }
            Err(e) => {
                self.mark(|a| a.hospitals = SourceState::Offline);
                if self.mock_fallback {
                    warn!("Hospital fetch failed, serving bundled data: {}", e);
                    Fetched::mock(self.bundled.hospitals.clone(), Some(e))
                } else {
                    Fetched::empty(Vec::new(), e)
                }
            }
        }
    }

    pub async fn hospital_by_id(&self, id: &str) -> Fetched<Option<Hospital>> {
        match self.remote.hospital(id).await {
            Ok(found) => {
                self.mark(|a| a.hospitals = SourceState::Online);
                Fetched::remote(found)
            }
            Err(e) => {
                self.mark(|a| a.hospitals = SourceState::Offline);
                if self.mock_fallback {
                    warn!("Hospital lookup failed, searching bundled data: {}", e);
                    let found = self.bundled.hospitals.iter().find(|h| h.id == id).cloned();
                    Fetched::mock(found, Some(e))
                } else {
                    Fetched::empty(None, e)
                }
            }
        }
    }

    pub async fn specialties(&self) -> Fetched<Vec<String>> {
        match self.remote.specialties().await {
            Ok(data) => {
                self.mark(|a| a.specialties = SourceState::Online);
                Fetched::remote(data)
            }
            Err(e) => {
                self.mark(|a| a.specialties = SourceState::Offline);
                if self.mock_fallback {
                    warn!("Specialty fetch failed, serving bundled data: {}", e);
                    Fetched::mock(self.bundled.specialties.clone(), Some(e))
                } else {
                    Fetched::empty(Vec::new(), e)
                }
            }
        }
    }

    /// Pharmacies are local-only in the current scope
    pub fn pharmacies(&self) -> Fetched<Vec<Pharmacy>> {
        Fetched::mock(self.bundled.pharmacies.clone(), None)
    }

    /// Filter the provider list locally, carrying the fallback flag through
    pub async fn search(&self, query: &SearchQuery) -> Fetched<Vec<Provider>> {
        let providers = self.providers().await;
        Fetched {
            data: evaluate(&providers.data, query),
            using_mock_data: providers.using_mock_data,
            error: providers.error,
        }
    }

    /// Ask the backend to run the symptom search, with its own ranking
    ///
    /// Falls back to filtering the provider list locally when the search
    /// endpoint is unreachable.
    pub async fn search_remote(&self, query: &SearchQuery) -> Fetched<Vec<Provider>> {
        match self.remote.search_by_symptom(query).await {
            Ok(data) => Fetched::remote(data),
            Err(e) => {
                warn!("Remote search failed, filtering locally: {}", e);
                let mut local = self.search(query).await;
                if local.error.is_none() {
                    local.error = Some(e);
                }
                local
            }
        }
    }

    /// Advisory connectivity probe; never errors
    pub async fn backend_status(&self) -> BackendStatus {
        match self.remote.health().await {
            Ok(check) => BackendStatus {
                is_online: check.status == "healthy",
                status: check.status,
                graphdb_connected: check.graphdb_connected,
                mongodb_connected: check.mongodb_connected,
            },
            Err(e) => {
                debug!("Health probe failed: {}", e);
                BackendStatus {
                    is_online: false,
                    status: "offline".to_string(),
                    ..Default::default()
                }
            }
        }
    }

    /// Touch every list domain concurrently and report the result
    pub async fn refresh(&self) -> Availability {
        let (_, _, _) = futures::join!(self.providers(), self.hospitals(), self.specialties());
        self.availability()
    }

    pub fn availability(&self) -> Availability {
        *self.availability.lock().expect("availability mutex poisoned")
    }

    pub fn default_radius(&self) -> f64 {
        self.default_radius
    }

    pub fn bundled(&self) -> &BundledData {
        &self.bundled
    }

    fn mark(&self, update: impl FnOnce(&mut Availability)) {
        let mut availability = self.availability.lock().expect("availability mutex poisoned");
        update(&mut availability);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use healthnav_api::{ApiError, HealthCheck};
    use crate::Result;

    /// Backend stub: per-domain switches for up/down
    struct StubBackend {
        healthy: bool,
        providers_up: bool,
        hospitals_up: bool,
    }

    impl StubBackend {
        fn up() -> Self {
            Self {
                healthy: true,
                providers_up: true,
                hospitals_up: true,
            }
        }

        fn down() -> Self {
            Self {
                healthy: false,
                providers_up: false,
                hospitals_up: false,
            }
        }

        fn unreachable() -> Error {
            Error::Api(ApiError::RequestFailed {
                status: 503,
                body: "connection refused".into(),
            })
        }

        fn remote_provider(id: &str) -> Provider {
            Provider {
                id: id.to_string(),
                npi: "1000000001".into(),
                name: "Dr. Remote Only".into(),
                first_name: "Remote".into(),
                last_name: "Only".into(),
                specialties: vec!["Oncology".into()],
                hospital_id: None,
                hospital_name: None,
                hcahps_score: Some(88),
                lat: 0.0,
                lng: 0.0,
                distance: Some(1.0),
                conditions: Vec::new(),
                symptoms: vec!["fatigue".into()],
                phone: None,
                address: None,
            }
        }
    }

    #[async_trait]
    impl Directory for StubBackend {
        async fn health(&self) -> Result<HealthCheck> {
            if self.healthy {
                Ok(HealthCheck {
                    status: "healthy".into(),
                    graphdb_connected: true,
                    mongodb_connected: true,
                })
            } else {
                Err(Self::unreachable())
            }
        }

        async fn providers(&self) -> Result<Vec<Provider>> {
            if self.providers_up {
                Ok(vec![Self::remote_provider("remote-1")])
            } else {
                Err(Self::unreachable())
            }
        }

        async fn provider(&self, id: &str) -> Result<Option<Provider>> {
            if self.providers_up {
                Ok(if id == "remote-1" {
                    Some(Self::remote_provider(id))
                } else {
                    None
                })
            } else {
                Err(Self::unreachable())
            }
        }

        async fn hospitals(&self) -> Result<Vec<Hospital>> {
            if self.hospitals_up {
                Ok(Vec::new())
            } else {
                Err(Self::unreachable())
            }
        }

        async fn hospital(&self, _id: &str) -> Result<Option<Hospital>> {
            if self.hospitals_up {
                Ok(None)
            } else {
                Err(Self::unreachable())
            }
        }

        async fn specialties(&self) -> Result<Vec<String>> {
            Err(Self::unreachable())
        }

        async fn search_by_symptom(&self, _query: &SearchQuery) -> Result<Vec<Provider>> {
            Err(Self::unreachable())
        }

        async fn pharmacies(&self, _lat: f64, _lng: f64, _radius: f64) -> Result<Vec<Pharmacy>> {
            Err(Self::unreachable())
        }
    }

    fn sources(backend: StubBackend, mock_fallback: bool) -> DataSources {
        let config = Config {
            enable_mock_fallback: mock_fallback,
            ..Default::default()
        };
        DataSources::new(Box::new(backend), &config)
    }

    #[tokio::test]
    async fn test_remote_success_skips_fallback() {
        let sources = sources(StubBackend::up(), true);
        let fetched = sources.providers().await;

        assert!(!fetched.using_mock_data);
        assert!(fetched.error.is_none());
        assert_eq!(fetched.data.len(), 1);
        assert_eq!(sources.availability().providers, SourceState::Online);
    }

    #[tokio::test]
    async fn test_remote_failure_serves_full_bundled_dataset() {
        let sources = sources(StubBackend::down(), true);
        let fetched = sources.providers().await;

        assert!(fetched.using_mock_data);
        assert!(fetched.error.is_some());
        assert!(!fetched.data.is_empty());
        assert_eq!(fetched.data.len(), BundledData::new().providers.len());
        assert_eq!(sources.availability().providers, SourceState::Offline);
    }

    #[tokio::test]
    async fn test_disabled_fallback_yields_empty_data_plus_error() {
        let sources = sources(StubBackend::down(), false);
        let fetched = sources.providers().await;

        assert!(!fetched.using_mock_data);
        assert!(fetched.error.is_some());
        assert!(fetched.data.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_falls_back_to_bundled_linear_search() {
        let sources = sources(StubBackend::down(), true);

        let hit = sources.provider_by_id("prov-001").await;
        assert!(hit.using_mock_data);
        assert_eq!(hit.data.unwrap().id, "prov-001");

        // Unknown everywhere: absent result, not an error escalation
        let miss = sources.provider_by_id("prov-999").await;
        assert!(miss.data.is_none());
        assert!(miss.using_mock_data);
    }

    #[tokio::test]
    async fn test_remote_miss_is_not_a_fallback_trigger() {
        let sources = sources(StubBackend::up(), true);
        let miss = sources.provider_by_id("prov-001").await;

        // Backend answered "no such provider"; we do not second-guess it
        assert!(miss.data.is_none());
        assert!(!miss.using_mock_data);
    }

    #[tokio::test]
    async fn test_domains_fail_independently() {
        let backend = StubBackend {
            healthy: true,
            providers_up: false,
            hospitals_up: true,
        };
        let sources = sources(backend, true);

        let _ = sources.providers().await;
        let _ = sources.hospitals().await;

        let availability = sources.availability();
        assert_eq!(availability.providers, SourceState::Offline);
        assert_eq!(availability.hospitals, SourceState::Online);
        assert_eq!(availability.specialties, SourceState::Unknown);
    }

    #[tokio::test]
    async fn test_pharmacies_are_always_local() {
        let sources = sources(StubBackend::up(), true);
        let fetched = sources.pharmacies();
        assert!(fetched.using_mock_data);
        assert!(!fetched.data.is_empty());
        assert!(fetched.error.is_none());
    }

    #[tokio::test]
    async fn test_search_carries_fallback_flag_through() {
        let sources = sources(StubBackend::down(), true);
        let query = SearchQuery {
            symptom: "chest pain".into(),
            radius: 10.0,
            specialties: vec!["Cardiology".into()],
            min_hcahps: 80,
        };

        let fetched = sources.search(&query).await;
        assert!(fetched.using_mock_data);
        let ids: Vec<_> = fetched.data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["prov-001", "prov-006", "prov-010"]);
    }

    #[tokio::test]
    async fn test_remote_search_falls_back_to_local_filtering() {
        // Stub search endpoint is always down; provider list is up
        let sources = sources(StubBackend::up(), true);
        let query = SearchQuery {
            symptom: "fatigue".into(),
            ..Default::default()
        };

        let fetched = sources.search_remote(&query).await;
        assert!(fetched.error.is_some());
        assert!(!fetched.using_mock_data);
        assert_eq!(fetched.data.len(), 1);
        assert_eq!(fetched.data[0].id, "remote-1");
    }

    #[tokio::test]
    async fn test_backend_status_reports_offline_without_erroring() {
        let status = sources(StubBackend::down(), true).backend_status().await;
        assert!(!status.is_online);
        assert_eq!(status.status, "offline");
    }

    #[tokio::test]
    async fn test_backend_status_reports_healthy_backend() {
        let status = sources(StubBackend::up(), true).backend_status().await;
        assert!(status.is_online);
        assert!(status.graphdb_connected);
        assert!(status.mongodb_connected);
    }

    #[tokio::test]
    async fn test_refresh_touches_every_domain() {
        let sources = sources(StubBackend::up(), true);
        let availability = sources.refresh().await;

        assert_eq!(availability.providers, SourceState::Online);
        assert_eq!(availability.hospitals, SourceState::Online);
        // Specialty endpoint is down in the stub regardless
        assert_eq!(availability.specialties, SourceState::Offline);
    }
}
