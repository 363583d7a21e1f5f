// libs/doctor-cell/src/services/reference.rs
use async_trait::async_trait;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_http::ApiClient;

use crate::error::ReferenceDataError;
use crate::models::{City, DoctorRecord, PageState, ReferenceData, Speciality};
use crate::services::enrichment::enrich_doctors;

/// The three read-only lists behind the intake form.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn get_cities(&self) -> Result<Vec<City>, ReferenceDataError>;
    async fn get_specialities(&self) -> Result<Vec<Speciality>, ReferenceDataError>;
    async fn get_doctors(&self) -> Result<Vec<DoctorRecord>, ReferenceDataError>;
}

pub struct HttpReferenceSource {
    client: ApiClient,
    cities_endpoint: String,
    specialities_endpoint: String,
    doctors_endpoint: String,
    configured: bool,
}

impl HttpReferenceSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ApiClient::new(config),
            cities_endpoint: config.cities_endpoint.clone(),
            specialities_endpoint: config.specialities_endpoint.clone(),
            doctors_endpoint: config.doctors_endpoint.clone(),
            configured: config.is_configured(),
        }
    }

    async fn fetch_list<T>(&self, resource: &'static str, endpoint: &str) -> Result<Vec<T>, ReferenceDataError>
    where
        T: serde::de::DeserializeOwned,
    {
        if !self.configured {
            return Err(ReferenceDataError::NotConfigured);
        }

        debug!("Fetching {} from endpoint {}", resource, endpoint);

        let items: Vec<T> = self.client.get(endpoint).await.map_err(|e| ReferenceDataError::Fetch {
            resource,
            message: e.to_string(),
        })?;

        debug!("Fetched {} {}", items.len(), resource);
        Ok(items)
    }
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn get_cities(&self) -> Result<Vec<City>, ReferenceDataError> {
        self.fetch_list("cities", &self.cities_endpoint).await
    }

    async fn get_specialities(&self) -> Result<Vec<Speciality>, ReferenceDataError> {
        self.fetch_list("specialities", &self.specialities_endpoint).await
    }

    async fn get_doctors(&self) -> Result<Vec<DoctorRecord>, ReferenceDataError> {
        self.fetch_list("doctors", &self.doctors_endpoint).await
    }
}

pub struct ReferenceDataService<S = HttpReferenceSource> {
    source: S,
}

impl ReferenceDataService<HttpReferenceSource> {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            source: HttpReferenceSource::new(config),
        }
    }
}

impl<S: ReferenceSource> ReferenceDataService<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Fetch all three lists concurrently and derive the enriched doctors.
    /// Nothing is returned unless every fetch succeeds.
    pub async fn load(&self) -> Result<ReferenceData, ReferenceDataError> {
        let (doctors, cities, specialities) = tokio::try_join!(
            self.source.get_doctors(),
            self.source.get_cities(),
            self.source.get_specialities(),
        )?;

        let doctors = enrich_doctors(&doctors, &cities, &specialities);

        info!(
            "Loaded reference data: {} cities, {} specialities, {} doctors",
            cities.len(),
            specialities.len(),
            doctors.len()
        );

        Ok(ReferenceData {
            cities,
            specialities,
            doctors,
        })
    }

    /// Like [`load`](Self::load) but folds the outcome into a page state. A
    /// failed fetch ends in `Failed`, which the caller can retry from.
    pub async fn load_page(&self) -> PageState {
        match self.load().await {
            Ok(data) => PageState::Ready(data),
            Err(e) => {
                warn!("Reference data unavailable: {}", e);
                PageState::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
