use std::sync::Arc;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;

pub const TEST_CITIES_ENDPOINT: &str = "cities-list";
pub const TEST_SPECIALITIES_ENDPOINT: &str = "specialities-list";
pub const TEST_DOCTORS_ENDPOINT: &str = "doctors-list";

pub struct TestConfig {
    pub reference_data_base_url: String,
    pub submit_delay_ms: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            reference_data_base_url: "http://localhost:54321".to_string(),
            submit_delay_ms: 0,
        }
    }
}

impl TestConfig {
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            reference_data_base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            reference_data_base_url: self.reference_data_base_url.clone(),
            cities_endpoint: TEST_CITIES_ENDPOINT.to_string(),
            specialities_endpoint: TEST_SPECIALITIES_ENDPOINT.to_string(),
            doctors_endpoint: TEST_DOCTORS_ENDPOINT.to_string(),
            submit_delay_ms: self.submit_delay_ms,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned payloads for the three reference lists.
pub struct MockReferenceResponses;

impl MockReferenceResponses {
    pub fn cities() -> serde_json::Value {
        json!([
            { "id": "c1", "name": "Metropolis" },
            { "id": "c2", "name": "Gotham" }
        ])
    }

    pub fn specialities() -> serde_json::Value {
        json!([
            { "id": "s1", "name": "Pediatrics", "params": { "maxAge": 17 } },
            { "id": "s2", "name": "Gynecology", "params": { "gender": "Female", "minAge": 16 } },
            { "id": "s3", "name": "Urology", "params": { "gender": "Male", "maxAge": null } },
            { "id": "s4", "name": "Therapy" }
        ])
    }

    pub fn doctors() -> serde_json::Value {
        json!([
            { "id": "d1", "name": "Jane", "surname": "Doe", "cityId": "c1", "specialityId": "s1", "isPediatrician": true },
            { "id": "d2", "name": "Mary", "surname": "Major", "cityId": "c1", "specialityId": "s2", "isPediatrician": false },
            { "id": "d3", "name": "John", "surname": "Roe", "cityId": "c2", "specialityId": "s3", "isPediatrician": false },
            { "id": "d4", "name": "Ann", "surname": "Lee", "cityId": "c2", "specialityId": "s4", "isPediatrician": false }
        ])
    }

    /// Example from the intake form walkthrough: one pediatrician in one city.
    pub fn single_pediatrician() -> (serde_json::Value, serde_json::Value, serde_json::Value) {
        (
            json!([{ "id": "c1", "name": "Metropolis" }]),
            json!([{ "id": "s1", "name": "Pediatrics", "params": { "maxAge": 17 } }]),
            json!([{ "id": "d1", "name": "Jane", "surname": "Doe", "cityId": "c1", "specialityId": "s1", "isPediatrician": true }]),
        )
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({ "error": { "message": message } })
    }
}

async fn mount_list(mock_server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", endpoint)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

/// Serve the given lists on the endpoints used by [`TestConfig`].
pub async fn mount_reference_endpoints(
    mock_server: &MockServer,
    cities: serde_json::Value,
    specialities: serde_json::Value,
    doctors: serde_json::Value,
) {
    mount_list(mock_server, TEST_CITIES_ENDPOINT, cities).await;
    mount_list(mock_server, TEST_SPECIALITIES_ENDPOINT, specialities).await;
    mount_list(mock_server, TEST_DOCTORS_ENDPOINT, doctors).await;
}

pub async fn mount_default_reference_endpoints(mock_server: &MockServer) {
    mount_reference_endpoints(
        mock_server,
        MockReferenceResponses::cities(),
        MockReferenceResponses::specialities(),
        MockReferenceResponses::doctors(),
    )
    .await;
}
