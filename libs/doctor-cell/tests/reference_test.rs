// libs/doctor-cell/tests/reference_test.rs
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::*;
use shared_utils::test_utils::{
    mount_default_reference_endpoints, mount_reference_endpoints, MockReferenceResponses,
    TestConfig, TEST_CITIES_ENDPOINT, TEST_SPECIALITIES_ENDPOINT, TEST_DOCTORS_ENDPOINT,
};

fn service_for(mock_server: &MockServer) -> ReferenceDataService {
    let config = TestConfig::for_base_url(&mock_server.uri()).to_app_config();
    ReferenceDataService::new(&config)
}

#[tokio::test]
async fn test_load_enriches_doctors() {
    let mock_server = MockServer::start().await;
    mount_default_reference_endpoints(&mock_server).await;

    let reference = service_for(&mock_server).load().await.unwrap();

    assert_eq!(reference.cities.len(), 2);
    assert_eq!(reference.specialities.len(), 4);
    assert_eq!(reference.doctors.len(), 4);

    let jane = reference.doctors.iter().find(|d| d.id == "d1").unwrap();
    assert_eq!(jane.display_name, "Jane Doe");
    assert_eq!(jane.city_name.as_deref(), Some("Metropolis"));
    assert_eq!(jane.speciality_name.as_deref(), Some("Pediatrics"));
    assert_eq!(jane.max_age, Some(17));

    let mary = reference.doctors.iter().find(|d| d.id == "d2").unwrap();
    assert_eq!(mary.gender, Some(Gender::Female));
    assert_eq!(mary.min_age, Some(16));

    let ann = reference.doctors.iter().find(|d| d.id == "d4").unwrap();
    assert_eq!((ann.max_age, ann.min_age, ann.gender), (None, None, None));
}

#[tokio::test]
async fn test_walkthrough_example() {
    let mock_server = MockServer::start().await;
    let (cities, specialities, doctors) = MockReferenceResponses::single_pediatrician();
    mount_reference_endpoints(&mock_server, cities, specialities, doctors).await;

    let reference = service_for(&mock_server).load().await.unwrap();
    assert_eq!(reference.doctors[0].city_name.as_deref(), Some("Metropolis"));
    assert_eq!(reference.doctors[0].speciality_name.as_deref(), Some("Pediatrics"));
    assert_eq!(reference.doctors[0].max_age, Some(17));

    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mut form = IntakeForm::with_today(Arc::new(reference), FilterRules::default(), today);

    form.apply(FormAction::SetBirthdayDate(NaiveDate::from_ymd_opt(2014, 6, 15)));
    form.apply(FormAction::SetCity(Some("Metropolis".to_string())));
    assert_eq!(form.visible().doctors.len(), 1);
    assert_eq!(form.visible().doctors[0].id, "d1");

    form.apply(FormAction::SetBirthdayDate(NaiveDate::from_ymd_opt(2004, 6, 15)));
    assert!(form.visible().doctors.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_sets_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/{}", TEST_CITIES_ENDPOINT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockReferenceResponses::cities()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", TEST_SPECIALITIES_ENDPOINT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockReferenceResponses::specialities()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", TEST_DOCTORS_ENDPOINT)))
        .respond_with(ResponseTemplate::new(500).set_body_json(MockReferenceResponses::error_response("boom")))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);

    let err = service.load().await.unwrap_err();
    assert_matches!(err, ReferenceDataError::Fetch { resource: "doctors", .. });

    let page = service.load_page().await;
    assert_matches!(page, PageState::Failed { ref message } if message.contains("doctors"));
    assert!(page.reference_data().is_none());
}

#[tokio::test]
async fn test_malformed_payload_is_a_fetch_error() {
    let mock_server = MockServer::start().await;
    mount_reference_endpoints(
        &mock_server,
        serde_json::json!([{ "id": 1 }]),
        MockReferenceResponses::specialities(),
        MockReferenceResponses::doctors(),
    )
    .await;

    let err = service_for(&mock_server).load().await.unwrap_err();
    assert_matches!(err, ReferenceDataError::Fetch { resource: "cities", .. });
}

#[tokio::test]
async fn test_unconfigured_source() {
    let config = TestConfig::for_base_url("").to_app_config();
    let err = ReferenceDataService::new(&config).load().await.unwrap_err();
    assert_matches!(err, ReferenceDataError::NotConfigured);
}

struct StaticSource {
    doctors: Vec<DoctorRecord>,
}

#[async_trait]
impl ReferenceSource for StaticSource {
    async fn get_cities(&self) -> Result<Vec<City>, ReferenceDataError> {
        Ok(vec![City { id: "c1".to_string(), name: "Metropolis".to_string() }])
    }

    async fn get_specialities(&self) -> Result<Vec<Speciality>, ReferenceDataError> {
        Ok(vec![])
    }

    async fn get_doctors(&self) -> Result<Vec<DoctorRecord>, ReferenceDataError> {
        Ok(self.doctors.clone())
    }
}

#[tokio::test]
async fn test_custom_source_with_dangling_speciality() {
    let source = StaticSource {
        doctors: vec![DoctorRecord {
            id: "d9".to_string(),
            name: "Lone".to_string(),
            surname: "Doctor".to_string(),
            city_id: "c1".to_string(),
            speciality_id: "gone".to_string(),
            is_pediatrician: false,
        }],
    };

    let page = ReferenceDataService::with_source(source).load_page().await;
    assert!(page.is_ready());

    let reference = page.reference_data().unwrap();
    assert_eq!(reference.doctors[0].city_name.as_deref(), Some("Metropolis"));
    assert_eq!(reference.doctors[0].speciality_name, None);
}
