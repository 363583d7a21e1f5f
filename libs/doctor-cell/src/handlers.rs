use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Local;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::error::IntakeError;
use crate::models::{FilterRules, FormState};
use crate::services::{
    filtering::visible_options,
    reference::ReferenceDataService,
    submission::SubmissionService,
    validation::{validate_all, validate_form},
};

// ==============================================================================
// INTAKE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_reference_data(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let reference = ReferenceDataService::new(&state).load().await?;

    Ok(Json(json!({
        "cities": reference.cities,
        "specialities": reference.specialities,
        "doctors": reference.doctors,
    })))
}

#[axum::debug_handler]
pub async fn get_visible_options(
    State(state): State<Arc<AppConfig>>,
    Json(form): Json<FormState>,
) -> Result<Json<Value>, AppError> {
    let reference = ReferenceDataService::new(&state).load().await?;
    let rules = FilterRules::from_config(&state);

    let visible = visible_options(&form, &reference, Local::now().date_naive(), &rules);
    debug!(
        "Visible options: {} specialities, {} doctors",
        visible.specialities.len(),
        visible.doctors.len()
    );

    Ok(Json(json!(visible)))
}

#[axum::debug_handler]
pub async fn validate_intake_form(Json(form): Json<FormState>) -> Json<Value> {
    let errors = validate_all(&form);

    Json(json!({
        "valid": errors.is_empty(),
        "errors": errors.to_field_map(),
    }))
}

#[axum::debug_handler]
pub async fn submit_intake_form(
    State(state): State<Arc<AppConfig>>,
    Json(form): Json<FormState>,
) -> Result<Json<Value>, AppError> {
    let request = validate_form(&form).map_err(IntakeError::Validation)?;

    SubmissionService::new(&state).deliver(&request).await;

    Ok(Json(json!({
        "status": "accepted",
        "appointment": request,
        "form": FormState::default(),
    })))
}
