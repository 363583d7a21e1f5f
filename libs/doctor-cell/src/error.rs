use thiserror::Error;

use shared_models::AppError;

use crate::models::ValidationErrors;

#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("Failed to fetch {resource}: {message}")]
    Fetch { resource: &'static str, message: String },

    #[error("Reference data source is not configured")]
    NotConfigured,
}

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Form validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),
}

impl From<ReferenceDataError> for AppError {
    fn from(err: ReferenceDataError) -> Self {
        match err {
            ReferenceDataError::NotConfigured => AppError::Internal(err.to_string()),
            ReferenceDataError::Fetch { .. } => AppError::ExternalService(err.to_string()),
        }
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Validation(errors) => AppError::InvalidForm(errors.to_field_map()),
            IntakeError::SubmissionInProgress => AppError::BadRequest(err.to_string()),
            IntakeError::ReferenceData(inner) => inner.into(),
        }
    }
}
