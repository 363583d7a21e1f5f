use std::time::Duration;

use tracing::info;

use shared_config::AppConfig;

use crate::error::IntakeError;
use crate::models::AppointmentRequest;
use crate::services::form::IntakeForm;

/// Stand-in for a real appointment endpoint: it only waits for a fixed
/// delay and never fails. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    delay: Duration,
}

impl SubmissionService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_delay(Duration::from_millis(config.submit_delay_ms))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn deliver(&self, request: &AppointmentRequest) {
        info!("Submitting appointment request for doctor {}", request.doctor);
        tokio::time::sleep(self.delay).await;
        info!("Appointment request for doctor {} accepted", request.doctor);
    }

    /// Validate, hold the form busy for the delay, then reset it.
    pub async fn submit(&self, form: &mut IntakeForm) -> Result<AppointmentRequest, IntakeError> {
        let request = form.begin_submit()?;
        self.deliver(&request).await;
        form.complete_submit();
        Ok(request)
    }
}
