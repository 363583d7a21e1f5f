pub mod enrichment;
pub mod filtering;
pub mod form;
pub mod reference;
pub mod submission;
pub mod validation;

pub use form::{FormAction, IntakeForm, SubmissionStatus};
pub use reference::{HttpReferenceSource, ReferenceDataService, ReferenceSource};
pub use submission::SubmissionService;
