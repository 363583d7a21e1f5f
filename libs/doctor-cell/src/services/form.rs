// libs/doctor-cell/src/services/form.rs
use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::IntakeError;
use crate::models::{
    AppointmentRequest, FilterRules, FormField, FormState, Gender, ReferenceData,
    ValidationErrors, VisibleOptions,
};
use crate::services::filtering::visible_options;
use crate::services::validation::{validate_field, validate_form};

/// One user interaction with the intake form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetName(String),
    SetBirthdayDate(Option<NaiveDate>),
    SetSex(Option<Gender>),
    SetCity(Option<String>),
    SetSpeciality(Option<String>),
    /// Select a doctor by display name.
    SetDoctor(Option<String>),
    SetEmail(String),
    SetPhone(String),
    /// Field lost focus; from now on it reports its validation message.
    Touch(FormField),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Busy,
}

/// Form values plus the option lists derived from them.
///
/// Every transition goes through [`IntakeForm::apply`] (or the submit pair),
/// and the visible options are recomputed from the whole form afterwards.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    reference: Arc<ReferenceData>,
    rules: FilterRules,
    today: NaiveDate,
    state: FormState,
    visible: VisibleOptions,
    touched: BTreeSet<FormField>,
    errors: ValidationErrors,
    status: SubmissionStatus,
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl IntakeForm {
    pub fn new(reference: Arc<ReferenceData>, rules: FilterRules) -> Self {
        Self::with_today(reference, rules, Local::now().date_naive())
    }

    pub fn with_today(reference: Arc<ReferenceData>, rules: FilterRules, today: NaiveDate) -> Self {
        let state = FormState::default();
        let visible = visible_options(&state, &reference, today, &rules);

        Self {
            reference,
            rules,
            today,
            state,
            visible,
            touched: BTreeSet::new(),
            errors: ValidationErrors::default(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn visible(&self) -> &VisibleOptions {
        &self.visible
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status == SubmissionStatus::Busy
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn apply(&mut self, action: FormAction) {
        debug!("Applying form action: {:?}", action);

        let changed: &[FormField] = match action {
            FormAction::SetName(name) => {
                self.state.name = non_blank(name);
                &[FormField::Name]
            }
            FormAction::SetBirthdayDate(date) => {
                self.state.birthday_date = date;
                &[FormField::BirthdayDate]
            }
            FormAction::SetSex(sex) => {
                self.state.sex = sex;
                &[FormField::Sex]
            }
            FormAction::SetCity(city) => {
                self.state.city = city.and_then(non_blank);
                &[FormField::City]
            }
            FormAction::SetSpeciality(speciality) => {
                self.state.speciality = speciality.and_then(non_blank);
                &[FormField::Speciality]
            }
            FormAction::SetDoctor(doctor) => {
                self.select_doctor(doctor.and_then(non_blank));
                &[FormField::Doctor, FormField::City, FormField::Speciality]
            }
            FormAction::SetEmail(email) => {
                self.state.email = non_blank(email);
                &[FormField::Email]
            }
            FormAction::SetPhone(phone) => {
                self.state.phone = non_blank(phone);
                &[FormField::Phone]
            }
            FormAction::Touch(field) => {
                self.touched.insert(field);
                self.revalidate(field);
                return;
            }
            FormAction::Reset => {
                self.reset();
                return;
            }
        };

        for field in changed {
            if self.touched.contains(field) {
                self.revalidate(*field);
            }
        }
        self.refresh_visible();
    }

    /// The chosen doctor's city and speciality replace whatever was selected.
    fn select_doctor(&mut self, doctor: Option<String>) {
        if let Some(name) = doctor.as_deref() {
            if let Some(selected) = self.visible.doctors.iter().find(|d| d.display_name == name) {
                self.state.city = selected.city_name.clone();
                self.state.speciality = selected.speciality_name.clone();
            }
        }
        self.state.doctor = doctor;
    }

    fn revalidate(&mut self, field: FormField) {
        match validate_field(field, &self.state) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.remove(field),
        }
    }

    fn refresh_visible(&mut self) {
        self.visible = visible_options(&self.state, &self.reference, self.today, &self.rules);
    }

    fn reset(&mut self) {
        self.state = FormState::default();
        self.touched.clear();
        self.errors = ValidationErrors::default();
        self.refresh_visible();
    }

    /// Validate everything and, if the form is clean, enter the busy state.
    pub fn begin_submit(&mut self) -> Result<AppointmentRequest, IntakeError> {
        if self.is_busy() {
            return Err(IntakeError::SubmissionInProgress);
        }

        self.touched.extend(FormField::ALL);

        match validate_form(&self.state) {
            Ok(request) => {
                self.errors = ValidationErrors::default();
                self.status = SubmissionStatus::Busy;
                Ok(request)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(IntakeError::Validation(errors))
            }
        }
    }

    /// Leave the busy state and clear every field.
    pub fn complete_submit(&mut self) {
        self.status = SubmissionStatus::Idle;
        self.reset();
    }
}
