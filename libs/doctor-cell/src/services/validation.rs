// =====================================================================================
// FORM VALIDATION
// =====================================================================================

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{AppointmentRequest, FormField, FormState, ValidationErrors};

pub const NAME_MIN_LENGTH: usize = 3;

static ONLY_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}+(?: \p{L}+)*$").expect("letters pattern compiles"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern compiles"));

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(field: FormField) -> String {
    format!("{} is a required field", field)
}

/// Message for a single field, or `None` when the current value is acceptable.
pub fn validate_field(field: FormField, form: &FormState) -> Option<String> {
    match field {
        FormField::Name => match present(form.name.as_deref()).map(str::trim) {
            None => Some(required(field)),
            Some(name) if name.chars().count() < NAME_MIN_LENGTH => {
                Some(format!("{} must be at least {} characters", field, NAME_MIN_LENGTH))
            }
            Some(name) if !ONLY_LETTERS.is_match(name) => {
                Some("Only alphabets are allowed for this field".to_string())
            }
            Some(_) => None,
        },
        FormField::BirthdayDate => form.birthday_date.is_none().then(|| required(field)),
        FormField::Sex => form.sex.is_none().then(|| required(field)),
        FormField::City => present(form.city.as_deref()).is_none().then(|| required(field)),
        FormField::Speciality => None,
        FormField::Doctor => present(form.doctor.as_deref()).is_none().then(|| required(field)),
        FormField::Email => match present(form.email.as_deref()) {
            None => Some(required(field)),
            Some(email) if !EMAIL.is_match(email) || email.len() > 254 => {
                Some(format!("{} must be a valid email", field))
            }
            Some(_) => None,
        },
        FormField::Phone => match present(form.phone.as_deref()) {
            Some(phone) if !PHONE.is_match(phone) => {
                Some("Phone number is not valid. Use only numbers".to_string())
            }
            _ => None,
        },
    }
}

pub fn validate_all(form: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in FormField::ALL {
        if let Some(message) = validate_field(field, form) {
            errors.insert(field, message);
        }
    }
    errors
}

/// Validate every field and build the submission payload.
pub fn validate_form(form: &FormState) -> Result<AppointmentRequest, ValidationErrors> {
    let errors = validate_all(form);
    if !errors.is_empty() {
        debug!("Form rejected with {} invalid field(s)", errors.len());
        return Err(errors);
    }

    // Every required field was checked above.
    let (Some(birthday_date), Some(sex)) = (form.birthday_date, form.sex) else {
        return Err(errors);
    };
    let text = |value: &Option<String>| value.as_deref().map(str::trim).unwrap_or_default().to_string();
    let optional = |value: &Option<String>| present(value.as_deref()).map(|v| v.trim().to_string());

    Ok(AppointmentRequest {
        name: text(&form.name),
        birthday_date,
        sex,
        city: text(&form.city),
        speciality: optional(&form.speciality),
        doctor: text(&form.doctor),
        email: text(&form.email),
        phone: optional(&form.phone),
    })
}
