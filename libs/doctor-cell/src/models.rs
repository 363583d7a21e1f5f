use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_config::AppConfig;

// ==============================================================================
// REFERENCE DATA (wire format of the three list endpoints)
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn opposite(self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
}

/// Patient constraint attached to a speciality. Every field is optional and
/// an absent (or `null`) field leaves that dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialityParams {
    #[serde(default)]
    pub max_age: Option<u32>,
    #[serde(default)]
    pub min_age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<SpecialityParams>,
}

impl Speciality {
    pub fn gender_constraint(&self) -> Option<Gender> {
        self.params.as_ref().and_then(|p| p.gender)
    }

    pub fn max_age(&self) -> Option<u32> {
        self.params.as_ref().and_then(|p| p.max_age)
    }

    pub fn min_age(&self) -> Option<u32> {
        self.params.as_ref().and_then(|p| p.min_age)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub city_id: String,
    pub speciality_id: String,
    pub is_pediatrician: bool,
}

impl DoctorRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Doctor joined with its city and speciality. Name fields are `None` when
/// the referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDoctor {
    pub id: String,
    pub display_name: String,
    pub speciality_name: Option<String>,
    pub city_name: Option<String>,
    pub is_pediatrician: bool,
    pub max_age: Option<u32>,
    pub min_age: Option<u32>,
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub cities: Vec<City>,
    pub specialities: Vec<Speciality>,
    pub doctors: Vec<EnrichedDoctor>,
}

/// Outcome of the joint fetch as shown to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Ready(ReferenceData),
    Failed { message: String },
}

impl PageState {
    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready(_))
    }

    pub fn reference_data(&self) -> Option<&ReferenceData> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

// ==============================================================================
// FORM
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    BirthdayDate,
    Sex,
    City,
    Speciality,
    Doctor,
    Email,
    Phone,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::BirthdayDate,
        FormField::Sex,
        FormField::City,
        FormField::Speciality,
        FormField::Doctor,
        FormField::Email,
        FormField::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::BirthdayDate => "birthdayDate",
            FormField::Sex => "sex",
            FormField::City => "city",
            FormField::Speciality => "speciality",
            FormField::Doctor => "doctor",
            FormField::Email => "email",
            FormField::Phone => "phone",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub name: Option<String>,
    pub birthday_date: Option<NaiveDate>,
    pub sex: Option<Gender>,
    pub city: Option<String>,
    pub speciality: Option<String>,
    pub doctor: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FormState {
    pub fn is_empty(&self) -> bool {
        *self == FormState::default()
    }
}

/// Options currently offered for the speciality and doctor selects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisibleOptions {
    pub specialities: Vec<Speciality>,
    pub doctors: Vec<EnrichedDoctor>,
}

/// Field-level validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(pub BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str().to_string(), message.clone()))
            .collect()
    }
}

/// Payload produced from a form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub name: String,
    pub birthday_date: NaiveDate,
    pub sex: Gender,
    pub city: String,
    pub speciality: Option<String>,
    pub doctor: String,
    pub email: String,
    pub phone: Option<String>,
}

// ==============================================================================
// FILTER RULES
// ==============================================================================

/// Age rule for doctors whose speciality declares neither bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAgeRule {
    /// `default_min_age < age < default_max_age`
    #[default]
    WithinDefaults,
    /// `age > default_max_age && age < default_min_age`, as the form first shipped.
    Literal,
}

impl FromStr for FallbackAgeRule {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "within_defaults" => Ok(FallbackAgeRule::WithinDefaults),
            "literal" => Ok(FallbackAgeRule::Literal),
            other => Err(format!(
                "Invalid fallback age rule: '{}'. Must be one of: within_defaults, literal",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRules {
    pub default_min_age: u32,
    pub default_max_age: u32,
    pub fallback: FallbackAgeRule,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            default_min_age: shared_config::DEFAULT_MIN_AGE,
            default_max_age: shared_config::DEFAULT_MAX_AGE,
            fallback: FallbackAgeRule::WithinDefaults,
        }
    }
}

impl FilterRules {
    pub fn from_config(config: &AppConfig) -> Self {
        let fallback = config.fallback_age_rule.parse::<FallbackAgeRule>().unwrap_or_else(|e: String| {
            tracing::warn!("{}, using within_defaults", e);
            FallbackAgeRule::WithinDefaults
        });

        Self {
            default_min_age: config.default_min_age,
            default_max_age: config.default_max_age,
            fallback,
        }
    }
}
