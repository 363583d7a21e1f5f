// libs/doctor-cell/src/services/filtering.rs
use chrono::{Datelike, NaiveDate};

use crate::models::{
    EnrichedDoctor, FallbackAgeRule, FilterRules, FormState, Gender, ReferenceData,
    Speciality, VisibleOptions,
};

/// Whole years between `birthday` and `today`. Future birth dates give 0.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// A speciality stays visible unless it is restricted to the opposite sex.
pub fn visible_specialities(sex: Option<Gender>, specialities: &[Speciality]) -> Vec<Speciality> {
    specialities
        .iter()
        .filter(|speciality| match (sex, speciality.gender_constraint()) {
            (Some(sex), Some(constraint)) => constraint != sex.opposite(),
            _ => true,
        })
        .cloned()
        .collect()
}

/// City and speciality only constrain the result once the form has a non-blank
/// value for them.
fn matches_selected_keys(doctor: &EnrichedDoctor, form: &FormState) -> bool {
    let applicable = [
        (form.city.as_deref(), doctor.city_name.as_deref()),
        (form.speciality.as_deref(), doctor.speciality_name.as_deref()),
    ];

    applicable
        .iter()
        .filter_map(|(selected, actual)| {
            selected.filter(|s| !s.trim().is_empty()).map(|s| (s, *actual))
        })
        .all(|(selected, actual)| actual == Some(selected))
}

pub fn age_allows(doctor: &EnrichedDoctor, age: Option<u32>, rules: &FilterRules) -> bool {
    let Some(age) = age else {
        return true;
    };

    if let Some(max_age) = doctor.max_age {
        return age <= max_age;
    }
    if let Some(min_age) = doctor.min_age {
        return age >= min_age;
    }

    match rules.fallback {
        FallbackAgeRule::WithinDefaults => age > rules.default_min_age && age < rules.default_max_age,
        FallbackAgeRule::Literal => age > rules.default_max_age && age < rules.default_min_age,
    }
}

pub fn visible_doctors(
    form: &FormState,
    doctors: &[EnrichedDoctor],
    today: NaiveDate,
    rules: &FilterRules,
) -> Vec<EnrichedDoctor> {
    let age = form.birthday_date.map(|birthday| age_on(birthday, today));

    doctors
        .iter()
        .filter(|doctor| matches_selected_keys(doctor, form) && age_allows(doctor, age, rules))
        .cloned()
        .collect()
}

/// Recompute both option lists from scratch for the current form values.
pub fn visible_options(
    form: &FormState,
    reference: &ReferenceData,
    today: NaiveDate,
    rules: &FilterRules,
) -> VisibleOptions {
    VisibleOptions {
        specialities: visible_specialities(form.sex, &reference.specialities),
        doctors: visible_doctors(form, &reference.doctors, today, rules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpecialityParams;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn speciality(id: &str, gender: Option<Gender>) -> Speciality {
        Speciality {
            id: id.to_string(),
            name: id.to_string(),
            params: gender.map(|g| SpecialityParams {
                gender: Some(g),
                ..SpecialityParams::default()
            }),
        }
    }

    fn doctor(max_age: Option<u32>, min_age: Option<u32>) -> EnrichedDoctor {
        EnrichedDoctor {
            id: "d1".to_string(),
            display_name: "Jane Doe".to_string(),
            speciality_name: Some("Therapy".to_string()),
            city_name: Some("Metropolis".to_string()),
            is_pediatrician: false,
            max_age,
            min_age,
            gender: None,
        }
    }

    #[test]
    fn test_age_on_respects_birthday_boundary() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on(date(2014, 6, 15), today), 10);
        assert_eq!(age_on(date(2014, 6, 16), today), 9);
        assert_eq!(age_on(date(2000, 2, 29), date(2024, 2, 28)), 23);
        assert_eq!(age_on(date(2025, 1, 1), today), 0);
    }

    #[test]
    fn test_visible_specialities_by_sex() {
        let all = vec![
            speciality("open", None),
            speciality("male-only", Some(Gender::Male)),
            speciality("female-only", Some(Gender::Female)),
        ];

        let ids = |sex| -> Vec<String> {
            visible_specialities(sex, &all).into_iter().map(|s| s.id).collect()
        };

        assert_eq!(ids(Some(Gender::Male)), vec!["open", "male-only"]);
        assert_eq!(ids(Some(Gender::Female)), vec!["open", "female-only"]);
        assert_eq!(ids(None), vec!["open", "male-only", "female-only"]);
    }

    #[test]
    fn test_age_rule_max_bound_is_inclusive() {
        let rules = FilterRules::default();
        let d = doctor(Some(17), None);
        assert!(age_allows(&d, Some(17), &rules));
        assert!(!age_allows(&d, Some(18), &rules));
    }

    #[test]
    fn test_age_rule_min_bound_is_inclusive() {
        let rules = FilterRules::default();
        let d = doctor(None, Some(18));
        assert!(age_allows(&d, Some(18), &rules));
        assert!(!age_allows(&d, Some(17), &rules));
    }

    #[test]
    fn test_age_rule_max_takes_precedence_over_min() {
        let rules = FilterRules::default();
        let d = doctor(Some(30), Some(40));
        assert!(age_allows(&d, Some(20), &rules));
        assert!(!age_allows(&d, Some(35), &rules));
    }

    #[test]
    fn test_unknown_age_skips_age_rule() {
        let literal = FilterRules {
            fallback: FallbackAgeRule::Literal,
            ..FilterRules::default()
        };
        assert!(age_allows(&doctor(Some(5), None), None, &literal));
        assert!(age_allows(&doctor(None, None), None, &literal));
    }

    #[test]
    fn test_fallback_rules() {
        let d = doctor(None, None);

        let within = FilterRules::default();
        assert!(age_allows(&d, Some(30), &within));
        assert!(!age_allows(&d, Some(0), &within));
        assert!(!age_allows(&d, Some(120), &within));

        let literal = FilterRules {
            fallback: FallbackAgeRule::Literal,
            ..FilterRules::default()
        };
        for age in [0, 30, 120, 200] {
            assert!(!age_allows(&d, Some(age), &literal));
        }
    }

    #[test]
    fn test_selected_keys_require_exact_match() {
        let d = doctor(None, None);
        let mut form = FormState::default();
        assert!(matches_selected_keys(&d, &form));

        form.city = Some("Metropolis".to_string());
        assert!(matches_selected_keys(&d, &form));

        form.speciality = Some("therapy".to_string());
        assert!(!matches_selected_keys(&d, &form));

        form.speciality = Some("Therapy".to_string());
        form.city = Some("Gotham".to_string());
        assert!(!matches_selected_keys(&d, &form));
    }

    #[test]
    fn test_blank_selection_does_not_constrain() {
        let d = doctor(None, None);
        let form = FormState {
            city: Some(String::new()),
            speciality: Some("  ".to_string()),
            ..FormState::default()
        };
        assert!(matches_selected_keys(&d, &form));
    }

    #[test]
    fn test_zero_bounds_are_declared_bounds() {
        let rules = FilterRules::default();

        let max_zero = doctor(Some(0), None);
        assert!(age_allows(&max_zero, Some(0), &rules));
        assert!(!age_allows(&max_zero, Some(1), &rules));

        // The default fallback rejects age 0, a declared minAge of 0 must not.
        let min_zero = doctor(None, Some(0));
        assert!(age_allows(&min_zero, Some(0), &rules));
        assert!(age_allows(&min_zero, Some(130), &rules));

        let literal = FilterRules {
            fallback: FallbackAgeRule::Literal,
            ..FilterRules::default()
        };
        assert!(age_allows(&min_zero, Some(30), &literal));
        assert!(age_allows(&max_zero, Some(0), &literal));
    }

    #[test]
    fn test_doctor_without_city_never_matches_selected_city() {
        let mut d = doctor(None, None);
        d.city_name = None;
        let form = FormState {
            city: Some("Metropolis".to_string()),
            ..FormState::default()
        };
        assert!(!matches_selected_keys(&d, &form));
    }

    #[test]
    fn test_visible_options_end_to_end() {
        let mut pediatrician = doctor(Some(17), None);
        pediatrician.speciality_name = Some("Pediatrics".to_string());
        let reference = ReferenceData {
            cities: vec![],
            specialities: vec![speciality("Pediatrics", None)],
            doctors: vec![pediatrician],
        };
        let today = date(2024, 6, 15);
        let rules = FilterRules::default();

        let mut form = FormState {
            city: Some("Metropolis".to_string()),
            birthday_date: Some(date(2014, 1, 1)),
            ..FormState::default()
        };
        assert_eq!(visible_options(&form, &reference, today, &rules).doctors.len(), 1);

        form.birthday_date = Some(date(2004, 1, 1));
        assert!(visible_options(&form, &reference, today, &rules).doctors.is_empty());
    }
}
