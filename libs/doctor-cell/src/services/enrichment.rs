use tracing::warn;

use crate::models::{City, DoctorRecord, EnrichedDoctor, Speciality};

/// Join each raw doctor with its city and speciality by id.
///
/// Lists are small, so lookups are linear. A dangling reference leaves the
/// corresponding name (and, for specialities, the constraint) empty.
pub fn enrich_doctors(
    doctors: &[DoctorRecord],
    cities: &[City],
    specialities: &[Speciality],
) -> Vec<EnrichedDoctor> {
    doctors
        .iter()
        .map(|doctor| {
            let speciality = specialities.iter().find(|s| s.id == doctor.speciality_id);
            let city = cities.iter().find(|c| c.id == doctor.city_id);

            if speciality.is_none() {
                warn!("Doctor {} references unknown speciality {}", doctor.id, doctor.speciality_id);
            }
            if city.is_none() {
                warn!("Doctor {} references unknown city {}", doctor.id, doctor.city_id);
            }

            EnrichedDoctor {
                id: doctor.id.clone(),
                display_name: doctor.full_name(),
                speciality_name: speciality.map(|s| s.name.clone()),
                city_name: city.map(|c| c.name.clone()),
                is_pediatrician: doctor.is_pediatrician,
                max_age: speciality.and_then(Speciality::max_age),
                min_age: speciality.and_then(Speciality::min_age),
                gender: speciality.and_then(Speciality::gender_constraint),
            }
        })
        .collect()
}
