use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_CITIES_ENDPOINT: &str = "9fcb58ca-d3dd-424b-873b-dd3c76f000f4";
pub const DEFAULT_SPECIALITIES_ENDPOINT: &str = "e8897b19-46a0-4124-8454-0938225ee9ca";
pub const DEFAULT_DOCTORS_ENDPOINT: &str = "3d1c993c-cd8e-44c3-b1cb-585222859c21";

pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 4000;
pub const DEFAULT_MIN_AGE: u32 = 0;
pub const DEFAULT_MAX_AGE: u32 = 120;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub reference_data_base_url: String,
    pub cities_endpoint: String,
    pub specialities_endpoint: String,
    pub doctors_endpoint: String,
    pub submit_delay_ms: u64,
    pub default_min_age: u32,
    pub default_max_age: u32,
    /// `within_defaults` or `literal`, parsed by the doctor cell.
    pub fallback_age_rule: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_data_base_url: String::new(),
            cities_endpoint: DEFAULT_CITIES_ENDPOINT.to_string(),
            specialities_endpoint: DEFAULT_SPECIALITIES_ENDPOINT.to_string(),
            doctors_endpoint: DEFAULT_DOCTORS_ENDPOINT.to_string(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            default_min_age: DEFAULT_MIN_AGE,
            default_max_age: DEFAULT_MAX_AGE,
            fallback_age_rule: "within_defaults".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            reference_data_base_url: env::var("REFERENCE_DATA_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("REFERENCE_DATA_BASE_URL not set, using empty value");
                    String::new()
                }),
            cities_endpoint: string_var("CITIES_ENDPOINT", defaults.cities_endpoint),
            specialities_endpoint: string_var("SPECIALITIES_ENDPOINT", defaults.specialities_endpoint),
            doctors_endpoint: string_var("DOCTORS_ENDPOINT", defaults.doctors_endpoint),
            submit_delay_ms: parse_var("SUBMIT_DELAY_MS", defaults.submit_delay_ms),
            default_min_age: parse_var("DEFAULT_MIN_AGE", defaults.default_min_age),
            default_max_age: parse_var("DEFAULT_MAX_AGE", defaults.default_max_age),
            fallback_age_rule: string_var("FALLBACK_AGE_RULE", defaults.fallback_age_rule),
            port: parse_var("PORT", defaults.port),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.reference_data_base_url.is_empty()
            && !self.cities_endpoint.is_empty()
            && !self.specialities_endpoint.is_empty()
            && !self.doctors_endpoint.is_empty()
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}

fn string_var(name: &str, default: String) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{} not set, using default '{}'", name, default);
        default
    })
}
