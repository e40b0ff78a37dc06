//! Environment-sourced device configuration
//!
//! Credentials have no usable default: startup fails fast when the device
//! id or API key is missing or still set to a placeholder. Everything else
//! carries a development default.

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEVICE_ID_VAR: &str = "WATERING_DEVICE_ID";
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const API_KEY_VAR: &str = "BACKEND_API_KEY";
pub const PUMP_PIN_VAR: &str = "PUMP_PIN";
pub const MOISTURE_PIN_VAR: &str = "MOISTURE_PIN";
pub const TEMPERATURE_PIN_VAR: &str = "TEMPERATURE_PIN";
pub const LIGHT_PIN_VAR: &str = "LIGHT_PIN";
pub const SECS_PER_ML_VAR: &str = "PUMP_SECS_PER_ML";
pub const RESERVOIR_CAPACITY_VAR: &str = "RESERVOIR_CAPACITY_ML";

/// Local supabase dev stack default.
const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";

/// Pump calibration default: 1ml of water per 0.1s of pump-on time.
const DEFAULT_SECS_PER_ML: f64 = 0.1;

const DEFAULT_RESERVOIR_CAPACITY_ML: i32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },
    #[error("{var} is still set to a placeholder value")]
    Placeholder { var: &'static str },
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Pin assignments for the sensor suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorPins {
    pub moisture: u8,
    pub temperature: u8,
    pub light: u8,
}

impl Default for SensorPins {
    fn default() -> Self {
        Self {
            moisture: 21,
            temperature: 22,
            light: 23,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Backend identity of this device.
    pub device_id: String,
    /// Backend base address.
    pub backend_url: String,
    /// Static API key, sent as both identification header and bearer token.
    pub api_key: String,
    /// Pump control pin.
    pub pump_pin: u8,
    pub sensor_pins: SensorPins,
    /// Seconds of pump-on time per milliliter dispensed.
    pub secs_per_ml: f64,
    /// Reservoir fill level at startup.
    pub reservoir_capacity_ml: i32,
    /// Sleep between successful poll cycles.
    pub poll_interval: Duration,
    /// Sleep after a poll cycle that ended in an error.
    pub error_backoff: Duration,
}

impl DeviceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            device_id: require(DEVICE_ID_VAR, env::var(DEVICE_ID_VAR).ok())?,
            backend_url: env::var(BACKEND_URL_VAR)
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.into()),
            api_key: require(API_KEY_VAR, env::var(API_KEY_VAR).ok())?,
            pump_pin: parse_or(PUMP_PIN_VAR, env::var(PUMP_PIN_VAR).ok(), 18)?,
            sensor_pins: SensorPins {
                moisture: parse_or(MOISTURE_PIN_VAR, env::var(MOISTURE_PIN_VAR).ok(), 21)?,
                temperature: parse_or(
                    TEMPERATURE_PIN_VAR,
                    env::var(TEMPERATURE_PIN_VAR).ok(),
                    22,
                )?,
                light: parse_or(LIGHT_PIN_VAR, env::var(LIGHT_PIN_VAR).ok(), 23)?,
            },
            secs_per_ml: parse_rate(SECS_PER_ML_VAR, env::var(SECS_PER_ML_VAR).ok())?,
            reservoir_capacity_ml: parse_or(
                RESERVOIR_CAPACITY_VAR,
                env::var(RESERVOIR_CAPACITY_VAR).ok(),
                DEFAULT_RESERVOIR_CAPACITY_ML,
            )?,
            poll_interval: Duration::from_secs(10),
            error_backoff: Duration::from_secs(30),
        })
    }
}

/// Required credential: present, non-empty, and not a `your-...-here`
/// placeholder copied from a sample env file.
fn require(var: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(ConfigError::Missing { var }),
    };
    if value.starts_with("your-") && value.ends_with("-here") {
        return Err(ConfigError::Placeholder { var });
    }
    Ok(value)
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}

/// Dispensing rate must parse and be strictly positive.
fn parse_rate(var: &'static str, value: Option<String>) -> Result<f64, ConfigError> {
    let rate: f64 = parse_or(var, value.clone(), DEFAULT_SECS_PER_ML)?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ConfigError::Invalid {
            var,
            value: value.unwrap_or_default(),
        });
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_empty() {
        assert_eq!(
            require(DEVICE_ID_VAR, None),
            Err(ConfigError::Missing {
                var: DEVICE_ID_VAR
            })
        );
        assert_eq!(
            require(DEVICE_ID_VAR, Some("  ".into())),
            Err(ConfigError::Missing {
                var: DEVICE_ID_VAR
            })
        );
    }

    #[test]
    fn require_rejects_sample_placeholders() {
        assert_eq!(
            require(DEVICE_ID_VAR, Some("your-device-uuid-here".into())),
            Err(ConfigError::Placeholder {
                var: DEVICE_ID_VAR
            })
        );
        assert_eq!(
            require(API_KEY_VAR, Some("your-api-key-here".into())),
            Err(ConfigError::Placeholder { var: API_KEY_VAR })
        );
    }

    #[test]
    fn require_accepts_real_values() {
        let value = require(DEVICE_ID_VAR, Some("device-42".into())).unwrap();
        assert_eq!(value, "device-42");
    }

    #[test]
    fn pins_default_when_unset() {
        assert_eq!(parse_or(PUMP_PIN_VAR, None, 18u8).unwrap(), 18);
        assert_eq!(
            parse_or(PUMP_PIN_VAR, Some("7".into()), 18u8).unwrap(),
            7
        );
    }

    #[test]
    fn garbage_pin_is_invalid() {
        let err = parse_or(PUMP_PIN_VAR, Some("gpio18".into()), 18u8).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: PUMP_PIN_VAR,
                value: "gpio18".into()
            }
        );
    }

    #[test]
    fn rate_must_be_positive() {
        assert!(parse_rate(SECS_PER_ML_VAR, Some("0".into())).is_err());
        assert!(parse_rate(SECS_PER_ML_VAR, Some("-0.1".into())).is_err());
        assert!(parse_rate(SECS_PER_ML_VAR, Some("inf".into())).is_err());
        assert!((parse_rate(SECS_PER_ML_VAR, None).unwrap() - 0.1).abs() < f64::EPSILON);
        assert!((parse_rate(SECS_PER_ML_VAR, Some("0.25".into())).unwrap() - 0.25).abs()
            < f64::EPSILON);
    }
}
