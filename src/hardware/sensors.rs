//! Environment sensors

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::HardwareError;
use crate::config::SensorPins;

/// One timestamped reading across all sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Soil moisture, percent.
    pub moisture: f64,
    /// Ambient temperature, degrees Celsius.
    pub temperature: f64,
    /// Light level, percent.
    pub light: f64,
    pub timestamp: DateTime<Utc>,
}

/// Reads the moisture/temperature/light sensors.
#[async_trait]
pub trait SensorReader: Send + Sync {
    async fn read(&self) -> Result<SensorSnapshot, HardwareError>;
}

/// Development sensors: produce randomized values in plausible ranges.
pub struct StubSensors {
    pins: SensorPins,
}

impl StubSensors {
    pub fn new(pins: SensorPins) -> Self {
        Self { pins }
    }
}

#[async_trait]
impl SensorReader for StubSensors {
    async fn read(&self) -> Result<SensorSnapshot, HardwareError> {
        debug!(
            "Reading sensors (pins: moisture={} temperature={} light={})",
            self.pins.moisture, self.pins.temperature, self.pins.light
        );

        let mut rng = rand::thread_rng();
        Ok(SensorSnapshot {
            moisture: rng.gen_range(30.0..80.0),
            temperature: rng.gen_range(18.0..28.0),
            light: rng.gen_range(40.0..95.0),
            timestamp: Utc::now(),
        })
    }
}
