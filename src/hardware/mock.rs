//! Recording hardware doubles for unit tests

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::{HardwareError, PumpActuator, SensorReader, SensorSnapshot};

/// Pump double: records every activation instead of sleeping, and can be
/// seeded with a one-shot failure.
pub struct MockPump {
    activations: Mutex<Vec<Duration>>,
    fail_with: Mutex<Option<HardwareError>>,
}

impl MockPump {
    pub fn new() -> Self {
        Self {
            activations: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
        }
    }

    /// Make the next activation fail with `err`.
    pub fn with_error(self, err: HardwareError) -> Self {
        *self.fail_with.lock().unwrap() = Some(err);
        self
    }

    /// Durations of all recorded activations.
    pub fn activations(&self) -> Vec<Duration> {
        self.activations.lock().unwrap().clone()
    }
}

#[async_trait]
impl PumpActuator for MockPump {
    async fn activate(&self, duration: Duration) -> Result<(), HardwareError> {
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        self.activations.lock().unwrap().push(duration);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Sensor double returning a fixed snapshot, or a seeded failure.
pub struct MockSensors {
    fail_with: Mutex<Option<HardwareError>>,
}

impl MockSensors {
    pub fn new() -> Self {
        Self {
            fail_with: Mutex::new(None),
        }
    }

    pub fn with_error(self, err: HardwareError) -> Self {
        *self.fail_with.lock().unwrap() = Some(err);
        self
    }
}

#[async_trait]
impl SensorReader for MockSensors {
    async fn read(&self) -> Result<SensorSnapshot, HardwareError> {
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        Ok(SensorSnapshot {
            moisture: 55.0,
            temperature: 21.5,
            light: 72.0,
            timestamp: Utc::now(),
        })
    }
}
