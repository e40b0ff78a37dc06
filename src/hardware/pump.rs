//! Pump actuation

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::HardwareError;

/// Drives the water pump for a fixed duration.
#[async_trait]
pub trait PumpActuator: Send + Sync {
    /// Run the pump for `duration`, blocking the caller until it is off
    /// again.
    async fn activate(&self, duration: Duration) -> Result<(), HardwareError>;

    /// Human-readable name for this driver.
    fn name(&self) -> &'static str;
}

/// Development pump: sleeps for the requested duration instead of switching
/// a control pin.
pub struct StubPump {
    control_pin: u8,
}

impl StubPump {
    pub fn new(control_pin: u8) -> Self {
        Self { control_pin }
    }
}

#[async_trait]
impl PumpActuator for StubPump {
    async fn activate(&self, duration: Duration) -> Result<(), HardwareError> {
        info!(
            "Pump ON (pin {}) for {:.1} seconds",
            self.control_pin,
            duration.as_secs_f64()
        );
        tokio::time::sleep(duration).await;
        info!("Pump OFF");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
