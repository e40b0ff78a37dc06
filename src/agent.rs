//! The device agent poll loop
//!
//! One iteration: report status, fetch pending commands, process them
//! sequentially, sleep. Errors never terminate the loop; only an interrupt
//! signal does.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::backend::{Backend, StatusReport};
use crate::command::CommandExecutor;
use crate::config::DeviceConfig;
use crate::device::Device;
use crate::hardware::{PumpActuator, SensorReader};

/// Battery level reported until a fuel gauge exists, percent.
const BATTERY_PERCENTAGE: i32 = 85;
/// Radio signal strength reported until the modem exposes it, dBm.
const WIFI_SIGNAL_DBM: i32 = -45;

pub struct Agent {
    backend: Arc<dyn Backend>,
    sensors: Box<dyn SensorReader>,
    executor: CommandExecutor,
    poll_interval: Duration,
    error_backoff: Duration,
}

impl Agent {
    pub fn new(
        config: &DeviceConfig,
        backend: Arc<dyn Backend>,
        pump: Box<dyn PumpActuator>,
        sensors: Box<dyn SensorReader>,
    ) -> Self {
        let device = Device::new(config.reservoir_capacity_ml, config.secs_per_ml);

        Self {
            backend,
            sensors,
            executor: CommandExecutor::new(device, pump),
            poll_interval: config.poll_interval,
            error_backoff: config.error_backoff,
        }
    }

    /// Run the poll loop until an interrupt signal arrives.
    pub async fn run(&mut self) {
        info!("Starting device main loop");

        loop {
            let delay = match self.poll_cycle().await {
                Ok(()) => self.poll_interval,
                Err(e) => {
                    error!("Error in main loop: {e:#}");
                    self.error_backoff
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }
    }

    /// One poll cycle. A transport failure while fetching commands surfaces
    /// here so the loop takes the longer fallback delay; everything else is
    /// absorbed and logged where it happens.
    async fn poll_cycle(&mut self) -> Result<()> {
        self.update_device_status().await;

        let commands = self
            .backend
            .fetch_pending_commands()
            .await
            .context("failed to poll commands")?;

        if !commands.is_empty() {
            info!("Fetched {} pending command(s)", commands.len());
        }

        let backend = self.backend.clone();
        for command in &commands {
            self.executor.process(backend.as_ref(), command).await;
        }

        Ok(())
    }

    /// Read the sensors and push one telemetry record. Failures are logged
    /// and do not abort the cycle.
    async fn update_device_status(&mut self) {
        let readings = match self.sensors.read().await {
            Ok(readings) => readings,
            Err(e) => {
                error!("Sensor reading failed: {e}");
                return;
            }
        };
        self.executor.device_mut().record_reading(readings.clone());

        let device = self.executor.device();
        let report = StatusReport {
            activity: device.activity(),
            reservoir_level_ml: device.reservoir_level_ml(),
            pump_status: device.pump_status(),
            readings,
            battery_percentage: BATTERY_PERCENTAGE,
            wifi_signal_dbm: WIFI_SIGNAL_DBM,
            error_codes: None,
        };

        match self.backend.submit_status(&report).await {
            Ok(()) => debug!("Device status updated"),
            Err(e) => warn!("Failed to update device status: {e}"),
        }
    }
}
