mod agent;
mod backend;
mod command;
mod config;
mod device;
mod hardware;

use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agent::Agent;
use backend::{Backend, HttpBackend};
use config::DeviceConfig;
use hardware::{PumpActuator, SensorReader, StubPump, StubSensors};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    if let Err(e) = run().await {
        error!("Failed to start device: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenv().ok();

    let config = DeviceConfig::from_env().context("invalid configuration")?;

    info!("Watering device starting: {}", config.device_id);
    info!("  backend: {}", config.backend_url);

    let backend: Arc<dyn Backend> =
        Arc::new(HttpBackend::new(&config).context("backend client setup failed")?);

    let pump: Box<dyn PumpActuator> = Box::new(StubPump::new(config.pump_pin));
    let sensors: Box<dyn SensorReader> = Box::new(StubSensors::new(config.sensor_pins.clone()));
    info!(
        "Hardware initialized (pump driver: {}, pin {})",
        pump.name(),
        config.pump_pin
    );

    let mut agent = Agent::new(&config, backend, pump, sensors);
    agent.run().await;

    Ok(())
}
