//! Hardware capability traits and their stub implementations
//!
//! The agent reaches the pump and the sensors only through these traits so
//! a real GPIO driver can replace the stubs without touching the command
//! logic. The stubs are what ships here: real drivers are wired in at
//! startup by whichever build targets actual hardware.

pub mod pump;
pub mod sensors;

#[cfg(test)]
pub mod mock;

pub use pump::{PumpActuator, StubPump};
pub use sensors::{SensorReader, SensorSnapshot, StubSensors};

use thiserror::Error;

/// Failure surfaced by a hardware capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HardwareError {
    #[error("pump fault: {0}")]
    Pump(String),
    #[error("sensor fault: {0}")]
    Sensor(String),
}
