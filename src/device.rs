//! Device state and the watering operation
//!
//! Owns the mutable device state (activity, pump status, reservoir level)
//! and enforces the watering invariants: no reentrant watering, the
//! reservoir never goes negative, and the device always returns to idle
//! after a watering attempt.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::hardware::{PumpActuator, SensorSnapshot};

/// Largest amount a single command may dispense.
pub const MAX_WATER_AMOUNT_ML: i32 = 1000;

/// What the device is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Idle,
    Watering,
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Idle => write!(f, "idle"),
            Activity::Watering => write!(f, "watering"),
        }
    }
}

/// Pump state, reported separately from activity for telemetry granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PumpStatus {
    Idle,
    Running,
}

impl std::fmt::Display for PumpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PumpStatus::Idle => write!(f, "idle"),
            PumpStatus::Running => write!(f, "running"),
        }
    }
}

/// Why a watering attempt was not carried out (or did not finish).
///
/// Validation failures are values, not panics; the `Display` text is what
/// gets reported back to the backend verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WateringError {
    #[error("Device is already watering")]
    AlreadyWatering,
    #[error("Insufficient water in reservoir ({available}ml available)")]
    InsufficientReservoir { available: i32 },
    #[error("Invalid water amount (must be 1-{MAX_WATER_AMOUNT_ML}ml)")]
    InvalidAmount,
    #[error("Watering failed: {0}")]
    Pump(String),
}

/// Process-lifetime state of the watering unit.
///
/// Mutated only by the agent's single control thread; there is no shared
/// access and no persistence across restarts.
#[derive(Debug)]
pub struct Device {
    activity: Activity,
    pump_status: PumpStatus,
    reservoir_level_ml: i32,
    is_watering: bool,
    /// Pump calibration: seconds of pump-on time per milliliter dispensed.
    secs_per_ml: f64,
    last_reading: Option<SensorSnapshot>,
}

impl Device {
    pub fn new(reservoir_capacity_ml: i32, secs_per_ml: f64) -> Self {
        Self {
            activity: Activity::Idle,
            pump_status: PumpStatus::Idle,
            reservoir_level_ml: reservoir_capacity_ml,
            is_watering: false,
            secs_per_ml,
            last_reading: None,
        }
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn pump_status(&self) -> PumpStatus {
        self.pump_status
    }

    pub fn reservoir_level_ml(&self) -> i32 {
        self.reservoir_level_ml
    }

    pub fn last_reading(&self) -> Option<&SensorSnapshot> {
        self.last_reading.as_ref()
    }

    pub fn record_reading(&mut self, reading: SensorSnapshot) {
        self.last_reading = Some(reading);
    }

    /// Dispense `amount_ml` through the pump.
    ///
    /// Preconditions are checked in order and the first failing one returns
    /// without mutating any state. The reservoir is decremented only after
    /// the pump run finishes cleanly; the idle reset runs on every exit
    /// path, including pump failure.
    pub async fn water(
        &mut self,
        pump: &dyn PumpActuator,
        amount_ml: i32,
    ) -> Result<(), WateringError> {
        if self.is_watering {
            return Err(WateringError::AlreadyWatering);
        }
        if amount_ml > self.reservoir_level_ml {
            return Err(WateringError::InsufficientReservoir {
                available: self.reservoir_level_ml,
            });
        }
        if amount_ml <= 0 || amount_ml > MAX_WATER_AMOUNT_ML {
            return Err(WateringError::InvalidAmount);
        }

        self.is_watering = true;
        self.pump_status = PumpStatus::Running;
        self.activity = Activity::Watering;

        info!("Starting to water {}ml", amount_ml);

        let runtime = Duration::from_secs_f64(f64::from(amount_ml) * self.secs_per_ml);
        let outcome = pump.activate(runtime).await;

        if outcome.is_ok() {
            self.reservoir_level_ml -= amount_ml;
            info!(
                "Watering completed. Reservoir level: {}ml",
                self.reservoir_level_ml
            );
        }

        self.force_idle();

        outcome.map_err(|e| WateringError::Pump(e.to_string()))
    }

    /// Reset to idle unconditionally.
    ///
    /// This is a local override between poll cycles: the loop is single
    /// threaded, so it cannot reach a pump run that is still blocking the
    /// watering call above.
    pub fn force_idle(&mut self) {
        self.is_watering = false;
        self.pump_status = PumpStatus::Idle;
        self.activity = Activity::Idle;
    }
}
