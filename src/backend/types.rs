//! Wire types shared by the backend client and the command executor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::{Activity, PumpStatus};
use crate::hardware::SensorSnapshot;

/// Kind of work a command asks for.
///
/// Unknown wire values are preserved verbatim so the failure report can
/// name exactly what the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CommandType {
    WaterNow,
    StopWatering,
    Other(String),
}

impl From<String> for CommandType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "water_now" => Self::WaterNow,
            "stop_watering" => Self::StopWatering,
            _ => Self::Other(raw),
        }
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WaterNow => write!(f, "water_now"),
            Self::StopWatering => write!(f, "stop_watering"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// One unit of work issued by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WateringCommand {
    pub command_id: String,
    pub command_type: CommandType,
    /// Milliliters to dispense; meaningful only for `WaterNow`.
    #[serde(rename = "water_amount", default)]
    pub water_amount_ml: i32,
    /// Informational; the agent does not order commands by it.
    pub created_at: DateTime<Utc>,
}

/// Terminal outcome of a command, reported back to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub actual_amount_ml: Option<i32>,
    pub error_message: Option<String>,
}

/// One telemetry record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub activity: Activity,
    pub reservoir_level_ml: i32,
    pub pump_status: PumpStatus,
    pub readings: SensorSnapshot,
    pub battery_percentage: i32,
    pub wifi_signal_dbm: i32,
    /// Reserved slot; this agent currently never reports error codes.
    pub error_codes: Option<Vec<String>>,
}

/// Generic `{success, error?}` RPC answer.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct RpcAnswer {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
