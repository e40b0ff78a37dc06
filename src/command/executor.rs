//! Command executor - acknowledges, dispatches and reports commands

use tracing::{debug, error, info};

use super::handlers;
use crate::backend::{Backend, CommandOutcome, CommandType, WateringCommand};
use crate::device::Device;
use crate::hardware::PumpActuator;

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed; `actual_amount_ml` is what was dispensed.
    Completed { actual_amount_ml: i32 },
    /// Command executed but did not do its work.
    Failed { message: String },
}

impl CommandResult {
    fn into_outcome(self) -> CommandOutcome {
        match self {
            Self::Completed { actual_amount_ml } => CommandOutcome {
                success: true,
                actual_amount_ml: Some(actual_amount_ml),
                error_message: None,
            },
            Self::Failed { message } => CommandOutcome {
                success: false,
                actual_amount_ml: None,
                error_message: Some(message),
            },
        }
    }
}

/// Executes commands fetched from the backend, one at a time.
///
/// Owns the device state and the pump; the processing of a single command
/// runs `received -> acknowledged -> {succeeded | failed}`, and terminal
/// states are always reported. A command whose acknowledgment fails is
/// dropped without a completion report - the backend still holds it as
/// pending and decides what happens next.
pub struct CommandExecutor {
    device: Device,
    pump: Box<dyn PumpActuator>,
}

impl CommandExecutor {
    pub fn new(device: Device, pump: Box<dyn PumpActuator>) -> Self {
        Self { device, pump }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut Device {
        &mut self.device
    }

    /// Process a single command end to end.
    pub async fn process(&mut self, backend: &dyn Backend, command: &WateringCommand) {
        info!(
            "Processing command {}: {} {}ml",
            command.command_id, command.command_type, command.water_amount_ml
        );

        if let Err(e) = backend.acknowledge_command(&command.command_id).await {
            error!("Failed to acknowledge command {}: {e}", command.command_id);
            return;
        }
        debug!("Command {} acknowledged", command.command_id);

        let result = match &command.command_type {
            CommandType::WaterNow => {
                handlers::handle_water_now(&mut self.device, &*self.pump, command.water_amount_ml)
                    .await
            }
            CommandType::StopWatering => handlers::handle_stop_watering(&mut self.device),
            CommandType::Other(raw) => CommandResult::Failed {
                message: format!("Unknown command type: {raw}"),
            },
        };

        match &result {
            CommandResult::Completed { .. } => {
                info!("Command {} completed", command.command_id);
            }
            CommandResult::Failed { message } => {
                error!("Command {} failed: {message}", command.command_id);
            }
        }

        let outcome = result.into_outcome();
        if let Err(e) = backend.complete_command(&command.command_id, &outcome).await {
            error!(
                "Failed to report completion for command {}: {e}",
                command.command_id
            );
        }
    }
}
