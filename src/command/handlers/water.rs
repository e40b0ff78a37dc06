//! WATER_NOW command handler

use crate::command::CommandResult;
use crate::device::Device;
use crate::hardware::PumpActuator;

/// Handle a WATER_NOW command.
///
/// The device enforces all preconditions (reentrancy, reservoir level,
/// amount range); this handler only translates the result into a
/// reportable outcome. On success the actual amount equals the requested
/// amount — the pump has no flow meter.
pub async fn handle_water_now(
    device: &mut Device,
    pump: &dyn PumpActuator,
    amount_ml: i32,
) -> CommandResult {
    match device.water(pump, amount_ml).await {
        Ok(()) => CommandResult::Completed {
            actual_amount_ml: amount_ml,
        },
        Err(e) => CommandResult::Failed {
            message: e.to_string(),
        },
    }
}
