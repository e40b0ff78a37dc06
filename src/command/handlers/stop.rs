//! STOP_WATERING command handler

use tracing::info;

use crate::command::CommandResult;
use crate::device::Device;

/// Handle a STOP_WATERING command.
///
/// Always succeeds, whatever state the device is in. The loop is single
/// threaded, so a pump run in progress blocks command processing entirely;
/// by the time this handler executes there is nothing left to interrupt
/// and the reset only clears residual state between poll cycles.
pub fn handle_stop_watering(device: &mut Device) -> CommandResult {
    device.force_idle();
    info!("Watering stopped, device reset to idle");

    CommandResult::Completed { actual_amount_ml: 0 }
}
