//! Command execution for the watering device
//!
//! This module handles:
//! - Acknowledging commands before execution
//! - Dispatching to the per-type handlers
//! - Reporting terminal outcomes back to the backend

mod executor;
pub mod handlers;

pub use executor::{CommandExecutor, CommandResult};
