//! Recording backend double for unit tests
//!
//! Records every call and returns pre-seeded responses; each operation can
//! be seeded with a one-shot error.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Backend, BackendError, CommandOutcome, StatusReport, WateringCommand};

/// A recorded call to the mock backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    FetchPendingCommands,
    Acknowledge {
        command_id: String,
    },
    Complete {
        command_id: String,
        outcome: CommandOutcome,
    },
    SubmitStatus {
        report: StatusReport,
    },
}

pub struct MockBackend {
    pending: Mutex<Vec<WateringCommand>>,
    calls: Mutex<Vec<BackendCall>>,
    fetch_error: Mutex<Option<BackendError>>,
    ack_error: Mutex<Option<BackendError>>,
    complete_error: Mutex<Option<BackendError>>,
    status_error: Mutex<Option<BackendError>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fetch_error: Mutex::new(None),
            ack_error: Mutex::new(None),
            complete_error: Mutex::new(None),
            status_error: Mutex::new(None),
        }
    }

    /// Queue commands for the next fetch.
    pub fn with_pending(self, commands: Vec<WateringCommand>) -> Self {
        *self.pending.lock().unwrap() = commands;
        self
    }

    pub fn with_fetch_error(self, err: BackendError) -> Self {
        *self.fetch_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_ack_error(self, err: BackendError) -> Self {
        *self.ack_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_complete_error(self, err: BackendError) -> Self {
        *self.complete_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_status_error(self, err: BackendError) -> Self {
        *self.status_error.lock().unwrap() = Some(err);
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Completion reports recorded so far.
    pub fn completions(&self) -> Vec<(String, CommandOutcome)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BackendCall::Complete {
                    command_id,
                    outcome,
                } => Some((command_id, outcome)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_error(slot: &Mutex<Option<BackendError>>) -> Option<BackendError> {
        slot.lock().unwrap().take()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch_pending_commands(&self) -> Result<Vec<WateringCommand>, BackendError> {
        self.record(BackendCall::FetchPendingCommands);

        if let Some(err) = Self::take_error(&self.fetch_error) {
            return Err(err);
        }
        Ok(std::mem::take(&mut *self.pending.lock().unwrap()))
    }

    async fn acknowledge_command(&self, command_id: &str) -> Result<(), BackendError> {
        self.record(BackendCall::Acknowledge {
            command_id: command_id.to_string(),
        });

        if let Some(err) = Self::take_error(&self.ack_error) {
            return Err(err);
        }
        Ok(())
    }

    async fn complete_command(
        &self,
        command_id: &str,
        outcome: &CommandOutcome,
    ) -> Result<(), BackendError> {
        self.record(BackendCall::Complete {
            command_id: command_id.to_string(),
            outcome: outcome.clone(),
        });

        if let Some(err) = Self::take_error(&self.complete_error) {
            return Err(err);
        }
        Ok(())
    }

    async fn submit_status(&self, report: &StatusReport) -> Result<(), BackendError> {
        self.record(BackendCall::SubmitStatus {
            report: report.clone(),
        });

        if let Some(err) = Self::take_error(&self.status_error) {
            return Err(err);
        }
        Ok(())
    }
}
