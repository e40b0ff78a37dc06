//! HTTP backend client
//!
//! Every operation is one POST to `<base>/rest/v1/rpc/<operation>` with a
//! JSON body of `p_`-prefixed parameters, authenticated by a static API key
//! sent as both an `apikey` header and a bearer credential.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::types::RpcAnswer;
use super::{Backend, BackendError, CommandOutcome, StatusReport, WateringCommand};
use crate::config::DeviceConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const FETCH_OP: &str = "get_pending_commands";
const ACK_OP: &str = "acknowledge_command";
const COMPLETE_OP: &str = "complete_watering_command";
const STATUS_OP: &str = "update_device_status";

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    device_id: String,
}

impl HttpBackend {
    pub fn new(config: &DeviceConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            device_id: config.device_id.clone(),
        })
    }

    fn rpc_url(&self, operation: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, operation)
    }

    async fn rpc(&self, operation: &'static str, params: Value) -> Result<Value, BackendError> {
        let response = self
            .client
            .post(self.rpc_url(operation))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&params)
            .send()
            .await?
            .error_for_status()?;

        debug!("{} returned {}", operation, response.status());
        Ok(response.json().await?)
    }

    /// Decode an `{success, error?}` answer, turning `success=false` into a
    /// `Rejected` error.
    fn check_answer(operation: &'static str, body: Value) -> Result<(), BackendError> {
        let answer: RpcAnswer =
            serde_json::from_value(body).map_err(|e| BackendError::Malformed {
                operation,
                message: e.to_string(),
            })?;

        if answer.success {
            Ok(())
        } else {
            Err(BackendError::Rejected {
                operation,
                reason: answer.error.unwrap_or_else(|| "unspecified".into()),
            })
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_pending_commands(&self) -> Result<Vec<WateringCommand>, BackendError> {
        let body = self
            .rpc(FETCH_OP, json!({ "p_device_id": self.device_id }))
            .await?;

        serde_json::from_value(body).map_err(|e| BackendError::Malformed {
            operation: FETCH_OP,
            message: e.to_string(),
        })
    }

    async fn acknowledge_command(&self, command_id: &str) -> Result<(), BackendError> {
        let body = self
            .rpc(
                ACK_OP,
                json!({
                    "p_command_id": command_id,
                    "p_device_id": self.device_id,
                }),
            )
            .await?;

        Self::check_answer(ACK_OP, body)
    }

    async fn complete_command(
        &self,
        command_id: &str,
        outcome: &CommandOutcome,
    ) -> Result<(), BackendError> {
        let body = self
            .rpc(
                COMPLETE_OP,
                json!({
                    "p_command_id": command_id,
                    "p_device_id": self.device_id,
                    "p_success": outcome.success,
                    "p_actual_amount": outcome.actual_amount_ml,
                    "p_error_message": outcome.error_message,
                }),
            )
            .await?;

        Self::check_answer(COMPLETE_OP, body)
    }

    async fn submit_status(&self, report: &StatusReport) -> Result<(), BackendError> {
        let body = self
            .rpc(
                STATUS_OP,
                json!({
                    "p_device_id": self.device_id,
                    "p_current_activity": report.activity,
                    "p_water_reservoir_ml": report.reservoir_level_ml,
                    "p_pump_status": report.pump_status,
                    "p_sensor_readings": report.readings,
                    "p_battery_percentage": report.battery_percentage,
                    "p_wifi_signal_strength": report.wifi_signal_dbm,
                    "p_error_codes": report.error_codes,
                }),
            )
            .await?;

        Self::check_answer(STATUS_OP, body)
    }
}
