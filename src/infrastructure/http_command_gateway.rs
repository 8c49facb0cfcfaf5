// HTTP command gateway - Posts operator commands to the robot command service
use crate::application::command_gateway::CommandGateway;
use crate::domain::command::{CommandRequest, RobotCommand};
use crate::domain::error::PanelError;
use crate::infrastructure::config::CommandSettings;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpCommandGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCommandGateway {
    pub fn new(settings: &CommandSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build command HTTP client")?;
        Ok(Self::with_client(client, settings.endpoint()))
    }

    pub fn with_client(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl CommandGateway for HttpCommandGateway {
    async fn send(&self, command: RobotCommand) -> Result<Bytes, PanelError> {
        let delivery_error = |reason: String| PanelError::CommandDelivery { command, reason };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&CommandRequest::from(command))
            .send()
            .await
            .map_err(|e| delivery_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(delivery_error(format!("status {}: {}", status, body)));
        }

        tracing::debug!(command = %command, %status, "command delivered");
        response
            .bytes()
            .await
            .map_err(|e| delivery_error(e.to_string()))
    }
}
