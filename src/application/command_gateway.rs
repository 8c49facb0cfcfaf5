// Gateway trait for the robot command service
use crate::domain::command::RobotCommand;
use crate::domain::error::PanelError;
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait CommandGateway: Send + Sync {
    /// Post one command and return the raw response body on a 2xx status.
    /// Any other outcome is a `PanelError::CommandDelivery`.
    async fn send(&self, command: RobotCommand) -> Result<Bytes, PanelError>;
}
