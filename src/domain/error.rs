// Error kinds raised while following the feed and dispatching commands
use super::command::RobotCommand;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("robot feed failed: {0}")]
    FeedDelivery(String),

    #[error("command '{command}' was not delivered: {reason}")]
    CommandDelivery {
        command: RobotCommand,
        reason: String,
    },

    #[error("response to command '{command}' could not be parsed: {reason}")]
    CommandResponseParse {
        command: RobotCommand,
        reason: String,
    },
}

impl PanelError {
    pub fn kind(&self) -> &'static str {
        match self {
            PanelError::FeedDelivery(_) => "FeedDeliveryError",
            PanelError::CommandDelivery { .. } => "CommandDeliveryError",
            PanelError::CommandResponseParse { .. } => "CommandResponseParseError",
        }
    }
}
