// Operator commands and their availability while the robot returns to base
use super::robot::RobotState;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotCommand {
    Start,
    /// Sent as `detener`; the robot answers with the delimited area.
    DelimitArea,
    Return,
    Map,
}

impl RobotCommand {
    pub const ALL: [RobotCommand; 4] = [
        RobotCommand::Start,
        RobotCommand::DelimitArea,
        RobotCommand::Return,
        RobotCommand::Map,
    ];

    /// Name understood by the command service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            RobotCommand::Start => "iniciar",
            RobotCommand::DelimitArea => "detener",
            RobotCommand::Return => "regresar",
            RobotCommand::Map => "mapear",
        }
    }

    /// Name used by the panel controls.
    pub fn panel_name(&self) -> &'static str {
        match self {
            RobotCommand::Start => "start",
            RobotCommand::DelimitArea => "stop",
            RobotCommand::Return => "return",
            RobotCommand::Map => "map",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RobotCommand::Start => "Iniciar",
            RobotCommand::DelimitArea => "Delimitar Área",
            RobotCommand::Return => "Regresar",
            RobotCommand::Map => "Mapear",
        }
    }

    pub fn reads_response(&self) -> bool {
        matches!(self, RobotCommand::DelimitArea)
    }

    /// Start and Map are withheld while the robot is heading back to base.
    pub fn is_available(&self, returning: bool) -> bool {
        match self {
            RobotCommand::Start | RobotCommand::Map => !returning,
            RobotCommand::DelimitArea | RobotCommand::Return => true,
        }
    }
}

impl fmt::Display for RobotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for RobotCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RobotCommand::ALL
            .into_iter()
            .find(|c| c.panel_name() == s || c.wire_name() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// JSON body posted to the command service.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest {
    pub comando: &'static str,
}

impl From<RobotCommand> for CommandRequest {
    fn from(command: RobotCommand) -> Self {
        Self {
            comando: command.wire_name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandAvailability {
    pub command: RobotCommand,
    pub enabled: bool,
}

impl CommandAvailability {
    pub fn for_state(state: &RobotState) -> Vec<CommandAvailability> {
        RobotCommand::ALL
            .into_iter()
            .map(|command| CommandAvailability {
                command,
                enabled: command.is_available(state.is_returning_to_base),
            })
            .collect()
    }
}
