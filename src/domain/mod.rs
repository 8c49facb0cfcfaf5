// Domain layer - Robot state, commands and derived chart series
pub mod area;
pub mod command;
pub mod error;
pub mod map_series;
pub mod robot;
