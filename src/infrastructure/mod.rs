// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_command_gateway;
pub mod realtime_feed;
pub mod sse;
