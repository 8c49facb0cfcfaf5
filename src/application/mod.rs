// Application layer - Live view controller and the seams to its collaborators
pub mod command_gateway;
pub mod live_view;
pub mod robot_feed;
