// Presentation layer - Panel page, JSON view and command endpoints
pub mod app_state;
pub mod handlers;
pub mod panel_mapper;
pub mod routes;
