// Application state for HTTP handlers
use crate::application::live_view::LiveViewController;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<LiveViewController>,
}
