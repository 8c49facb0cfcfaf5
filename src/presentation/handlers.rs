// HTTP request handlers
use crate::application::live_view::DispatchOutcome;
use crate::domain::command::RobotCommand;
use crate::presentation::app_state::AppState;
use crate::presentation::panel_mapper::{panel_view, PanelView};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    Json,
};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;

const PANEL_PAGE: &str = include_str!("../../static/index.html");

#[derive(Debug, Serialize)]
pub struct CommandAccepted {
    pub command: &'static str,
    pub outcome: DispatchOutcome,
}

#[derive(Debug, Serialize)]
pub struct CommandRejected {
    pub command: String,
    pub error: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn index() -> Html<&'static str> {
    Html(PANEL_PAGE)
}

/// Current panel view
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<PanelView> {
    Json(panel_view(&state.controller.snapshot()))
}

/// Push a `view` event on every live view change, starting with the current one
pub async fn stream_view(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let views = WatchStream::new(state.controller.watch())
        .map(|view| Event::default().event("view").json_data(panel_view(&view)));
    Sse::new(views).keep_alive(KeepAlive::default())
}

/// Dispatch an operator command. Delivery failures are logged, never returned.
pub async fn post_command(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let command = match name.parse::<RobotCommand>() {
        Ok(command) => command,
        Err(e) => {
            let body = CommandRejected {
                command: name,
                error: e.to_string(),
            };
            return (StatusCode::NOT_FOUND, Json(body)).into_response();
        }
    };

    if !state.controller.is_available(command) {
        tracing::warn!(command = %command, "command unavailable while returning to base");
        let body = CommandRejected {
            command: name,
            error: "unavailable while the robot is returning to base".to_string(),
        };
        return (StatusCode::CONFLICT, Json(body)).into_response();
    }

    let outcome = state.controller.dispatch(command).await;
    let body = CommandAccepted {
        command: command.panel_name(),
        outcome,
    };
    (StatusCode::ACCEPTED, Json(body)).into_response()
}
