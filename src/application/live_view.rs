// Live view controller - Follows the robot feed and dispatches operator commands
use crate::application::command_gateway::CommandGateway;
use crate::application::robot_feed::{FeedSubscription, FeedUpdate, RobotFeed};
use crate::domain::area::AreaBounds;
use crate::domain::command::RobotCommand;
use crate::domain::error::PanelError;
use crate::domain::map_series::{derive_map_series, MapSeries};
use crate::domain::robot::{FeedRecord, RobotState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Everything the panel renders. `series` is recomputed whenever `robot` or `bounds` changes.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveView {
    pub robot: RobotState,
    pub bounds: AreaBounds,
    pub series: MapSeries,
    pub updated_at: Option<DateTime<Utc>>,
    /// False before the subscription is attached and once the feed has ended.
    pub feed_live: bool,
    bounds_seq: u64,
}

impl LiveView {
    fn recompute(&mut self) {
        self.series = derive_map_series(&self.robot, &self.bounds);
    }
}

impl Default for LiveView {
    fn default() -> Self {
        let robot = RobotState::default();
        let bounds = AreaBounds::unbounded();
        let series = derive_map_series(&robot, &bounds);
        Self {
            robot,
            bounds,
            series,
            updated_at: None,
            feed_live: false,
            bounds_seq: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Delivered,
    BoundsApplied,
    /// A newer delimit-area response was already applied.
    BoundsStale,
    Failed,
}

pub struct LiveViewController {
    view: watch::Sender<LiveView>,
    gateway: Arc<dyn CommandGateway>,
    bounds_seq: AtomicU64,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl LiveViewController {
    pub fn new(gateway: Arc<dyn CommandGateway>) -> Self {
        let (view, _) = watch::channel(LiveView::default());
        Self {
            view,
            gateway,
            bounds_seq: AtomicU64::new(0),
            pump: Mutex::new(None),
        }
    }

    /// Create a controller with fresh session state and a single persistent feed subscription.
    ///
    /// A feed that cannot be reached is logged and the controller keeps the default
    /// state, so the panel still serves and commands still go out.
    pub async fn mount(feed: Arc<dyn RobotFeed>, gateway: Arc<dyn CommandGateway>) -> Arc<Self> {
        let controller = Arc::new(Self::new(gateway));
        match feed.subscribe().await {
            Ok(subscription) => {
                controller.attach(subscription);
                tracing::info!("live view mounted");
            }
            Err(e) => {
                let err = PanelError::FeedDelivery(format!("could not subscribe: {e:#}"));
                tracing::error!(kind = err.kind(), error = %err, "live view mounted without a feed");
            }
        }
        controller
    }

    fn attach(self: &Arc<Self>, mut subscription: FeedSubscription) {
        self.set_feed_live(true);
        let controller = Arc::downgrade(self);
        let pump = tokio::spawn(async move {
            while let Some(update) = subscription.next().await {
                let Some(controller) = controller.upgrade() else {
                    return;
                };
                controller.apply_feed_update(update);
            }
            tracing::warn!("robot feed ended, live view will no longer update");
            if let Some(controller) = controller.upgrade() {
                controller.set_feed_live(false);
            }
        });

        let mut slot = self.pump.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(pump) {
            previous.abort();
        }
    }

    /// Cancel the feed subscription. Commands already in flight run to completion.
    pub fn teardown(&self) {
        let pump = self.pump.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(pump) = pump {
            pump.abort();
            tracing::info!("live view torn down");
        }
        self.set_feed_live(false);
    }

    fn set_feed_live(&self, live: bool) {
        self.view.send_if_modified(|view| {
            let changed = view.feed_live != live;
            view.feed_live = live;
            changed
        });
    }

    /// Replace the robot state with a pushed record. Returns whether the view changed.
    pub fn apply_feed_update(&self, update: FeedUpdate) -> bool {
        let document = match update {
            Some(doc) if !is_empty_document(&doc) => doc,
            _ => {
                tracing::debug!("robot feed has no document, keeping current state");
                return false;
            }
        };

        let state = match decode_record(document) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "ignoring feed update");
                return false;
            }
        };

        self.view.send_modify(|view| {
            view.robot = state;
            view.recompute();
            view.updated_at = Some(Utc::now());
        });
        true
    }

    /// Send a command without surfacing failures to the caller.
    pub async fn dispatch(&self, command: RobotCommand) -> DispatchOutcome {
        let seq = command
            .reads_response()
            .then(|| self.bounds_seq.fetch_add(1, Ordering::SeqCst) + 1);

        tracing::info!(command = %command, "dispatching command");
        let body = match self.gateway.send(command).await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(kind = err.kind(), error = %err, "command failed");
                return DispatchOutcome::Failed;
            }
        };

        let Some(seq) = seq else {
            return DispatchOutcome::Delivered;
        };

        match AreaBounds::from_response_body(&body) {
            Ok(bounds) => self.apply_bounds(seq, bounds),
            Err(e) => {
                let err = PanelError::CommandResponseParse {
                    command,
                    reason: e.to_string(),
                };
                tracing::error!(kind = err.kind(), error = %err, "command failed");
                DispatchOutcome::Failed
            }
        }
    }

    fn apply_bounds(&self, seq: u64, bounds: AreaBounds) -> DispatchOutcome {
        let applied = self.view.send_if_modified(|view| {
            if seq <= view.bounds_seq {
                return false;
            }
            view.bounds_seq = seq;
            view.bounds = bounds;
            view.recompute();
            true
        });

        if applied {
            tracing::info!(
                x_min = bounds.x_min,
                x_max = bounds.x_max,
                y_min = bounds.y_min,
                y_max = bounds.y_max,
                "area bounds updated"
            );
            DispatchOutcome::BoundsApplied
        } else {
            tracing::debug!(seq, "discarding stale area bounds response");
            DispatchOutcome::BoundsStale
        }
    }

    pub fn snapshot(&self) -> LiveView {
        self.view.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<LiveView> {
        self.view.subscribe()
    }

    /// Presentation-level gate: Start and Map are refused while the robot returns to base.
    pub fn is_available(&self, command: RobotCommand) -> bool {
        command.is_available(self.view.borrow().robot.is_returning_to_base)
    }
}

impl Drop for LiveViewController {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn is_empty_document(doc: &serde_json::Value) -> bool {
    match doc {
        serde_json::Value::Null => true,
        serde_json::Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

fn decode_record(document: serde_json::Value) -> Result<RobotState, PanelError> {
    serde_json::from_value::<FeedRecord>(document)
        .map(RobotState::from)
        .map_err(|e| PanelError::FeedDelivery(e.to_string()))
}
