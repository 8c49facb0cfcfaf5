// Realtime database feed - Streams the newest robot_data record over Server-Sent Events
use crate::application::robot_feed::{FeedSubscription, FeedUpdate, RobotFeed};
use crate::infrastructure::config::FeedSettings;
use crate::infrastructure::sse::SseDecoder;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct RealtimeDbFeed {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    order_by: String,
    auth: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamChange {
    path: String,
    #[serde(default)]
    data: Value,
}

impl RealtimeDbFeed {
    pub fn new(settings: &FeedSettings) -> Self {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(client: reqwest::Client, settings: &FeedSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            collection: settings.collection.clone(),
            order_by: settings.order_by.clone(),
            auth: settings.auth.clone(),
        }
    }

    fn build_stream_url(&self) -> String {
        let order_by = format!("\"{}\"", self.order_by);
        let mut url = format!(
            "{}/{}.json?orderBy={}&limitToLast=1",
            self.base_url,
            self.collection,
            urlencoding::encode(&order_by)
        );
        if let Some(auth) = &self.auth {
            url.push_str("&auth=");
            url.push_str(&urlencoding::encode(auth));
        }
        url
    }
}

#[async_trait]
impl RobotFeed for RealtimeDbFeed {
    async fn subscribe(&self) -> Result<FeedSubscription> {
        let url = self.build_stream_url();
        tracing::debug!(collection = %self.collection, "opening realtime database stream");

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/event-stream")
            .send()
            .await
            .context("Failed to open realtime database stream")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Realtime database stream failed with status {}: {}", status, body);
        }

        let (tx, rx) = mpsc::channel(16);
        let updates = feed_updates(response, self.order_by.clone());
        let producer = tokio::spawn(async move {
            let mut updates = Box::pin(updates);
            while let Some(update) = updates.next().await {
                match update {
                    Ok(update) => {
                        if tx.send(update).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "realtime database stream failed");
                        return;
                    }
                }
            }
            tracing::info!("realtime database stream closed");
        });

        Ok(FeedSubscription::new(rx, Some(producer)))
    }
}

/// Turn the raw event stream into "newest record" updates, skipping repeats.
fn feed_updates(
    response: reqwest::Response,
    order_by: String,
) -> impl Stream<Item = Result<FeedUpdate>> {
    async_stream::try_stream! {
        let mut decoder = SseDecoder::default();
        let mut cache = LatestRecordCache::new(order_by);
        let mut last_sent: Option<FeedUpdate> = None;
        let mut chunks = response.bytes_stream();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.context("Realtime database stream interrupted")?;
            for event in decoder.push(&chunk) {
                match event.event.as_str() {
                    "put" | "patch" => {
                        let change = match serde_json::from_str::<StreamChange>(&event.data) {
                            Ok(change) => change,
                            Err(e) => {
                                tracing::warn!(error = %e, "ignoring malformed stream event");
                                continue;
                            }
                        };
                        if event.event == "put" {
                            cache.put(&change.path, change.data);
                        } else {
                            cache.patch(&change.path, change.data);
                        }

                        let latest = cache.latest();
                        if last_sent.as_ref() != Some(&latest) {
                            last_sent = Some(latest.clone());
                            yield latest;
                        }
                    }
                    "keep-alive" => {}
                    "cancel" => {
                        Err::<(), _>(anyhow::anyhow!("Realtime database cancelled the stream: {}", event.data))?;
                    }
                    "auth_revoked" => {
                        Err::<(), _>(anyhow::anyhow!("Realtime database revoked the stream credentials"))?;
                    }
                    other => tracing::debug!(event = other, "ignoring stream event"),
                }
            }
        }
    }
}

/// Mirror of the query window, keyed by record id.
#[derive(Debug)]
pub struct LatestRecordCache {
    order_by: String,
    root: Value,
}

impl LatestRecordCache {
    pub fn new(order_by: String) -> Self {
        Self {
            order_by,
            root: Value::Null,
        }
    }

    pub fn put(&mut self, path: &str, data: Value) {
        set_path(&mut self.root, &segments(path), data);
    }

    pub fn patch(&mut self, path: &str, data: Value) {
        let base = segments(path);
        let Value::Object(children) = data else {
            tracing::warn!(path, "patch without an object payload");
            return;
        };
        for (key, value) in children {
            let mut target = base.clone();
            target.push(key.as_str());
            set_path(&mut self.root, &target, value);
        }
    }

    /// The record with the greatest ordering value, ties broken by key.
    pub fn latest(&self) -> FeedUpdate {
        let Value::Object(records) = &self.root else {
            return None;
        };
        records
            .iter()
            .max_by(|(a_key, a), (b_key, b)| {
                compare_order_values(a.get(&self.order_by), b.get(&self.order_by))
                    .then_with(|| a_key.cmp(b_key))
            })
            .map(|(_, record)| record.clone())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn set_path(target: &mut Value, path: &[&str], data: Value) {
    let Some((head, rest)) = path.split_first() else {
        *target = data;
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Value::Object(children) = target else {
        return;
    };

    let child = children.entry(head.to_string()).or_insert(Value::Null);
    set_path(child, rest, data);
    if child.is_null() {
        children.remove(*head);
    }
}

// Realtime database ordering: missing/null < booleans < numbers < strings < objects.
fn order_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
    }
}

fn compare_order_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    order_rank(a).cmp(&order_rank(b)).then_with(|| match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    })
}
