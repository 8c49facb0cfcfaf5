// Live feed trait for the most recent robot_data record
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One push from the feed. `None` means the query currently matches no document.
pub type FeedUpdate = Option<serde_json::Value>;

/// Receiving side of a live query. Dropping it cancels the producer.
pub struct FeedSubscription {
    updates: mpsc::Receiver<FeedUpdate>,
    producer: Option<JoinHandle<()>>,
}

impl FeedSubscription {
    pub fn new(updates: mpsc::Receiver<FeedUpdate>, producer: Option<JoinHandle<()>>) -> Self {
        Self { updates, producer }
    }

    /// Wait for the next pushed update; `None` once the feed has ended.
    pub async fn next(&mut self) -> Option<FeedUpdate> {
        self.updates.recv().await
    }

    pub fn cancel(&mut self) {
        self.updates.close();
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[async_trait]
pub trait RobotFeed: Send + Sync {
    /// Open a live query for the newest record, ordered by timestamp descending, limit 1.
    async fn subscribe(&self) -> anyhow::Result<FeedSubscription>;
}
