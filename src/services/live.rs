//! Live updates of the pet collections.
//!
//! Every successful write publishes a [CollectionChange]; pages listen on the
//! SSE endpoint and re-fetch the widget of the collection that changed.

use derive_more::Display;
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Collection {
    #[display("pets")]
    #[serde(rename = "pets")]
    Pets,
    #[display("activityLogs")]
    #[serde(rename = "activityLogs")]
    ActivityLogs,
    #[display("feedingLogs")]
    #[serde(rename = "feedingLogs")]
    FeedingLogs,
    #[display("healthLogs")]
    #[serde(rename = "healthLogs")]
    HealthLogs,
    #[display("reminders")]
    #[serde(rename = "reminders")]
    Reminders,
    #[display("memories")]
    #[serde(rename = "memories")]
    Memories,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionChange {
    pub user_id: i64,
    pub pet_id: i64,
    pub collection: Collection,
}

impl CollectionChange {
    /// Whether a listener of `(user_id, pet_id)` must be told about the change.
    /// Pet list changes reach every page of the user.
    pub fn concerns(&self, user_id: i64, pet_id: Option<i64>) -> bool {
        if self.user_id != user_id {
            return false;
        }

        self.collection == Collection::Pets || Some(self.pet_id) == pet_id
    }

    /// Server-Sent Event frame named after the collection
    pub fn to_sse_frame(&self) -> String {
        format!(
            "event: {}\ndata: {}\n\n",
            self.collection,
            serde_json::json!({"pet_id": self.pet_id})
        )
    }
}

/// Broadcast hub shared by every worker
#[derive(Clone)]
pub struct LiveFeed {
    sender: broadcast::Sender<CollectionChange>,
}

impl LiveFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CollectionChange> {
        self.sender.subscribe()
    }

    /// Publishes the change, having no listener is not an error
    pub fn publish(&self, user_id: i64, pet_id: i64, collection: Collection) {
        let change = CollectionChange {
            user_id,
            pet_id,
            collection,
        };

        if let Ok(receivers) = self.sender.send(change) {
            tracing::debug!("{collection} change of pet {pet_id} sent to {receivers} listeners");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ntex::test]
    async fn test_publish_reaches_subscribers() {
        let feed = LiveFeed::new(8);
        let mut receiver = feed.subscribe();

        feed.publish(1, 7, Collection::ActivityLogs);

        let change = receiver.recv().await.unwrap();
        assert_eq!(
            change,
            CollectionChange {
                user_id: 1,
                pet_id: 7,
                collection: Collection::ActivityLogs
            }
        );
    }

    #[test]
    fn test_publish_without_listeners_is_fine() {
        let feed = LiveFeed::new(8);

        feed.publish(1, 7, Collection::Memories);

        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_change_concerns_only_owner_and_active_pet() {
        let change = CollectionChange {
            user_id: 1,
            pet_id: 7,
            collection: Collection::FeedingLogs,
        };

        assert!(change.concerns(1, Some(7)));
        assert!(!change.concerns(1, Some(8)));
        assert!(!change.concerns(2, Some(7)));

        let pets_change = CollectionChange {
            collection: Collection::Pets,
            ..change
        };
        assert!(pets_change.concerns(1, None));
    }

    #[test]
    fn test_sse_frame() {
        let change = CollectionChange {
            user_id: 1,
            pet_id: 7,
            collection: Collection::HealthLogs,
        };

        assert_eq!(
            change.to_sse_frame(),
            "event: healthLogs\ndata: {\"pet_id\":7}\n\n"
        );
    }
}
