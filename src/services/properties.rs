//! The listing stream: latest value replayed to every subscriber

use crate::data::listing::Listing;
use futures::Stream;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared snapshot of the current listings
pub type Listings = Arc<Vec<Listing>>;

/// Publishes the current listing collection.
///
/// Backed by a `watch` channel: subscribers always see the latest snapshot,
/// intermediate ones may be skipped.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    tx: Arc<watch::Sender<Listings>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::with_listings(Vec::new())
    }

    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(listings));
        Self { tx: Arc::new(tx) }
    }

    /// Replaces the collection and notifies subscribers.
    pub fn publish(&self, listings: Vec<Listing>) {
        log::debug!("publishing {} listings", listings.len());
        self.tx.send_replace(Arc::new(listings));
    }

    pub fn current(&self) -> Listings {
        self.tx.borrow().clone()
    }

    /// New receiver. Its first `changed()` only fires on the next publish;
    /// the current value is available through `borrow()`.
    pub fn subscribe(&self) -> watch::Receiver<Listings> {
        self.tx.subscribe()
    }

    /// The current snapshot followed by every later one.
    pub fn stream(&self) -> impl Stream<Item = Listings> {
        let mut rx = self.subscribe();
        rx.mark_changed();
        futures::stream::unfold(rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let listings = rx.borrow_and_update().clone();
            Some((listings, rx))
        })
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::listing::PropertyType;
    use futures::StreamExt;

    #[test]
    fn test_publish_replaces_snapshot() {
        let store = PropertyStore::new();
        assert!(store.current().is_empty());

        store.publish(vec![Listing::new("a", PropertyType::Land)]);
        assert_eq!(store.current().len(), 1);
    }

    #[test]
    fn test_late_subscriber_sees_latest() {
        let store = PropertyStore::new();
        store.publish(vec![Listing::new("a", PropertyType::Land)]);

        let rx = store.subscribe();
        assert_eq!(rx.borrow()[0].id, "a");
    }

    #[tokio::test]
    async fn test_stream_replays_current_then_follows() {
        let store = PropertyStore::with_listings(vec![Listing::new("a", PropertyType::Land)]);
        let mut stream = Box::pin(store.stream());

        let first = stream.next().await.unwrap();
        assert_eq!(first[0].id, "a");

        store.publish(vec![
            Listing::new("b", PropertyType::Commercial),
            Listing::new("c", PropertyType::Industrial),
        ]);
        let second = stream.next().await.unwrap();
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_stream_ends_when_store_dropped() {
        let store = PropertyStore::new();
        let mut stream = Box::pin(store.stream());
        assert!(stream.next().await.is_some());

        drop(store);
        assert!(stream.next().await.is_none());
    }
}
