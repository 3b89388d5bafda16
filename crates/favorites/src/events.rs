//! In-process event bridge between independently mounted components.
//!
//! A favorite button and a list page never hold a reference to each other.
//! The button publishes `FavoriteToggled` after a successful toggle; any
//! page that subscribed reacts by refreshing its favorite set. The host
//! publishes `VisibilityRestored` when the app comes back to the foreground.
//!
//! ## Design Note
//! Built on a `tokio::sync::broadcast` channel: every live subscriber gets
//! every event, and dropping a `Subscription` unsubscribes it.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use market_types::ProjectId;

pub const DEFAULT_BRIDGE_CAPACITY: usize = 64;

/// Events carried across the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeEvent {
    FavoriteToggled {
        project_id: ProjectId,
        is_favorite: bool,
    },
    VisibilityRestored,
}

/// Publishing side of the bridge. Cheap to clone; clones share subscribers.
#[derive(Debug, Clone)]
pub struct EventBridge {
    sender: broadcast::Sender<BridgeEvent>,
}

impl Default for EventBridge {
    fn default() -> Self {
        Self::new(DEFAULT_BRIDGE_CAPACITY)
    }
}

impl EventBridge {
    /// Create a bridge buffering at most `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Deliver an event to every current subscriber.
    ///
    /// Returns the number of subscribers reached. Publishing with nobody
    /// listening is not an error.
    pub fn publish(&self, event: BridgeEvent) -> usize {
        match self.sender.send(event) {
            Ok(reached) => {
                debug!("Published {:?} to {} subscribers", event, reached);
                reached
            }
            Err(_) => {
                debug!("Published {:?} with no subscribers", event);
                0
            }
        }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Receiving side of the bridge, held for as long as a page is mounted.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<BridgeEvent>,
}

impl Subscription {
    /// Take the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<BridgeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("Bridge subscriber lagged, {} events skipped", skipped);
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return None,
            }
        }
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<BridgeEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
