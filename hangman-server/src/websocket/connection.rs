use hangman_types::ServerMessage;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("Connection not found")]
    NotFound,
    #[error("Connection closed")]
    Closed,
}

/// Outgoing side of one page view
struct PageView {
    sender: mpsc::UnboundedSender<ServerMessage>,
    last_activity: Instant,
}

/// Routes server messages to open page views. Removing a page view drops its
/// sender, which ends that session's outgoing loop.
pub struct ConnectionManager {
    views: RwLock<HashMap<ConnectionId, PageView>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let view = PageView {
            sender,
            last_activity: Instant::now(),
        };
        self.views.write().await.insert(id, view);
        receiver
    }

    pub async fn remove(&self, id: ConnectionId) {
        self.views.write().await.remove(&id);
    }

    pub async fn touch(&self, id: ConnectionId) {
        if let Some(view) = self.views.write().await.get_mut(&id) {
            view.last_activity = Instant::now();
        }
    }

    pub async fn send(
        &self,
        id: ConnectionId,
        message: ServerMessage,
    ) -> Result<(), DeliveryError> {
        let views = self.views.read().await;
        let view = views.get(&id).ok_or(DeliveryError::NotFound)?;
        view.sender.send(message).map_err(|_| DeliveryError::Closed)
    }

    /// Drops page views idle for longer than `timeout`, returning how many went
    pub async fn reap_idle(&self, timeout: Duration) -> usize {
        let mut views = self.views.write().await;
        let before = views.len();
        views.retain(|id, view| {
            let idle = view.last_activity.elapsed() > timeout;
            if idle {
                tracing::info!("Closing idle page view {}", id);
            }
            !idle
        });
        before - views.len()
    }

    pub fn spawn_reaper(self: &Arc<Self>, every: Duration, timeout: Duration) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                manager.reap_idle(timeout).await;
            }
        })
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
