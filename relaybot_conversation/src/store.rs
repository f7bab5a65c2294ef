//! Keyed storage of per-user conversation histories.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::ConversationHistory;

/// A leased per-user history slot.
///
/// Holding the lock serializes turns for that user; other users' slots stay
/// free, so distinct users are processed fully in parallel.
pub type HistorySlot = Arc<Mutex<ConversationHistory>>;

/// Keyed store of conversation histories, injected into the relay handler.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Lease the slot for `user_id`, creating an empty one on first access.
    async fn entry(&self, user_id: &str) -> anyhow::Result<HistorySlot>;
}

struct SlotEntry {
    slot: HistorySlot,
    last_used: DateTime<Utc>,
}

/// In-memory store bounded to `capacity` distinct users.
///
/// Histories live for the process lifetime unless the capacity is exceeded,
/// in which case the user idle the longest is evicted. Slots with an
/// in-flight turn were touched on lease, so they sort newest and stay.
pub struct MemoryConversationStore {
    slots: Mutex<HashMap<String, SlotEntry>>,
    capacity: usize,
}

impl MemoryConversationStore {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Number of users currently tracked.
    pub async fn user_count(&self) -> usize {
        self.slots.lock().await.len()
    }
}

impl Default for MemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for MemoryConversationStore {
    async fn entry(&self, user_id: &str) -> anyhow::Result<HistorySlot> {
        let mut slots = self.slots.lock().await;
        let now = Utc::now();

        if let Some(entry) = slots.get_mut(user_id) {
            entry.last_used = now;
            return Ok(Arc::clone(&entry.slot));
        }

        if slots.len() >= self.capacity {
            let oldest = slots
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(user, _)| user.clone());
            if let Some(user) = oldest {
                slots.remove(&user);
                debug!("evicted idle conversation slot for {user}");
            }
        }

        let slot: HistorySlot = Arc::new(Mutex::new(ConversationHistory::new()));
        slots.insert(
            user_id.to_string(),
            SlotEntry {
                slot: Arc::clone(&slot),
                last_used: now,
            },
        );
        Ok(slot)
    }
}
