use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

/// Key looked up inside the stored payload, regardless of what the
/// route parameter is called.
pub const ID_FIELD: &str = "id";

/// Single-slot store for the most recently posted JSON payload.
/// The slot starts empty and is replaced wholesale on every write;
/// there is no history and nothing is persisted.
#[derive(Debug, Default)]
pub struct PayloadStore {
    slot: RwLock<Option<Value>>,
}

impl PayloadStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replace the stored payload with `payload`. Last write wins.
    pub async fn replace(&self, payload: Value) {
        let mut slot = self.slot.write().await;
        debug!(replacing = slot.is_some(), "payload slot overwritten");
        *slot = Some(payload);
    }

    /// Clone of the current payload, if one has been posted.
    pub async fn snapshot(&self) -> Option<Value> {
        self.slot.read().await.clone()
    }

    /// Whether the string form of the stored payload's `id` field equals
    /// `candidate`. An empty slot, a non-object payload, or a missing
    /// `id` key all answer `false`; this never fails.
    pub async fn matches_id(&self, candidate: &str) -> bool {
        let slot = self.slot.read().await;
        match slot.as_ref().and_then(|payload| payload.get(ID_FIELD)) {
            Some(stored) => canonical_string(stored) == candidate,
            None => false,
        }
    }
}

/// Canonical string form used on both sides of the comparison: a JSON
/// string compares by its contents, every other value by its JSON text
/// (`42` -> "42", `true` -> "true", `null` -> "null").
fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
