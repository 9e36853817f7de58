//! Domain events published after entity mutations.
//!
//! Publication is a detached side channel: `publish` never awaits and never
//! fails the surrounding request. A closed channel drops the event with a
//! warning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent {
    pub action: EntityAction,
    pub entity_kind: &'static str,
    pub entity_id: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct EventPublisher {
    tx: mpsc::UnboundedSender<DomainEvent>,
}

impl EventPublisher {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DomainEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn publish(&self, action: EntityAction, entity_kind: &'static str, entity_id: &str) {
        let event = DomainEvent {
            action,
            entity_kind,
            entity_id: entity_id.to_string(),
            occurred_at: Utc::now(),
        };
        if self.tx.send(event).is_err() {
            tracing::warn!(
                kind = entity_kind,
                id = %entity_id,
                "event channel closed, dropping domain event"
            );
        }
    }
}
