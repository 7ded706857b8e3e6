//! Inbound payload dispatch.
//!
//! Handlers are registered with an exact topic string; inbound publishes
//! route by topic lookup. Each subscription owns its topic string — there
//! is no shared scratch storage, so registration and dispatch are safe
//! under concurrent subscription setup. Keeping the registered set aligned
//! with the broker subscription set is the caller's responsibility.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use thincloud_core::error::Result;

/// Handler for payloads arriving on a subscribed topic.
#[async_trait]
pub trait InboundHandler: Send + Sync {
    async fn handle(&self, topic: &str, payload: Bytes) -> Result<()>;
}

/// Registry and router for inbound publishes.
#[derive(Default)]
pub struct Dispatcher {
    handlers: DashMap<String, Arc<dyn InboundHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register a handler for an exact topic. A later registration on the
    /// same topic replaces the earlier one.
    pub fn register(&self, topic: impl Into<String>, handler: Arc<dyn InboundHandler>) {
        self.handlers.insert(topic.into(), handler);
    }

    /// Remove a handler; returns whether one was registered.
    pub fn unregister(&self, topic: &str) -> bool {
        self.handlers.remove(topic).is_some()
    }

    pub fn registered_topics(&self) -> Vec<String> {
        self.handlers.iter().map(|e| e.key().clone()).collect()
    }

    /// Route a payload to the handler registered for `topic`. Payloads on
    /// unregistered topics are dropped.
    pub async fn dispatch(&self, topic: &str, payload: Bytes) -> Result<()> {
        let Some(handler) = self.handlers.get(topic).map(|e| e.value().clone()) else {
            tracing::debug!(%topic, "no handler registered, dropping payload");
            return Ok(());
        };
        handler.handle(topic, payload).await
    }
}
