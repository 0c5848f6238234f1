//! Definition lookup capabilities
//!
//! The resolver never owns storage. It asks a lookup for one key at a time,
//! and each answer decides the next key, so lookups are strictly sequential.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use vmodel_schema::VirtualModelDefinition;

use crate::error::LookupError;

/// In-memory lookup
pub trait DefinitionLookup {
    fn lookup(&self, model: &str) -> Option<VirtualModelDefinition>;
}

/// Lookup backed by storage that may suspend, e.g. a catalog fetch
#[async_trait]
pub trait AsyncDefinitionLookup: Send + Sync {
    /// `Ok(None)` means the key does not exist
    async fn lookup(&self, model: &str) -> Result<Option<VirtualModelDefinition>, LookupError>;
}

impl DefinitionLookup for HashMap<String, VirtualModelDefinition> {
    fn lookup(&self, model: &str) -> Option<VirtualModelDefinition> {
        self.get(model).cloned()
    }
}

#[async_trait]
impl AsyncDefinitionLookup for HashMap<String, VirtualModelDefinition> {
    async fn lookup(&self, model: &str) -> Result<Option<VirtualModelDefinition>, LookupError> {
        Ok(self.get(model).cloned())
    }
}

impl<T: DefinitionLookup + ?Sized> DefinitionLookup for Arc<T> {
    fn lookup(&self, model: &str) -> Option<VirtualModelDefinition> {
        (**self).lookup(model)
    }
}

#[async_trait]
impl<T: AsyncDefinitionLookup + ?Sized> AsyncDefinitionLookup for Arc<T> {
    async fn lookup(&self, model: &str) -> Result<Option<VirtualModelDefinition>, LookupError> {
        (**self).lookup(model).await
    }
}

/// Bounds every lookup of `inner` by `timeout`
pub struct TimeoutLookup<L> {
    inner: L,
    timeout: Duration,
}

impl<L> TimeoutLookup<L> {
    pub fn new(inner: L, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<L: AsyncDefinitionLookup> AsyncDefinitionLookup for TimeoutLookup<L> {
    async fn lookup(&self, model: &str) -> Result<Option<VirtualModelDefinition>, LookupError> {
        tokio::time::timeout(self.timeout, self.inner.lookup(model))
            .await
            .map_err(|_| LookupError::TimedOut)?
    }
}
