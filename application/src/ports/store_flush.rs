//! Port for making store writes durable.

use super::store_error::StoreError;
use async_trait::async_trait;

/// Persist the store's current state.
///
/// Called by the request boundary after every mutating call.
#[async_trait]
pub trait StoreFlush: Send + Sync {
    async fn flush(&self) -> Result<(), StoreError>;
}

/// Stores without durable backing.
pub struct NoStoreFlush;

#[async_trait]
impl StoreFlush for NoStoreFlush {
    async fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
