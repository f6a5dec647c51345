//! Construction adapters
//!
//! The factory drives runtime construction through these seams so that the
//! crate never depends on a concrete model SDK or database client.

use std::sync::Arc;

use crate::definition::SanitizedDefinition;
use crate::factory::Credential;

use super::handle::AgentRuntime;

/// Opaque reference to the application's database/storage layer.
///
/// Runtime construction needs somewhere to persist transcripts and memories;
/// the pool and factory only pass the reference through, so the trait exposes
/// nothing beyond a label for logs.
pub trait StorageAdapter: Send + Sync {
    /// Short backend label for logging (e.g. "postgres", "sqlite")
    fn backend(&self) -> &str;
}

/// Adapter that constructs the underlying runtime object.
///
/// Receives only the sanitized definition: raw documents, plugin references
/// and secret-bearing settings never reach an implementation of this trait.
#[async_trait::async_trait]
pub trait RuntimeBuilder: Send + Sync {
    /// Build a runtime for the given definition.
    ///
    /// The returned runtime is not yet initialized; the factory calls
    /// `initialize` exactly once before releasing the handle.
    async fn build(
        &self,
        definition: SanitizedDefinition,
        credential: Credential,
        storage: Arc<dyn StorageAdapter>,
    ) -> anyhow::Result<Box<dyn AgentRuntime>>;
}
