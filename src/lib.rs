//! Bounded pool and factory for long-running conversational agent runtimes
//!
//! An agent runtime is expensive to build (model session, memory, storage
//! wiring) and stateful, so the serving path keeps them warm in a bounded
//! LRU cache instead of rebuilding per request:
//!
//! - [`factory::RuntimeFactory`] validates and sanitizes a stored
//!   [`definition::AgentDefinition`], then constructs and initializes a
//!   runtime through the [`runtime::RuntimeBuilder`] seam.
//! - [`pool::RuntimePool`] caches the resulting handles with LRU eviction,
//!   idle-timeout reclamation, and a coordinated shutdown that drains every
//!   entry.
//!
//! The orchestration layer's contract is two calls: `pool.get(id)` on every
//! request, and on a miss `factory.create_runtime(..)` followed by
//! `pool.set(id, handle)`.

pub mod core;
pub mod definition;
pub mod factory;
pub mod pool;
pub mod runtime;

// Logging setup helpers
pub mod logging;

pub use crate::core::{PoolError, PoolResult};
pub use crate::definition::{AgentDefinition, ModelProvider, SanitizedDefinition};
pub use crate::factory::{RuntimeFactory, ValidationReport};
pub use crate::pool::{PoolConfig, PoolStats, RuntimePool};
pub use crate::runtime::{AgentRuntime, RuntimeBuilder, RuntimeHandle, StorageAdapter};
