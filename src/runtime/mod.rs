//! Runtime capability and construction seams
//!
//! This module defines what the pool and factory require of the outside
//! world:
//! - `AgentRuntime` - The capability every pooled runtime must expose
//! - `RuntimeHandle` - Shared handle to a live runtime
//! - `RuntimeBuilder` - Adapter that constructs the underlying runtime object
//! - `StorageAdapter` - Opaque database/storage reference passed to construction
//!
//! The actual runtime implementation (model calls, memory, transports) lives
//! behind these traits and is out of this crate's scope.

pub mod adapter;
pub mod handle;

pub use adapter::{RuntimeBuilder, StorageAdapter};
pub use handle::{AgentRuntime, RuntimeHandle};
