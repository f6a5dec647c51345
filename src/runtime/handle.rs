//! AgentRuntime - Capability required of every pooled runtime
//!
//! A runtime wraps one long-running conversational session for one agent.
//! The pool treats it as opaque: it only needs an identifier, a one-shot
//! `initialize`, and a one-shot `stop`.

use std::sync::Arc;

/// Capability the pool requires of a live agent runtime.
///
/// Lifecycle contract:
/// - `initialize` is invoked exactly once, by the factory, before the handle
///   is ever visible to the pool. Implementations need not be idempotent.
/// - `stop` is invoked exactly once per pool entry, by the pool, after the
///   entry has left the pool's bookkeeping. Implementations need not be
///   idempotent either; the pool guarantees it will not call twice.
#[async_trait::async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Identifier of the agent this runtime serves
    fn agent_id(&self) -> &str;

    /// Bring the runtime to a serving state.
    ///
    /// Called by the factory immediately after construction. A handle whose
    /// initialization failed is never admitted to the pool.
    async fn initialize(&self) -> anyhow::Result<()>;

    /// Tear the runtime down, releasing whatever it holds.
    ///
    /// Failures are logged and swallowed by the pool: the logical slot is
    /// reclaimed whether or not teardown succeeded cleanly.
    async fn stop(&self) -> anyhow::Result<()>;
}

/// Shared handle to a live runtime.
///
/// The pool owns the entry; callers that obtain a handle via `get` may use it
/// for the duration of their own processing but must not call `stop` on it.
pub type RuntimeHandle = Arc<dyn AgentRuntime>;
