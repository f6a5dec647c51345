//! RuntimePool - Bounded LRU cache of live agent runtimes
//!
//! The pool keeps expensive runtimes warm between requests while guaranteeing
//! hard resource bounds:
//! - At most `max_size` runtimes live at once; overflow evicts the
//!   least-recently-used entry
//! - A background sweep reclaims runtimes idle longer than the configured
//!   timeout
//! - `shutdown` drains every entry, stopping each handle exactly once
//!
//! Bookkeeping is atomic: an entry leaves the map before its handle's
//! `stop()` is awaited, so concurrent lookups during a slow teardown see the
//! slot as absent instead of racing the in-flight stop. Teardown failures are
//! logged and swallowed; a wedged runtime must never pin a capacity slot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::runtime::RuntimeHandle;

use super::config::PoolConfig;

/// One pooled runtime with its recency bookkeeping
struct PoolEntry {
    handle: RuntimeHandle,
    last_access: Instant,
    access_seq: u64,
}

/// Map of agent id -> entry, plus the monotonic access counter.
///
/// Recency is ordered by `access_seq`, not by `last_access`: the counter is
/// bumped under the lock on every successful `get`/`set`, so the order is
/// total even when two accesses land on the same clock tick.
#[derive(Default)]
struct PoolInner {
    entries: HashMap<String, PoolEntry>,
    next_seq: u64,
}

impl PoolInner {
    fn next_access_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Id of the least-recently-accessed entry
    fn lru_id(&self) -> Option<String> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_seq)
            .map(|(id, _)| id.clone())
    }
}

/// Handle to the running idle sweep task
struct SweepTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Point-in-time observation of pool contents
#[derive(Debug, Clone, Serialize)]
pub struct PoolStats {
    /// Number of live entries
    pub size: usize,

    /// Configured capacity
    pub max_size: usize,

    /// Agent ids, least-recently-used first
    pub ids: Vec<String>,
}

/// Bounded cache of live agent runtimes, keyed by agent id.
///
/// Cloning is cheap and shares the underlying pool, so one instance can be
/// handed to request handlers and the composition root alike. The pool does
/// not construct runtimes: on a `get` miss the caller builds one via
/// `RuntimeFactory` and installs it with `set`.
#[derive(Clone)]
pub struct RuntimePool {
    config: PoolConfig,
    inner: Arc<Mutex<PoolInner>>,
    sweeper: Arc<Mutex<Option<SweepTask>>>,
}

impl RuntimePool {
    /// Create an empty pool
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            inner: Arc::new(Mutex::new(PoolInner::default())),
            sweeper: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Look up a runtime, refreshing its recency on hit.
    ///
    /// Returns `None` on miss; the pool never constructs runtimes itself.
    pub async fn get(&self, id: &str) -> Option<RuntimeHandle> {
        let mut inner = self.inner.lock().await;
        if !inner.entries.contains_key(id) {
            return None;
        }
        let seq = inner.next_access_seq();
        let entry = inner.entries.get_mut(id)?;
        entry.last_access = Instant::now();
        entry.access_seq = seq;
        debug!(agent_id = %id, "Pool hit");
        Some(entry.handle.clone())
    }

    /// Install a runtime, evicting as needed to stay within capacity.
    ///
    /// If `id` already holds a runtime, the old handle is stopped first, so
    /// at most one live runtime exists per agent at any instant. If the pool
    /// is then still full, the least-recently-used entry is evicted. The new
    /// entry lands at the most-recently-used end.
    pub async fn set(&self, id: impl Into<String>, handle: RuntimeHandle) {
        let id = id.into();
        let mut victims: Vec<(String, RuntimeHandle)> = Vec::new();
        {
            let mut inner = self.inner.lock().await;

            if let Some(previous) = inner.entries.remove(&id) {
                debug!(agent_id = %id, "Replacing pooled runtime");
                victims.push((id.clone(), previous.handle));
            }

            if inner.entries.len() >= self.config.max_size {
                if let Some(lru) = inner.lru_id() {
                    if let Some(entry) = inner.entries.remove(&lru) {
                        info!(agent_id = %lru, "Evicting least-recently-used runtime");
                        victims.push((lru, entry.handle));
                    }
                }
            }

            let seq = inner.next_access_seq();
            inner.entries.insert(
                id.clone(),
                PoolEntry {
                    handle,
                    last_access: Instant::now(),
                    access_seq: seq,
                },
            );
            debug!(agent_id = %id, size = inner.entries.len(), "Runtime pooled");
        }

        // Victims are already out of the map; lookups during these awaits
        // see the slot as absent.
        for (victim_id, victim) in victims {
            stop_handle(&victim_id, victim).await;
        }
    }

    /// Evict a runtime, stopping its handle. Returns whether an entry existed.
    ///
    /// A `stop()` failure is logged, not propagated: the slot is reclaimed
    /// regardless, since a broken runtime must not wedge capacity.
    pub async fn evict(&self, id: &str) -> bool {
        let removed = { self.inner.lock().await.entries.remove(id) };
        match removed {
            Some(entry) => {
                info!(agent_id = %id, "Evicting runtime");
                stop_handle(id, entry.handle).await;
                true
            }
            None => false,
        }
    }

    /// Whether a runtime is pooled for `id`
    pub async fn has(&self, id: &str) -> bool {
        self.inner.lock().await.entries.contains_key(id)
    }

    /// Snapshot pool contents
    pub async fn stats(&self) -> PoolStats {
        let inner = self.inner.lock().await;
        let mut by_recency: Vec<(String, u64)> = inner
            .entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.access_seq))
            .collect();
        by_recency.sort_by_key(|(_, seq)| *seq);
        PoolStats {
            size: inner.entries.len(),
            max_size: self.config.max_size,
            ids: by_recency.into_iter().map(|(id, _)| id).collect(),
        }
    }

    /// Start the recurring idle sweep, replacing any sweep already running.
    ///
    /// Every `interval`, entries idle longer than the configured idle timeout
    /// are evicted. A single task runs each tick to completion before the
    /// next is admitted, so sweeps never overlap themselves; entries admitted
    /// or refreshed mid-sweep are re-checked before removal and survive.
    pub async fn start_idle_cleanup(&self, interval: Duration) {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let inner = self.inner.clone();
        let idle_timeout = self.config.idle_timeout;

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval fires immediately; consume that tick so the first
            // sweep happens one full interval after installation.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        let evicted = sweep_idle(&inner, idle_timeout).await;
                        if evicted > 0 {
                            info!(evicted, "Idle sweep reclaimed runtimes");
                        }
                    }
                }
            }
            debug!("Idle sweep task exited");
        });

        let mut sweeper = self.sweeper.lock().await;
        if let Some(previous) = sweeper.take() {
            debug!("Replacing idle sweep task");
            previous.token.cancel();
        }
        *sweeper = Some(SweepTask { token, handle });
    }

    /// Cancel the idle sweep, waiting for an in-flight tick to finish.
    ///
    /// Safe to call when no sweep is installed.
    pub async fn stop_idle_cleanup(&self) {
        let task = { self.sweeper.lock().await.take() };
        if let Some(task) = task {
            task.token.cancel();
            if let Err(error) = task.handle.await {
                if error.is_panic() {
                    warn!(error = %error, "Idle sweep task panicked");
                }
            }
        }
    }

    /// Drain the pool: stop the sweep, then stop every remaining runtime.
    ///
    /// Handles are stopped concurrently and best-effort; a failure stopping
    /// one never prevents the others from being stopped. The pool is empty
    /// when this returns.
    pub async fn shutdown(&self) {
        info!("Shutting down runtime pool");
        self.stop_idle_cleanup().await;

        let drained: Vec<(String, RuntimeHandle)> = {
            let mut inner = self.inner.lock().await;
            inner
                .entries
                .drain()
                .map(|(id, entry)| (id, entry.handle))
                .collect()
        };

        let count = drained.len();
        join_all(
            drained
                .into_iter()
                .map(|(id, handle)| async move { stop_handle(&id, handle).await }),
        )
        .await;

        info!(drained = count, "Runtime pool drained");
    }
}

impl std::fmt::Debug for RuntimePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimePool")
            .field("config", &self.config)
            .finish()
    }
}

/// Stop a handle that has already left the pool's bookkeeping.
///
/// Failures are logged and swallowed; from the pool's perspective the slot
/// was reclaimed the moment the entry left the map.
async fn stop_handle(agent_id: &str, handle: RuntimeHandle) {
    match handle.stop().await {
        Ok(()) => debug!(agent_id = %agent_id, "Runtime stopped"),
        Err(error) => {
            warn!(agent_id = %agent_id, error = %error, "Runtime stop failed; slot reclaimed anyway");
        }
    }
}

/// One sweep pass: snapshot expired ids, then evict each.
///
/// Each candidate is re-checked under the lock before removal, so an entry
/// refreshed or replaced after the snapshot survives the pass. Returns the
/// number of entries evicted.
async fn sweep_idle(inner: &Arc<Mutex<PoolInner>>, idle_timeout: Duration) -> usize {
    let now = Instant::now();
    let expired: Vec<String> = {
        let guard = inner.lock().await;
        guard
            .entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.last_access) > idle_timeout)
            .map(|(id, _)| id.clone())
            .collect()
    };

    let mut evicted = 0;
    for id in expired {
        let removed = {
            let mut guard = inner.lock().await;
            let still_idle = guard
                .entries
                .get(&id)
                .map(|entry| Instant::now().duration_since(entry.last_access) > idle_timeout)
                .unwrap_or(false);
            if still_idle {
                guard.entries.remove(&id)
            } else {
                None
            }
        };
        if let Some(entry) = removed {
            info!(agent_id = %id, "Evicting idle runtime");
            stop_handle(&id, entry.handle).await;
            evicted += 1;
        }
    }
    evicted
}
