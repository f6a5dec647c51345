//! Bounded runtime pool
//!
//! This module provides the in-memory cache of live agent runtimes:
//! - `PoolConfig` - Capacity, idle timeout, and sweep cadence
//! - `RuntimePool` - LRU-bounded cache with idle sweep and coordinated shutdown
//! - `PoolStats` - Point-in-time observation of pool contents
//!
//! The pool is the sole owner of every admitted runtime: once a handle is
//! admitted via `set`, only the pool may stop it, and it stops it exactly
//! once, on eviction.

pub mod config;
pub mod pool;

pub use config::PoolConfig;
pub use pool::{PoolStats, RuntimePool};
