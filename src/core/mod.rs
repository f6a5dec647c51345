//! Core types for the runtime pool
//!
//! This module provides the error taxonomy shared by the factory and the pool:
//! - `PoolError` - Everything that can go wrong building or pooling a runtime
//! - `PoolResult` - Result alias used throughout the crate

pub mod error;

pub use error::{PoolError, PoolResult};
