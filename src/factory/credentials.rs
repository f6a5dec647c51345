//! Credential resolution for model providers
//!
//! Supports two sources:
//! - Environment: the conventional `*_API_KEY` variable per provider
//! - Static: an in-memory map, for tests and embedders with their own
//!   secret store
//!
//! # Example
//!
//! ```ignore
//! use agent_runtime_pool::factory::{EnvCredentials, StaticCredentials};
//! use agent_runtime_pool::definition::ModelProvider;
//!
//! let creds = StaticCredentials::new()
//!     .with(ModelProvider::Anthropic, "sk-test");
//! assert!(creds.resolve(ModelProvider::Anthropic).is_some());
//! ```

use std::collections::HashMap;

use crate::definition::ModelProvider;

/// A resolved API credential
#[derive(Clone)]
pub struct Credential {
    /// The API key or token
    pub token: String,
}

impl Credential {
    /// Create a credential from a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

// Never print the token.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential").field("token", &"***").finish()
    }
}

/// Trait for resolving provider credentials.
///
/// Called during both validation and creation; implementations should be
/// cheap and side-effect free.
pub trait CredentialResolver: Send + Sync {
    /// Resolve the credential for a provider, if one is available
    fn resolve(&self, provider: ModelProvider) -> Option<Credential>;
}

/// Resolves credentials from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialResolver for EnvCredentials {
    fn resolve(&self, provider: ModelProvider) -> Option<Credential> {
        std::env::var(provider.env_key())
            .ok()
            .filter(|v| !v.is_empty())
            .map(Credential::new)
    }
}

/// Resolves credentials from an in-memory map
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    tokens: HashMap<ModelProvider, String>,
}

impl StaticCredentials {
    /// Create an empty credential map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential for a provider
    pub fn with(mut self, provider: ModelProvider, token: impl Into<String>) -> Self {
        self.tokens.insert(provider, token.into());
        self
    }
}

impl CredentialResolver for StaticCredentials {
    fn resolve(&self, provider: ModelProvider) -> Option<Credential> {
        self.tokens.get(&provider).map(Credential::new)
    }
}
