//! Runtime factory
//!
//! Turns stored agent definitions into live, initialized runtimes:
//! - `CredentialResolver` - Looks up the API credential for a provider
//! - `ValidationReport` - Full list of definition violations
//! - `RuntimeFactory` - Validate, sanitize, construct, initialize

pub mod credentials;
pub mod factory;

pub use credentials::{Credential, CredentialResolver, EnvCredentials, StaticCredentials};
pub use factory::{RuntimeFactory, ValidationReport, MAX_NAME_LEN};
