//! RuntimeFactory - Builds initialized runtimes from stored definitions
//!
//! The factory is the gatekeeper between the definition store and the pool:
//! nothing reaches runtime construction without passing validation and
//! sanitization, and nothing reaches the pool without having been
//! initialized exactly once.

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::{PoolError, PoolResult};
use crate::definition::{AgentDefinition, ModelProvider, SanitizedDefinition};
use crate::runtime::{RuntimeBuilder, RuntimeHandle, StorageAdapter};

use super::credentials::CredentialResolver;

/// Upper bound on agent display names
pub const MAX_NAME_LEN: usize = 100;

/// Outcome of validating an agent definition.
///
/// Accumulates every violation rather than stopping at the first, so a
/// caller fixing one field at a time sees the full list up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Whether the definition passed every check
    pub valid: bool,

    /// All violations found, in check order
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// All violations joined into one line, for logs and error messages
    pub fn error_summary(&self) -> String {
        self.errors.join("; ")
    }
}

/// Builds runtime handles from stored agent definitions.
///
/// Construction sequence (see `create_runtime`): validate, resolve the
/// provider credential, sanitize, build via the adapter, initialize. A
/// handle that fails any step is never returned.
pub struct RuntimeFactory {
    credentials: Arc<dyn CredentialResolver>,
    builder: Arc<dyn RuntimeBuilder>,
    storage: Arc<dyn StorageAdapter>,
}

impl RuntimeFactory {
    /// Create a factory over the given credential, construction, and storage seams
    pub fn new(
        credentials: Arc<dyn CredentialResolver>,
        builder: Arc<dyn RuntimeBuilder>,
        storage: Arc<dyn StorageAdapter>,
    ) -> Self {
        Self {
            credentials,
            builder,
            storage,
        }
    }

    /// Validate a definition, accumulating every violation.
    ///
    /// Pure: no side effects on failure or success.
    pub fn validate_config(&self, definition: &AgentDefinition) -> ValidationReport {
        let mut errors = Vec::new();

        let name = definition.name.trim();
        if name.is_empty() {
            errors.push("name is required".to_string());
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(format!("name must be {} characters or fewer", MAX_NAME_LEN));
        }

        if definition
            .bio
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .is_none()
        {
            errors.push("bio is required".to_string());
        }

        let declared = definition.model_provider.trim();
        if declared.is_empty() {
            errors.push("model provider is required".to_string());
        } else {
            match ModelProvider::parse(declared) {
                None => errors.push(format!("unsupported model provider: {}", declared)),
                Some(provider) => {
                    if self.credentials.resolve(provider).is_none() {
                        errors.push(format!("no credential available for provider: {}", provider));
                    }
                }
            }
        }

        ValidationReport::from_errors(errors)
    }

    /// Build and initialize a runtime for a definition.
    ///
    /// Fails with `PoolError::Validation` (full violation list) before any
    /// side effect. The credential is re-resolved even though validation
    /// checked it, guarding against the environment changing between the two
    /// calls. The returned handle is initialized exactly once; a handle whose
    /// initialization failed is dropped here and never escapes.
    pub async fn create_runtime(&self, definition: &AgentDefinition) -> PoolResult<RuntimeHandle> {
        let report = self.validate_config(definition);
        if !report.valid {
            return Err(PoolError::validation(report.errors));
        }

        // Validation guarantees these succeed; re-checked rather than unwrapped.
        let provider = ModelProvider::parse(&definition.model_provider)
            .ok_or_else(|| PoolError::Configuration(definition.model_provider.clone()))?;
        let credential = self
            .credentials
            .resolve(provider)
            .ok_or_else(|| PoolError::Configuration(provider.to_string()))?;

        let sanitized = SanitizedDefinition::from_definition(definition, provider);
        let agent = sanitized.name.clone();

        debug!(
            agent = %agent,
            provider = %provider,
            storage = %self.storage.backend(),
            "Building agent runtime"
        );

        let runtime = self
            .builder
            .build(sanitized, credential, self.storage.clone())
            .await
            .map_err(|source| PoolError::Construction {
                agent: agent.clone(),
                source,
            })?;
        let handle: RuntimeHandle = Arc::from(runtime);

        handle
            .initialize()
            .await
            .map_err(|source| PoolError::Initialization {
                agent: agent.clone(),
                source,
            })?;

        info!(agent = %agent, agent_id = %handle.agent_id(), "Agent runtime initialized");
        Ok(handle)
    }
}

impl std::fmt::Debug for RuntimeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeFactory")
            .field("storage", &self.storage.backend())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::StaticCredentials;
    use crate::runtime::AgentRuntime;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRuntime {
        id: String,
        fail_init: bool,
        init_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl AgentRuntime for MockRuntime {
        fn agent_id(&self) -> &str {
            &self.id
        }

        async fn initialize(&self) -> anyhow::Result<()> {
            self.init_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_init {
                anyhow::bail!("model endpoint unreachable");
            }
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct MockBuilder {
        fail_init: bool,
        build_calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl RuntimeBuilder for MockBuilder {
        async fn build(
            &self,
            definition: SanitizedDefinition,
            _credential: crate::factory::Credential,
            _storage: Arc<dyn StorageAdapter>,
        ) -> anyhow::Result<Box<dyn AgentRuntime>> {
            self.build_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockRuntime {
                id: definition.username,
                fail_init: self.fail_init,
                init_calls: AtomicUsize::new(0),
            }))
        }
    }

    struct MockStorage;

    impl StorageAdapter for MockStorage {
        fn backend(&self) -> &str {
            "mock"
        }
    }

    fn factory_with(fail_init: bool, build_calls: Arc<AtomicUsize>) -> RuntimeFactory {
        let credentials = StaticCredentials::new()
            .with(ModelProvider::Anthropic, "sk-test")
            .with(ModelProvider::OpenAi, "sk-test");
        RuntimeFactory::new(
            Arc::new(credentials),
            Arc::new(MockBuilder {
                fail_init,
                build_calls,
            }),
            Arc::new(MockStorage),
        )
    }

    fn valid_definition() -> AgentDefinition {
        AgentDefinition {
            name: "Trader Joe".into(),
            bio: Some("Markets commentary.".into()),
            model_provider: "anthropic".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accumulates_all_errors() {
        let factory = factory_with(false, Arc::default());
        let definition = AgentDefinition {
            model_provider: "llama-at-home".into(),
            ..Default::default()
        };

        let report = factory.validate_config(&definition);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.errors[0], "name is required");
        assert_eq!(report.errors[1], "bio is required");
        assert_eq!(report.errors[2], "unsupported model provider: llama-at-home");
    }

    #[test]
    fn test_validate_name_length_bound() {
        let factory = factory_with(false, Arc::default());
        let mut definition = valid_definition();
        definition.name = "x".repeat(MAX_NAME_LEN + 1);

        let report = factory.validate_config(&definition);
        assert_eq!(
            report.errors,
            vec!["name must be 100 characters or fewer".to_string()]
        );
    }

    #[test]
    fn test_validate_missing_credential() {
        let factory = factory_with(false, Arc::default());
        let mut definition = valid_definition();
        definition.model_provider = "groq".into();

        let report = factory.validate_config(&definition);
        assert_eq!(
            report.errors,
            vec!["no credential available for provider: groq".to_string()]
        );
    }

    #[test]
    fn test_validate_ok() {
        let factory = factory_with(false, Arc::default());
        let report = factory.validate_config(&valid_definition());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_create_runtime_success() {
        let factory = factory_with(false, Arc::default());
        let handle = factory.create_runtime(&valid_definition()).await.unwrap();
        assert_eq!(handle.agent_id(), "trader_joe");
    }

    #[tokio::test]
    async fn test_create_runtime_validation_failure_has_no_side_effects() {
        let build_calls = Arc::new(AtomicUsize::new(0));
        let factory = factory_with(false, build_calls.clone());

        let result = factory.create_runtime(&AgentDefinition::default()).await;
        assert!(matches!(result, Err(PoolError::Validation { .. })));
        assert_eq!(build_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_runtime_initialization_failure() {
        let factory = factory_with(true, Arc::default());

        let result = factory.create_runtime(&valid_definition()).await;
        match result {
            Err(PoolError::Initialization { agent, source }) => {
                assert_eq!(agent, "Trader Joe");
                assert_eq!(source.to_string(), "model endpoint unreachable");
            }
            other => panic!("expected initialization error, got {:?}", other.map(|_| ())),
        }
    }
}
