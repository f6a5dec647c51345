//! Agent persona documents and their sanitized form

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::provider::ModelProvider;

/// Style guidance for an agent's responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleGuide {
    /// Directions applied to every response
    #[serde(default)]
    pub all: Vec<String>,

    /// Directions applied to chat responses
    #[serde(default)]
    pub chat: Vec<String>,

    /// Directions applied to long-form posts
    #[serde(default)]
    pub post: Vec<String>,
}

/// One example exchange used to steer the agent's voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageExample {
    /// Speaker of the example message
    pub user: String,

    /// Example message content
    pub content: String,
}

/// A raw agent persona document, as stored by the definition store.
///
/// Every field except `name` is optional at the serde level so an incomplete
/// document still deserializes; validation reports the full list of problems
/// instead of the parser rejecting the first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Display name (required, non-empty)
    #[serde(default)]
    pub name: String,

    /// Handle used in conversations; derived from `name` when absent
    #[serde(default)]
    pub username: Option<String>,

    /// Biography text (required)
    #[serde(default)]
    pub bio: Option<String>,

    /// Conversation topics the agent gravitates toward
    #[serde(default)]
    pub topics: Option<Vec<String>>,

    /// Adjectives describing the agent's personality
    #[serde(default)]
    pub adjectives: Option<Vec<String>>,

    /// Background lore snippets
    #[serde(default)]
    pub lore: Option<Vec<String>>,

    /// Response style guidance
    #[serde(default)]
    pub style: Option<StyleGuide>,

    /// Example exchanges
    #[serde(default)]
    pub message_examples: Option<Vec<MessageExample>>,

    /// Declared model provider (free-form; parsed during validation)
    #[serde(default)]
    pub model_provider: String,

    /// Provider/model settings; a `secrets` key is stripped during sanitization
    #[serde(default)]
    pub settings: Option<Value>,

    /// Plugin references; accepted on input, never forwarded to construction
    #[serde(default)]
    pub plugins: Option<Vec<String>>,
}

/// The fully-defaulted, secret-free form of a definition.
///
/// This is the only shape ever handed to runtime construction. The type has
/// no `plugins` field and its `settings` object carries no `secrets` key, so
/// the sanitization invariant holds structurally: there is no way to smuggle
/// plugin references or secret material past this point.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedDefinition {
    pub name: String,
    pub username: String,
    pub bio: String,
    pub topics: Vec<String>,
    pub adjectives: Vec<String>,
    pub lore: Vec<String>,
    pub style: StyleGuide,
    pub message_examples: Vec<MessageExample>,
    pub provider: ModelProvider,
    pub settings: Value,
}

impl SanitizedDefinition {
    /// Sanitize a validated definition.
    ///
    /// Callers must have validated `definition` first: `bio` is required and
    /// `provider` must be the parsed form of `definition.model_provider`.
    pub fn from_definition(definition: &AgentDefinition, provider: ModelProvider) -> Self {
        let username = definition
            .username
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| derive_username(&definition.name));

        Self {
            name: definition.name.trim().to_string(),
            username,
            bio: definition.bio.clone().unwrap_or_default(),
            topics: definition.topics.clone().unwrap_or_default(),
            adjectives: definition.adjectives.clone().unwrap_or_default(),
            lore: definition.lore.clone().unwrap_or_default(),
            style: definition.style.clone().unwrap_or_default(),
            message_examples: definition.message_examples.clone().unwrap_or_default(),
            provider,
            settings: strip_secrets(definition.settings.clone()),
        }
    }
}

/// Derive a default username from a display name: lowercased, whitespace
/// collapsed to single underscores.
fn derive_username(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Remove the `secrets` key from a settings object, defaulting absent or
/// non-object settings to an empty object.
fn strip_secrets(settings: Option<Value>) -> Value {
    match settings {
        Some(Value::Object(mut map)) => {
            map.remove("secrets");
            Value::Object(map)
        }
        _ => Value::Object(serde_json::Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_definition() -> AgentDefinition {
        AgentDefinition {
            name: "Trader Joe".into(),
            bio: Some("An agent that discusses markets.".into()),
            model_provider: "anthropic".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_username_derived_from_name() {
        let sanitized =
            SanitizedDefinition::from_definition(&base_definition(), ModelProvider::Anthropic);
        assert_eq!(sanitized.username, "trader_joe");
    }

    #[test]
    fn test_explicit_username_kept() {
        let mut definition = base_definition();
        definition.username = Some("tj".into());
        let sanitized =
            SanitizedDefinition::from_definition(&definition, ModelProvider::Anthropic);
        assert_eq!(sanitized.username, "tj");
    }

    #[test]
    fn test_blank_username_rederived() {
        let mut definition = base_definition();
        definition.username = Some("   ".into());
        let sanitized =
            SanitizedDefinition::from_definition(&definition, ModelProvider::Anthropic);
        assert_eq!(sanitized.username, "trader_joe");
    }

    #[test]
    fn test_optional_collections_default_empty() {
        let sanitized =
            SanitizedDefinition::from_definition(&base_definition(), ModelProvider::Anthropic);
        assert!(sanitized.topics.is_empty());
        assert!(sanitized.adjectives.is_empty());
        assert!(sanitized.lore.is_empty());
        assert!(sanitized.style.all.is_empty());
        assert!(sanitized.message_examples.is_empty());
    }

    #[test]
    fn test_secrets_stripped_from_settings() {
        let mut definition = base_definition();
        definition.settings = Some(json!({
            "model": "claude-3-5-sonnet",
            "temperature": 0.7,
            "secrets": { "ANTHROPIC_API_KEY": "sk-live-123" }
        }));
        let sanitized =
            SanitizedDefinition::from_definition(&definition, ModelProvider::Anthropic);
        assert!(sanitized.settings.get("secrets").is_none());
        assert_eq!(
            sanitized.settings.get("model"),
            Some(&json!("claude-3-5-sonnet"))
        );
    }

    #[test]
    fn test_plugins_not_forwarded() {
        let mut definition = base_definition();
        definition.plugins = Some(vec!["twitter".into(), "discord".into()]);
        let sanitized =
            SanitizedDefinition::from_definition(&definition, ModelProvider::Anthropic);
        // SanitizedDefinition has no plugins field; check the serialized form too.
        let value = serde_json::to_value(&sanitized).unwrap();
        assert!(value.get("plugins").is_none());
    }

    #[test]
    fn test_incomplete_document_still_parses() {
        let definition: AgentDefinition = serde_json::from_str("{}").unwrap();
        assert!(definition.name.is_empty());
        assert!(definition.bio.is_none());
        assert!(definition.model_provider.is_empty());
    }

    #[test]
    fn test_full_document_parses() {
        let definition: AgentDefinition = serde_json::from_value(json!({
            "name": "Scout",
            "bio": "Finds alpha.",
            "topics": ["defi"],
            "style": { "chat": ["be terse"] },
            "message_examples": [{ "user": "alice", "content": "gm" }],
            "model_provider": "openai",
            "plugins": ["telegram"]
        }))
        .unwrap();
        assert_eq!(definition.name, "Scout");
        assert_eq!(definition.topics.as_deref(), Some(&["defi".to_string()][..]));
        assert_eq!(definition.plugins.as_ref().map(|p| p.len()), Some(1));
    }
}
