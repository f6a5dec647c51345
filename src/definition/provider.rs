//! Supported model providers

use serde::{Deserialize, Serialize};

/// Model providers an agent definition may declare
///
/// Each provider maps to a conventional environment variable holding its
/// API credential; see [`ModelProvider::env_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
    Anthropic,
    Google,
    Groq,
}

impl ModelProvider {
    /// All supported providers, in declaration order
    pub const ALL: [ModelProvider; 4] = [
        ModelProvider::OpenAi,
        ModelProvider::Anthropic,
        ModelProvider::Google,
        ModelProvider::Groq,
    ];

    /// Canonical lowercase name, as it appears in definition documents
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::Anthropic => "anthropic",
            ModelProvider::Google => "google",
            ModelProvider::Groq => "groq",
        }
    }

    /// Environment variable that conventionally carries this provider's credential
    pub fn env_key(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "OPENAI_API_KEY",
            ModelProvider::Anthropic => "ANTHROPIC_API_KEY",
            ModelProvider::Google => "GOOGLE_GENERATIVE_AI_API_KEY",
            ModelProvider::Groq => "GROQ_API_KEY",
        }
    }

    /// Parse a provider name as it appears in a raw definition document.
    ///
    /// Case-insensitive; returns `None` for unsupported providers so the
    /// caller can report the violation instead of failing to parse.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(ModelProvider::OpenAi),
            "anthropic" => Some(ModelProvider::Anthropic),
            "google" => Some(ModelProvider::Google),
            "groq" => Some(ModelProvider::Groq),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelProvider::parse(s).ok_or_else(|| format!("Unsupported model provider: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(ModelProvider::parse("Anthropic"), Some(ModelProvider::Anthropic));
        assert_eq!(ModelProvider::parse("OPENAI"), Some(ModelProvider::OpenAi));
        assert_eq!(ModelProvider::parse(" groq "), Some(ModelProvider::Groq));
    }

    #[test]
    fn test_parse_unsupported() {
        assert_eq!(ModelProvider::parse("llama-at-home"), None);
        assert_eq!(ModelProvider::parse(""), None);
    }

    #[test]
    fn test_env_key_roundtrip() {
        for provider in ModelProvider::ALL {
            assert!(provider.env_key().ends_with("_API_KEY"));
            assert_eq!(ModelProvider::parse(provider.as_str()), Some(provider));
        }
    }
}
