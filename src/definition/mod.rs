//! Agent definition model
//!
//! Types describing an agent's persona as stored by the definition store:
//! - `AgentDefinition` - The raw persona document, as received from storage
//! - `SanitizedDefinition` - The only form ever handed to runtime construction
//! - `ModelProvider` - Supported model providers and their credential keys
//!
//! Raw definitions are deliberately permissive (every field except `name`
//! is optional at the serde level) so that a structurally incomplete document
//! still parses and can be reported against with a full list of violations.

pub mod character;
pub mod provider;

pub use character::{AgentDefinition, MessageExample, SanitizedDefinition, StyleGuide};
pub use provider::ModelProvider;
