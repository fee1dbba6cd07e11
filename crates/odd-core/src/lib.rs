//! ODD Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the ODD
//! extraction system:
//! - Extraction models (entities, attributes, categories, mentions, tokens)
//! - The ODD record schema and its YAML serializer
//! - Common error types
//! - Capability traits for the linguistic analyzer and entity recognizer
//! - Configuration management

pub mod config;
pub mod record;

pub use config::{ClassifierConfig, ConfigError, ExtractorConfig, LoggingConfig, TemplateConfig};
pub use record::{
    CalibrationDetails, Environment, OddRecord, OperationalConditions, Orientation, Position,
    Sensor, Sensors, VehicleState,
};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for ODD extraction operations
#[derive(Error, Debug)]
pub enum OddError {
    #[error("Linguistic analysis failed: {0}")]
    Analysis(String),

    #[error("Entity recognition failed: {0}")]
    Recognition(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OddError>;

// ============================================================================
// Entity Models
// ============================================================================

/// Domain category assigned to a classified entity
///
/// A closed enumeration; `Entity` is the fallback for mentions whose
/// label matches none of the known patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    #[default]
    Entity,
    Environment,
    Object,
    Vehicle,
}

impl EntityCategory {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "Entity",
            Self::Environment => "Environment",
            Self::Object => "Object",
            Self::Vehicle => "Vehicle",
        }
    }

    /// Lowercase form used as the leading segment of entity identifiers
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Environment => "environment",
            Self::Object => "object",
            Self::Vehicle => "vehicle",
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single textual modifier bound to an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name, unique per entity
    pub name: String,

    /// Attribute value (the original surface text of the modifier)
    pub value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A classified entity extracted from one text submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier unique within one extraction, `{category}_{n}`
    pub id: String,

    /// Domain category
    pub category: EntityCategory,

    /// Surface text, sub-word continuation markers removed
    pub text: String,

    /// Attributes keyed by name
    pub attributes: HashMap<String, Attribute>,
}

impl Entity {
    /// Create a new entity with no attributes
    pub fn new(id: impl Into<String>, category: EntityCategory, text: impl Into<String>) -> Self {
        let id = id.into();
        debug_assert!(!id.is_empty());
        Self {
            id,
            category,
            text: text.into(),
            attributes: HashMap::new(),
        }
    }

    /// Attach an attribute, replacing any existing one with the same name
    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.attributes.insert(attribute.name.clone(), attribute);
    }

    /// Builder form of [`set_attribute`](Self::set_attribute)
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.set_attribute(attribute);
        self
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}

/// A relationship between two extracted entities
///
/// The current pipeline computes no relationships; the type keeps the
/// extraction result shape stable for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source entity id
    pub source: String,

    /// Target entity id
    pub target: String,

    /// Relationship label
    pub predicate: String,
}

/// Everything extracted from one text submission
///
/// Entities appear in recognition order. The result is a single-use,
/// per-invocation value with no persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Entities in recognition order
    pub entities: Vec<Entity>,

    /// Entity-to-entity relationships (always empty today)
    pub relationships: Vec<Relationship>,

    /// Free-standing attributes (always empty today)
    pub attributes: HashMap<String, Attribute>,
}

impl ExtractionResult {
    /// Check whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty() && self.attributes.is_empty()
    }

    /// Look up an entity by its identifier
    pub fn entity_by_id(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

// ============================================================================
// Upstream Capability Models
// ============================================================================

/// A span of text identified by the recognizer, with its raw label
///
/// `word` may include sub-word continuation markers (`##`) and `label`
/// may carry begin/inside prefixes (`B-`, `I-`); both are normalized by
/// the classifier, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMention {
    pub word: String,
    pub label: String,
}

impl EntityMention {
    /// Create a new mention
    pub fn new(word: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            label: label.into(),
        }
    }
}

/// Coarse part-of-speech tags (universal-tag subset)
///
/// Only `Adjective` drives attribute binding; the rest exist so analyzer
/// implementations can report what they actually saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Punctuation,
    Other,
}

/// A token with the linguistic annotations the pipeline consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    /// Original surface text
    pub text: String,

    /// Lowercased base form
    pub lemma: String,

    /// Coarse part-of-speech tag
    pub pos: PartOfSpeech,

    /// Whether the token is purely alphabetic
    pub is_alpha: bool,

    /// Whether the token is a stop word
    pub is_stop: bool,

    /// Surface text of the syntactic head token
    pub head_text: String,
}

impl AnalyzedToken {
    /// Create a token that heads itself, with the lowercased text as lemma
    pub fn new(text: impl Into<String>, pos: PartOfSpeech) -> Self {
        let text = text.into();
        Self {
            lemma: text.to_lowercase(),
            is_alpha: !text.is_empty() && text.chars().all(|c| c.is_alphabetic()),
            is_stop: false,
            head_text: text.clone(),
            text,
            pos,
        }
    }

    /// Set the lemma
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set the syntactic head
    pub fn with_head(mut self, head_text: impl Into<String>) -> Self {
        self.head_text = head_text.into();
        self
    }

    /// Mark the token as a stop word
    pub fn with_stop(mut self, is_stop: bool) -> Self {
        self.is_stop = is_stop;
        self
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for linguistic analyzers (tokens plus dependency annotations)
///
/// Implementations are constructed once at process start and injected
/// into the pipeline. A failure here aborts the whole invocation.
pub trait LinguisticAnalyzer: Send + Sync {
    /// Analyze text into annotated tokens
    fn analyze(&self, text: &str) -> Result<Vec<AnalyzedToken>>;

    /// Get analyzer name for logging
    fn name(&self) -> &str;
}

/// Trait for entity recognizers
///
/// Implementations score spans of text and yield labeled mentions. A
/// failure here aborts the whole invocation.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entity mentions in text
    fn recognize(&self, text: &str) -> Result<Vec<EntityMention>>;

    /// Get recognizer name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_default_is_fallback() {
        assert_eq!(EntityCategory::default(), EntityCategory::Entity);
    }

    #[test]
    fn test_category_display_and_prefix() {
        assert_eq!(EntityCategory::Environment.to_string(), "Environment");
        assert_eq!(EntityCategory::Vehicle.id_prefix(), "vehicle");
        assert_eq!(EntityCategory::Object.id_prefix(), "object");
    }

    #[test]
    fn test_entity_builder() {
        let entity = Entity::new("vehicle_0", EntityCategory::Vehicle, "car")
            .with_attribute(Attribute::new("ner_type", "MISC"));

        assert_eq!(entity.category, EntityCategory::Vehicle);
        assert_eq!(entity.attribute("ner_type").map(|a| a.value.as_str()), Some("MISC"));
    }

    #[test]
    fn test_attribute_overwrite_last_wins() {
        let mut entity = Entity::new("vehicle_0", EntityCategory::Vehicle, "car");
        entity.set_attribute(Attribute::new("red", "Red"));
        entity.set_attribute(Attribute::new("red", "red"));

        assert_eq!(entity.attributes.len(), 1);
        assert_eq!(entity.attribute("red").map(|a| a.value.as_str()), Some("red"));
    }

    #[test]
    fn test_extraction_result_default_is_empty() {
        let result = ExtractionResult::default();
        assert!(result.is_empty());
        assert!(result.entity_by_id("vehicle_0").is_none());
    }

    #[test]
    fn test_analyzed_token_heads_itself() {
        let token = AnalyzedToken::new("car", PartOfSpeech::Noun);
        assert_eq!(token.head_text, "car");
        assert_eq!(token.lemma, "car");
        assert!(token.is_alpha);
        assert!(!token.is_stop);
    }

    #[test]
    fn test_analyzed_token_builders() {
        let token = AnalyzedToken::new("The", PartOfSpeech::Determiner)
            .with_head("car")
            .with_stop(true);
        assert_eq!(token.head_text, "car");
        assert!(token.is_stop);
    }
}
