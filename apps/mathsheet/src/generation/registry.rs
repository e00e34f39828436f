//! Generator Registry: maps (category, subcategory) to a question generator.
//!
//! Built once at startup and carried in `AppState` behind an `Arc`; nothing
//! here is global. Generators are trait objects so new sources can be
//! registered without touching the pipeline or handlers.
//!
//! The shipped generator, `BankGenerator`, replays a fixed list of items loaded
//! from a JSON question bank.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::Item;

// ────────────────────────────────────────────────────────────────────────────
// Keys and errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeneratorKey {
    pub category: String,
    pub subcategory: String,
}

impl GeneratorKey {
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }
}

impl fmt::Display for GeneratorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.subcategory)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no generator registered for '{key}'")]
    UnknownGenerator { key: GeneratorKey },

    #[error("selections produced no items, but {target} were requested")]
    InsufficientItems { target: usize },

    #[error("{rounds} rounds of {items_per_group} questions exceeds the {max}-question sheet limit")]
    TargetTooLarge {
        rounds: usize,
        items_per_group: usize,
        max: usize,
    },

    #[error("question bank: {0}")]
    Bank(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Generators
// ────────────────────────────────────────────────────────────────────────────

/// A source of question items. Implementations may return fewer than `count`.
pub trait QuestionGenerator: Send + Sync {
    fn generate(&self, count: usize) -> Vec<Item>;
}

/// Replays a fixed item list in order, at most `count` items per call.
pub struct BankGenerator {
    items: Vec<Item>,
}

impl BankGenerator {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl QuestionGenerator for BankGenerator {
    fn generate(&self, count: usize) -> Vec<Item> {
        self.items.iter().take(count).cloned().collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<GeneratorKey, Arc<dyn QuestionGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `generator` under `key`, returning any generator it replaced.
    pub fn register(
        &mut self,
        key: GeneratorKey,
        generator: Arc<dyn QuestionGenerator>,
    ) -> Option<Arc<dyn QuestionGenerator>> {
        self.generators.insert(key, generator)
    }

    pub fn get(&self, key: &GeneratorKey) -> Option<&Arc<dyn QuestionGenerator>> {
        self.generators.get(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<GeneratorKey> {
        let mut keys: Vec<GeneratorKey> = self.generators.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn generate(&self, key: &GeneratorKey, count: usize) -> Result<Vec<Item>, RegistryError> {
        self.get(key)
            .map(|generator| generator.generate(count))
            .ok_or_else(|| RegistryError::UnknownGenerator { key: key.clone() })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Question bank loading
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct BankEntry {
    category: String,
    subcategory: String,
    #[serde(default)]
    items: Vec<Item>,
}

/// Builds a registry from a JSON array of `{category, subcategory, items}`.
/// Entries sharing a key are merged in file order.
pub fn parse_bank(json: &str) -> Result<GeneratorRegistry, RegistryError> {
    let entries: Vec<BankEntry> = serde_json::from_str(json)
        .map_err(|e| RegistryError::Bank(format!("invalid JSON: {e}")))?;

    let mut order: Vec<GeneratorKey> = Vec::new();
    let mut grouped: HashMap<GeneratorKey, Vec<Item>> = HashMap::new();
    for entry in entries {
        let key = GeneratorKey::new(entry.category, entry.subcategory);
        if !grouped.contains_key(&key) {
            order.push(key.clone());
        }
        grouped.entry(key).or_default().extend(entry.items);
    }

    let mut registry = GeneratorRegistry::new();
    for key in order {
        let items = grouped.remove(&key).unwrap_or_default();
        registry.register(key, Arc::new(BankGenerator::new(items)));
    }
    Ok(registry)
}

/// Reads and parses a question bank file.
pub fn load_bank(path: &Path) -> Result<GeneratorRegistry, RegistryError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| RegistryError::Bank(format!("cannot read {}: {e}", path.display())))?;
    let registry = parse_bank(&json)?;
    info!(
        path = %path.display(),
        generators = registry.len(),
        "Question bank loaded"
    );
    Ok(registry)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
