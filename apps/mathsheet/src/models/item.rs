use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::layout::SizeClass;

/// Keys every item is expected to carry. Absence is tolerated (logged, not rejected).
pub const RECOMMENDED_FIELDS: [&str; 3] = ["question", "answer", "explanation"];

/// One question instance as produced by a generator.
///
/// Fields other than the four known ones are kept in `extra` and copied through
/// layout untouched (figure payloads, duplication markers, generator metadata).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub size: SizeClass,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Recommended fields this item lacks, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.question.is_some(),
            self.answer.is_some(),
            self.explanation.is_some(),
        ];
        RECOMMENDED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }

    /// A copy tagged as padding for the item at `original_index`.
    pub fn duplicate_of(&self, original_index: usize) -> Self {
        let mut copy = self.clone();
        copy.extra.insert("duplicated".to_string(), Value::Bool(true));
        copy.extra
            .insert("original_index".to_string(), Value::from(original_index));
        copy
    }

    pub fn answer_text(&self) -> &str {
        self.answer.as_deref().unwrap_or("")
    }
}
