// src/target.rs
pub mod classifier;
pub mod types;

use serde::{Deserialize, Serialize};

pub use classifier::{classify_target, TargetClassifier};
pub use types::TargetType;

/// A trimmed target string together with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTarget {
    pub value: String,
    pub target_type: TargetType,
}

impl ClassifiedTarget {
    pub fn classify(raw: &str) -> Self {
        let value = raw.trim().to_string();
        let target_type = classify_target(&value);
        Self { value, target_type }
    }

    /// The value handed to the engine.
    ///
    /// With `quote_phrases` set, names and handles are wrapped in a single
    /// pair of double quotes so the engine treats them as one phrase.
    pub fn engine_value(&self, quote_phrases: bool) -> String {
        if quote_phrases && self.target_type.is_quoted_phrase() {
            quote_once(&self.value)
        } else {
            self.value.clone()
        }
    }
}

fn quote_once(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value.to_string()
    } else {
        format!("\"{}\"", value)
    }
}
