use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One questionnaire item answered on a numeric scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_min")]
    pub min: u8,
    #[serde(default = "default_max")]
    pub max: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn default_min() -> u8 {
    1
}

fn default_max() -> u8 {
    5
}

impl Question {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            min: default_min(),
            max: default_max(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

/// Questions served by the check-in and baseline endpoints.
/// Carries no offline marker, even when synthesized locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

/// A daily check-in: who, when, and the numeric answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckInSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub answers: BTreeMap<String, serde_json::Value>,
}

impl CheckInSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, question_id: &str, value: f64) -> Self {
        self.answers
            .insert(question_id.to_string(), serde_json::Value::from(value));
        self
    }

    /// Numeric answers only, ignoring identity/date fields even if they were
    /// smuggled in through the answers map.
    pub fn numeric_answers(&self) -> impl Iterator<Item = f64> + '_ {
        self.answers
            .iter()
            .filter(|(key, _)| key.as_str() != "user_id" && key.as_str() != "date")
            .filter_map(|(_, value)| value.as_f64())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInResult {
    #[serde(default)]
    pub mood_index: f64,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub offline: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
