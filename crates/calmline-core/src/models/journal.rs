use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub label: String,
    pub score: f64,
}

impl Emotion {
    pub fn new(label: &str, score: f64) -> Self {
        Self {
            label: label.to_string(),
            score,
        }
    }
}

/// Result of analyzing a journal entry, live or heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalAnalysis {
    /// Overall sentiment in `[-1, 1]`.
    #[serde(default)]
    pub sentiment: f64,
    #[serde(default)]
    pub emotions: Vec<Emotion>,
    #[serde(default, skip_serializing_if = "super::is_false")]
    pub offline: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JournalAnalysis {
    /// Highest-scoring emotion, if any were detected.
    pub fn dominant_emotion(&self) -> Option<&Emotion> {
        self.emotions
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// A journal file (text, document, or recording) sent as multipart form data.
#[derive(Debug, Clone)]
pub struct JournalUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Extra text parts sent alongside the file (e.g. `user_id`).
    pub fields: Vec<(String, String)>,
}

impl JournalUpload {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_emotion() {
        let analysis = JournalAnalysis {
            sentiment: 0.2,
            emotions: vec![Emotion::new("Sadness", 0.6), Emotion::new("Joy", 0.7)],
            offline: false,
            extra: Default::default(),
        };
        assert_eq!(analysis.dominant_emotion().map(|e| e.label.as_str()), Some("Joy"));
    }

    #[test]
    fn test_offline_flag_serialization() {
        let mut analysis: JournalAnalysis =
            serde_json::from_str(r#"{"sentiment": 0.1, "emotions": []}"#).unwrap();
        assert!(serde_json::to_value(&analysis).unwrap().get("offline").is_none());

        analysis.offline = true;
        assert_eq!(serde_json::to_value(&analysis).unwrap()["offline"], true);
    }
}
