use serde::{Deserialize, Serialize};

/// Optional knobs forwarded with a chat message.
/// Unknown keys are passed straight through to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_retrieval: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(flatten)]
    pub options: &'a ChatOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_flattens_options() {
        let mut options = ChatOptions {
            use_retrieval: Some(true),
            ..Default::default()
        };
        options
            .extra
            .insert("persona".to_string(), serde_json::json!("coach"));

        let body = serde_json::to_value(ChatRequest {
            message: "hello",
            options: &options,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"message": "hello", "use_retrieval": true, "persona": "coach"})
        );
    }
}
