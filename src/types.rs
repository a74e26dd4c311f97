use serde::{Deserialize, Serialize};

/// Who authored one turn of the conversation. The wire names follow the
/// backend contract: the assistant side is `"model"`, not `"assistant"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One role-tagged message in the conversation log. Immutable once created;
/// repeated identical content is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/ask`, built fresh per turn. `history` is the sliding
/// window projected from the store, never the full log.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub enable_rag: bool,
    pub history: &'a [ChatTurn],
}

/// JSON shape shared by the upload and reset endpoints: exactly one of
/// `message` (success) or `error` (backend-reported failure) is set.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendAck {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ask_request_wire_shape() {
        let history = vec![ChatTurn::user("hi"), ChatTurn::model("hello")];
        let request = AskRequest {
            question: "next question",
            enable_rag: true,
            history: &history,
        };

        let value = serde_json::to_value(&request).expect("request must serialize");
        assert_eq!(
            value,
            json!({
                "question": "next question",
                "enable_rag": true,
                "history": [
                    { "role": "user", "content": "hi" },
                    { "role": "model", "content": "hello" },
                ],
            })
        );
    }

    #[test]
    fn test_backend_ack_parses_both_outcomes() {
        let ok: BackendAck =
            serde_json::from_str(r#"{"message":"learned report.pdf"}"#).expect("success ack");
        assert_eq!(ok.message.as_deref(), Some("learned report.pdf"));
        assert!(ok.error.is_none());

        let failed: BackendAck =
            serde_json::from_str(r#"{"error":"only PDF and DOCX are supported"}"#)
                .expect("error ack");
        assert!(failed.message.is_none());
        assert_eq!(failed.error.as_deref(), Some("only PDF and DOCX are supported"));
    }
}
