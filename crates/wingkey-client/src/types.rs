//! Wire types for the backend endpoints.

use serde::Serialize;
use serde_json::Value;
use wingkey_suggest::Tone;

/// Shown when a conversation has no match name.
pub const UNKNOWN_MATCH_NAME: &str = "?";

/// One conversation from `GET /keyboard/context`.
///
/// Every field is optional on the wire. Missing, null or wrongly typed
/// fields take their default instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    /// Conversation identifier; empty when absent.
    pub conversation_id: String,
    /// Profile of the match, if known.
    pub profile_id: Option<String>,
    /// Display name of the match; `"?"` when absent.
    pub match_name: String,
    /// Dating platform name; empty when absent.
    pub platform: String,
    /// Last message exchanged, if any.
    pub last_message: Option<String>,
    /// Base64 face thumbnail, if any.
    pub face_image_base64: Option<String>,
}

impl ConversationSummary {
    /// Map one JSON element, applying per-field defaults.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            conversation_id: text("conversationId").unwrap_or_default(),
            profile_id: text("profileId"),
            match_name: text("matchName").unwrap_or_else(|| UNKNOWN_MATCH_NAME.to_owned()),
            platform: text("platform").unwrap_or_default(),
            last_message: text("lastMessage"),
            face_image_base64: text("faceImageBase64"),
        }
    }
}

/// Map the `conversations` array of a context response.
///
/// A missing (or non-array) `conversations` field is an empty list.
pub(crate) fn conversations_from_json(root: &serde_json::Map<String, Value>) -> Vec<ConversationSummary> {
    root.get("conversations")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(ConversationSummary::from_json).collect())
        .unwrap_or_default()
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Text to analyse (the match's message or the conversation so far).
    pub text: String,
    /// Tone of the replies to generate.
    pub tone: Tone,
    /// Conversation the text belongs to.
    #[serde(skip_serializing_if = "is_blank")]
    pub conversation_id: Option<String>,
    /// What the user is trying to achieve.
    #[serde(skip_serializing_if = "is_blank")]
    pub objective: Option<String>,
}

impl AnalyzeRequest {
    /// Create a request with no conversation or objective.
    #[must_use]
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            conversation_id: None,
            objective: None,
        }
    }

    /// Attach the conversation identifier.
    #[must_use]
    pub fn with_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    /// Attach the user's objective.
    #[must_use]
    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }
}

/// Body of `POST /keyboard/send-message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    /// Conversation the message was sent in.
    pub conversation_id: String,
    /// Text actually sent.
    pub content: String,
    /// Whether the text came from a suggestion.
    pub was_ai_suggestion: bool,
    /// Tone that was selected.
    pub tone: Tone,
    /// Objective that was selected, if any.
    pub objective: Option<String>,
}

#[allow(clippy::ref_option)]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
