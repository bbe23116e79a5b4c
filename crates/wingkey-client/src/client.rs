//! HTTP client for the suggestion backend.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use tracing::{debug, error};
use wingkey_crypto::RequestSigner;
use wingkey_suggest::{Suggestions, parse};

use crate::best_effort::BestEffort;
use crate::error::{ClientError, ClientResult};
use crate::phase::RequestPhase;
use crate::types::{AnalyzeRequest, ConversationSummary, SentMessage, conversations_from_json};

/// Conversation context endpoint.
pub const CONTEXT_PATH: &str = "/keyboard/context";
/// Analysis endpoint.
pub const ANALYZE_PATH: &str = "/analyze";
/// Sent-message tracking endpoint.
pub const SEND_MESSAGE_PATH: &str = "/keyboard/send-message";

/// Default time allowed to establish a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default time allowed for a whole request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Connection establishment.
    pub connect: Duration,
    /// Whole request, connect through last body byte.
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            request: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Client for the keyboard backend.
///
/// Cheap to clone; clones share the connection pool and the signer.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    signer: Arc<RequestSigner>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with the default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, signer: RequestSigner) -> ClientResult<Self> {
        Self::with_timeouts(base_url, signer, Timeouts::default())
    }

    /// Create a client with explicit timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Client`] if the HTTP client cannot be built.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        signer: RequestSigner,
        timeouts: Timeouts,
    ) -> ClientResult<Self> {
        let http = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()
            .map_err(|e| ClientError::Client(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_owned();
        debug!(base_url = %base_url, ?timeouts, "API client ready");

        Ok(Self {
            http,
            base_url,
            signer: Arc::new(signer),
        })
    }

    /// Base URL every path is joined onto, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the user's recent conversations.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`] on a non-2xx status, [`ClientError::Network`]
    /// on transport failure and [`ClientError::InvalidResponse`] when the
    /// body is not a JSON object.
    pub async fn fetch_conversations(&self, token: &str) -> ClientResult<Vec<ConversationSummary>> {
        let url = self.endpoint(CONTEXT_PATH);
        debug!(url = %url, "Fetching conversation context");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, bearer(token)?)
            .send()
            .await
            .map_err(|e| ClientError::network(&e))?;

        let body = success_body(response).await?;
        let root: Value = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("context is not JSON: {e}")))?;
        let Some(root) = root.as_object() else {
            return Err(ClientError::InvalidResponse(
                "context is not a JSON object".to_owned(),
            ));
        };

        let conversations = conversations_from_json(root);
        debug!(count = conversations.len(), "Fetched conversations");
        Ok(conversations)
    }

    /// Request a raw analysis for `request`.
    ///
    /// The body is signed and the envelope sent in the `X-Signature`,
    /// `X-Timestamp` and `X-Nonce` headers. The bearer token is attached
    /// only when one is given.
    ///
    /// # Errors
    ///
    /// [`ClientError::KeyAssembly`] if signing fails (nothing is sent),
    /// [`ClientError::Http`], [`ClientError::Network`], and
    /// [`ClientError::EmptyResponse`] when `analysis` is missing or empty.
    pub async fn analyze_text(
        &self,
        request: &AnalyzeRequest,
        token: Option<&str>,
    ) -> ClientResult<String> {
        self.analyze_observed(request, token, &mut |_: RequestPhase| {})
            .await
    }

    /// Request an analysis and extract suggestions from it.
    ///
    /// # Errors
    ///
    /// Same as [`analyze_text`](Self::analyze_text). Extraction itself never
    /// fails.
    pub async fn suggest(
        &self,
        request: &AnalyzeRequest,
        token: Option<&str>,
    ) -> ClientResult<Suggestions> {
        self.suggest_observed(request, token, |_| {}).await
    }

    /// Like [`suggest`](Self::suggest), reporting every [`RequestPhase`]
    /// transition to `on_phase`, ending with [`RequestPhase::Idle`].
    ///
    /// # Errors
    ///
    /// Same as [`analyze_text`](Self::analyze_text).
    pub async fn suggest_observed<F>(
        &self,
        request: &AnalyzeRequest,
        token: Option<&str>,
        mut on_phase: F,
    ) -> ClientResult<Suggestions>
    where
        F: FnMut(RequestPhase) + Send,
    {
        let result = self.analyze_observed(request, token, &mut on_phase).await;

        let outcome = RequestPhase::outcome(&result);
        debug!(phase = %outcome, "Suggestion request finished");
        on_phase(outcome);
        on_phase(RequestPhase::Idle);

        result.map(|analysis| parse(&analysis))
    }

    /// Record that a message was sent, without waiting for the backend.
    ///
    /// Spawned on the current tokio runtime. Failures are logged and
    /// dropped; the returned handle carries no outcome.
    pub fn send_message(&self, token: &str, message: SentMessage) -> BestEffort {
        let client = self.clone();
        let token = token.to_owned();
        BestEffort::spawn("send_message", async move {
            client.post_sent_message(&token, &message).await
        })
    }

    async fn analyze_observed(
        &self,
        request: &AnalyzeRequest,
        token: Option<&str>,
        on_phase: &mut (dyn FnMut(RequestPhase) + Send),
    ) -> ClientResult<String> {
        on_phase(RequestPhase::Signing);
        let token = token.filter(|t| !t.is_empty());

        let body = serde_json::to_vec(request)
            .map_err(|e| ClientError::Serialization(e.to_string()))?;
        let envelope = self.signer.sign(&body)?;

        let url = self.endpoint(ANALYZE_PATH);
        let mut builder = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in envelope.headers() {
            builder = builder.header(name, value);
        }
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, bearer(token)?);
        }

        debug!(
            url = %url,
            tone = %request.tone,
            bytes = body.len(),
            authenticated = token.is_some(),
            "Sending analysis request"
        );
        on_phase(RequestPhase::Sent);

        // The signed bytes go out as-is.
        let response = builder
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::network(&e))?;

        let body = success_body(response).await?;
        extract_analysis(&body)
    }

    async fn post_sent_message(&self, token: &str, message: &SentMessage) -> ClientResult<()> {
        let url = self.endpoint(SEND_MESSAGE_PATH);
        debug!(
            url = %url,
            conversation_id = %message.conversation_id,
            was_ai_suggestion = message.was_ai_suggestion,
            "Recording sent message"
        );

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, bearer(token)?)
            .json(message)
            .send()
            .await
            .map_err(|e| ClientError::network(&e))?;

        success_body(response).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn bearer(token: &str) -> ClientResult<HeaderValue> {
    let mut value = HeaderValue::try_from(format!("Bearer {token}"))
        .map_err(|e| ClientError::InvalidHeader(format!("invalid token characters: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Body of a 2xx response, or [`ClientError::Http`] with the error body.
async fn success_body(response: reqwest::Response) -> ClientResult<String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Backend returned an error");
        return Err(ClientError::Http {
            status: status.as_u16(),
            body,
        });
    }
    response.text().await.map_err(|e| ClientError::network(&e))
}

fn extract_analysis(body: &str) -> ClientResult<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::InvalidResponse(format!("analysis is not JSON: {e}")))?;

    match value.get("analysis").and_then(Value::as_str) {
        Some(analysis) if !analysis.trim().is_empty() => Ok(analysis.to_owned()),
        _ => Err(ClientError::EmptyResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wingkey_crypto::FragmentedKeySource;

    fn client(base_url: &str) -> ApiClient {
        let source = FragmentedKeySource::split(&[9u8; 32], 4, b"mask").unwrap();
        ApiClient::new(base_url, RequestSigner::new(source)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            client("https://api.example.com/").endpoint(ANALYZE_PATH),
            "https://api.example.com/analyze"
        );
        assert_eq!(
            client("https://api.example.com/v1").endpoint(CONTEXT_PATH),
            "https://api.example.com/v1/keyboard/context"
        );
    }

    #[test]
    fn test_bearer_is_sensitive() {
        let value = bearer("abc").unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Bearer abc");
    }

    #[test]
    fn test_bearer_rejects_control_characters() {
        assert!(matches!(
            bearer("abc\ndef"),
            Err(ClientError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_extract_analysis() {
        assert_eq!(
            extract_analysis(r#"{"analysis":"1. Oi"}"#).unwrap(),
            "1. Oi"
        );
        assert!(matches!(
            extract_analysis(r#"{"analysis":""}"#),
            Err(ClientError::EmptyResponse)
        ));
        assert!(matches!(
            extract_analysis(r#"{"analysis":"   "}"#),
            Err(ClientError::EmptyResponse)
        ));
        assert!(matches!(
            extract_analysis("{}"),
            Err(ClientError::EmptyResponse)
        ));
        assert!(matches!(
            extract_analysis(r#"{"analysis":42}"#),
            Err(ClientError::EmptyResponse)
        ));
        assert!(matches!(
            extract_analysis("<html>"),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_debug_hides_signer() {
        let rendered = format!("{:?}", client("http://localhost"));
        assert!(rendered.contains("http://localhost"));
        assert!(!rendered.contains("signer"));
    }
}
