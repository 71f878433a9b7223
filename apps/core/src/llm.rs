//! Generative collaborator: an OpenAI-compatible chat-completion client.
//!
//! The service only talks to the [`ChatModel`] trait so the HTTP backend can
//! be swapped for a mock in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::error::AppError;

/// Tone and grounding instruction sent as the first system message.
pub const SYSTEM_INSTRUCTION: &str = "Você é o chatbot oficial da FURIA Esports. Responda de forma amigável, \
informativa e concisa às perguntas sobre a FURIA, seus times de esports, \
jogadores e competições. Use um tom jovem e entusiasmado, próprio do mundo \
dos esports. Se não souber a resposta com base no contexto fornecido, \
informe educadamente que não tem essa informação específica e ofereça \
redirecionar para outras informações que você possui.";

/// Every way the generative path can fail. None of them reach the caller.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("organization record is empty")]
    NoContext,

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed reply: {0}")]
    Malformed(String),

    #[error("reply had no content")]
    EmptyReply,
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CollaboratorError::Timeout
        } else {
            CollaboratorError::Transport(err.to_string())
        }
    }
}

/// One grounded question for the collaborator.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system_instruction: Cow<'static, str>,
    pub context: Arc<str>,
    pub utterance: String,
}

impl ChatRequest {
    pub fn new(context: Arc<str>, utterance: impl Into<String>) -> Self {
        Self {
            system_instruction: Cow::Borrowed(SYSTEM_INSTRUCTION),
            context,
            utterance: utterance.into(),
        }
    }
}

/// Defines the public interface for a chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync + 'static {
    /// Returns the assistant reply text for `request`.
    async fn complete_chat(&self, request: ChatRequest) -> Result<String, CollaboratorError>;
}

#[derive(Serialize)]
struct CompletionPayload<'a> {
    model: &'a str,
    messages: [PayloadMessage<'a>; 3],
    temperature: f32,
}

#[derive(Serialize)]
struct PayloadMessage<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Deserialize)]
struct CompletionReply {
    choices: Vec<ReplyChoice>,
}

#[derive(Deserialize)]
struct ReplyChoice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// `POST {base}/chat/completions` with a bearer token.
pub struct OpenAiChatModel {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiChatModel {
    pub fn new(
        api_base: &Url,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        request_timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder().timeout(request_timeout).build()?;
        let endpoint = format!("{}/chat/completions", api_base.as_str().trim_end_matches('/'));
        let model = model.into();

        info!(endpoint = %endpoint, model = %model, "Chat model configured");

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            model,
            temperature,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete_chat(&self, request: ChatRequest) -> Result<String, CollaboratorError> {
        let payload = CompletionPayload {
            model: &self.model,
            messages: [
                PayloadMessage {
                    role: "system",
                    content: Cow::Borrowed(&*request.system_instruction),
                },
                PayloadMessage {
                    role: "system",
                    content: Cow::Owned(format!("Contexto: {}", request.context)),
                },
                PayloadMessage {
                    role: "user",
                    content: Cow::Borrowed(request.utterance.as_str()),
                },
            ],
            temperature: self.temperature,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: CompletionReply =
            serde_json::from_str(&body).map_err(|e| CollaboratorError::Malformed(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CollaboratorError::Malformed("empty choices".to_string()))?
            .message
            .content
            .ok_or(CollaboratorError::EmptyReply)?;

        debug!(chars = content.chars().count(), "Chat completion received");
        Ok(content)
    }
}
