//! Query Service - orchestrates the generative and fallback paths.
//!
//! Every utterance first tries the generative collaborator. Any failure is
//! logged and answered by the deterministic brain instead, so `answer` is
//! infallible from the caller's point of view.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::brain::{build_context, AnswerPacket, AnswerSource, BrainAnalyzer};
use crate::llm::{ChatModel, ChatRequest, CollaboratorError};
use crate::record::OrgRecord;

/// Result of one attempt at the generative path.
#[derive(Debug)]
pub enum GenerativeOutcome {
    Answered(String),
    CollaboratorFailed(CollaboratorError),
}

pub struct QueryService {
    brain: BrainAnalyzer,
    model: Option<Arc<dyn ChatModel>>,
    /// Serialized once; `None` when the record is empty.
    context: Option<Arc<str>>,
    timeout: Duration,
}

impl QueryService {
    pub fn new(
        brain: BrainAnalyzer,
        model: Option<Arc<dyn ChatModel>>,
        record: &OrgRecord,
        timeout: Duration,
    ) -> Self {
        let context = if record.is_empty() {
            None
        } else {
            Some(Arc::from(build_context(record)))
        };

        Self {
            brain,
            model,
            context,
            timeout,
        }
    }

    /// Answer used when everything else has gone wrong.
    pub fn default_answer(&self) -> &str {
        self.brain.knowledge().default_entry()
    }

    pub fn generative_enabled(&self) -> bool {
        self.model.is_some() && self.context.is_some()
    }

    /// Tries the collaborator once, bounded by the configured timeout.
    pub async fn generate(&self, utterance: &str) -> GenerativeOutcome {
        let Some(model) = &self.model else {
            return GenerativeOutcome::CollaboratorFailed(CollaboratorError::MissingCredential);
        };
        let Some(context) = &self.context else {
            return GenerativeOutcome::CollaboratorFailed(CollaboratorError::NoContext);
        };

        let request = ChatRequest::new(Arc::clone(context), utterance);
        match timeout(self.timeout, model.complete_chat(request)).await {
            Ok(Ok(reply)) if reply.trim().is_empty() => {
                GenerativeOutcome::CollaboratorFailed(CollaboratorError::EmptyReply)
            }
            Ok(Ok(reply)) => GenerativeOutcome::Answered(reply),
            Ok(Err(e)) => GenerativeOutcome::CollaboratorFailed(e),
            Err(_) => GenerativeOutcome::CollaboratorFailed(CollaboratorError::Timeout),
        }
    }

    /// Answers one utterance. Never fails and never returns empty text.
    #[instrument(skip(self, utterance), fields(request_id = %Uuid::new_v4()))]
    pub async fn answer(&self, utterance: &str) -> AnswerPacket {
        let start = Instant::now();

        let packet = match self.generate(utterance).await {
            GenerativeOutcome::Answered(text) => {
                let mut packet = AnswerPacket::new(utterance.to_string(), text, AnswerSource::Generative);
                packet.processing_time_ms = start.elapsed().as_millis() as u64;
                packet
            }
            GenerativeOutcome::CollaboratorFailed(reason) => {
                match reason {
                    CollaboratorError::MissingCredential => {
                        debug!("Generative path disabled, using fallback");
                    }
                    other => {
                        warn!(reason = %other, "Generative path failed, using fallback");
                    }
                }
                self.brain.analyze(utterance)
            }
        };

        info!(fallback = packet.source.is_fallback(), "{}", packet.summary());
        packet
    }
}
