//! Answer Packet - Output structure for a processed query.
//!
//! Carries the final answer together with how it was produced, for logging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::topic::Topic;

/// Which path produced the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Generative collaborator reply
    Generative,
    /// One or two knowledge entries of matched topics
    KnowledgeBase,
    /// Lineup entry picked by a game keyword group
    KeywordFallback,
    /// The `default` knowledge entry
    Default,
}

impl AnswerSource {
    pub fn label(&self) -> &'static str {
        match self {
            AnswerSource::Generative => "generative",
            AnswerSource::KnowledgeBase => "knowledge_base",
            AnswerSource::KeywordFallback => "keyword_fallback",
            AnswerSource::Default => "default",
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, AnswerSource::Generative)
    }
}

/// Complete result of answering one utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPacket {
    /// Original user query
    pub query: String,

    /// Topics detected by the classifier (empty on the generative path)
    pub matched_topics: Vec<Topic>,

    /// Final answer text, never empty
    pub answer: String,

    /// Path that produced the answer
    pub source: AnswerSource,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Timestamp of the answer
    pub timestamp: DateTime<Utc>,
}

impl AnswerPacket {
    pub fn new(query: String, answer: String, source: AnswerSource) -> Self {
        Self {
            query,
            matched_topics: vec![],
            answer,
            source,
            processing_time_ms: 0,
            timestamp: Utc::now(),
        }
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        let topics: Vec<&str> = self.matched_topics.iter().map(Topic::as_str).collect();
        format!(
            "Source: {}, Topics: [{}], Answer chars: {}, Time: {}ms",
            self.source.label(),
            topics.join(", "),
            self.answer.chars().count(),
            self.processing_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_packet_creation() {
        let packet = AnswerPacket::new("oi".to_string(), "E aí!".to_string(), AnswerSource::KnowledgeBase);

        assert_eq!(packet.query, "oi");
        assert!(packet.matched_topics.is_empty());
        assert!(packet.source.is_fallback());
    }

    #[test]
    fn test_summary() {
        let mut packet = AnswerPacket::new("x".to_string(), "abc".to_string(), AnswerSource::Default);
        packet.matched_topics = vec![Topic::from("greeting"), Topic::from("thanks")];
        let summary = packet.summary();

        assert!(summary.contains("Source: default"));
        assert!(summary.contains("Topics: [greeting, thanks]"));
        assert!(summary.contains("Answer chars: 3"));
    }

    #[test]
    fn test_source_serializes_snake_case() {
        let json = serde_json::to_string(&AnswerSource::KeywordFallback).unwrap();
        assert_eq!(json, "\"keyword_fallback\"");
    }
}
