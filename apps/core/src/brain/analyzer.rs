//! Brain Analyzer - the deterministic fallback path.
//!
//! Runs intent classification against the rule table, then composes an
//! answer from the knowledge store. Pure and lock-free: the tables are
//! shared read-only, so one analyzer serves every request concurrently.

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::answer_packet::AnswerPacket;
use super::composer::ResponseComposer;
use super::intent::{IntentClassifier, RuleTable};
use super::knowledge::KnowledgeStore;

/// Main Brain analyzer that orchestrates classification and composition
#[derive(Clone)]
pub struct BrainAnalyzer {
    rules: Arc<RuleTable>,
    knowledge: Arc<KnowledgeStore>,
}

impl BrainAnalyzer {
    pub fn new(rules: Arc<RuleTable>, knowledge: Arc<KnowledgeStore>) -> Self {
        Self { rules, knowledge }
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    /// Analyze a query and produce an answer packet
    pub fn analyze(&self, query: &str) -> AnswerPacket {
        let start = Instant::now();

        let matches = IntentClassifier::new(&self.rules).classify_detailed(query);
        for m in &matches {
            debug!(topic = %m.topic, pattern = %m.pattern, "Intent matched");
        }
        let topics: Vec<_> = matches.into_iter().map(|m| m.topic).collect();

        let composition = ResponseComposer::new(&self.knowledge).compose(&topics, query);

        let mut packet = AnswerPacket::new(query.to_string(), composition.text, composition.source);
        packet.matched_topics = topics;
        packet.processing_time_ms = start.elapsed().as_millis() as u64;
        packet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::answer_packet::AnswerSource;

    fn brain() -> BrainAnalyzer {
        BrainAnalyzer::new(
            Arc::new(RuleTable::builtin().unwrap()),
            Arc::new(KnowledgeStore::builtin().unwrap()),
        )
    }

    #[test]
    fn test_lineup_question() {
        let packet = brain().analyze("quem joga cs2");

        assert_eq!(packet.matched_topics, vec!["cs2_lineup"]);
        assert!(packet.answer.contains("KSCERATO, yuurih, FalleN, chelo e skullz"));
        assert_eq!(packet.source, AnswerSource::KnowledgeBase);
    }

    #[test]
    fn test_greeting() {
        let brain = brain();
        let packet = brain.analyze("oi");

        assert_eq!(packet.answer, brain.knowledge().get("greeting").unwrap());
    }

    #[test]
    fn test_default_answer() {
        let brain = brain();
        let packet = brain.analyze("qual a previsão do tempo");

        assert!(packet.matched_topics.is_empty());
        assert_eq!(packet.answer, brain.knowledge().default_entry());
        assert_eq!(packet.source, AnswerSource::Default);
    }
}
