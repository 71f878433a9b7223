//! # Brain Module
//!
//! Deterministic, non-LLM answering for the FURIA chatbot.
//! Answers every question the generative path could not.
//!
//! ## Components
//! - `topic`: Topic key shared by the rule table and the knowledge store
//! - `knowledge`: Static knowledge entries keyed by topic
//! - `intent`: Regex rule table and intent classification
//! - `keywords`: Per-game keyword groups for the last-chance lookup
//! - `composer`: Turns matched topics into one answer
//! - `context_builder`: Prose context for the generative collaborator
//! - `answer_packet`: Output data structure
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod answer_packet;
pub mod composer;
pub mod context_builder;
pub mod intent;
pub mod keywords;
pub mod knowledge;
pub mod topic;

// Re-export main types for convenience
#[allow(unused_imports)]
pub use analyzer::BrainAnalyzer;
#[allow(unused_imports)]
pub use answer_packet::{AnswerPacket, AnswerSource};
#[allow(unused_imports)]
pub use composer::{Composition, ResponseComposer};
#[allow(unused_imports)]
pub use context_builder::{build_context, CONTEXT_HEADER};
#[allow(unused_imports)]
pub use intent::{IntentClassifier, RuleTable, TopicMatch};
#[allow(unused_imports)]
pub use knowledge::{KnowledgeStore, DEFAULT_TOPIC, UNKNOWN_TOPIC};
#[allow(unused_imports)]
pub use topic::Topic;
