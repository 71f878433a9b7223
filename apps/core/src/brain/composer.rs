//! Response Composer - turns matched topics into one answer string.

use tracing::debug;

use super::answer_packet::AnswerSource;
use super::keywords;
use super::knowledge::KnowledgeStore;
use super::topic::Topic;

/// Maximum number of knowledge entries joined into one answer.
pub const MAX_JOINED_ENTRIES: usize = 2;

/// Composed answer plus the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub text: String,
    pub source: AnswerSource,
}

pub struct ResponseComposer<'a> {
    store: &'a KnowledgeStore,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(store: &'a KnowledgeStore) -> Self {
        Self { store }
    }

    /// Builds the answer for `utterance` from its matched `topics`.
    ///
    /// Precedence: known topic entries (first two, space-joined), then the
    /// keyword groups, then the `default` entry. Never fails.
    pub fn compose(&self, topics: &[Topic], utterance: &str) -> Composition {
        let entries: Vec<&str> = topics
            .iter()
            .filter_map(|topic| self.store.get(topic.as_str()))
            .take(MAX_JOINED_ENTRIES)
            .collect();

        if !entries.is_empty() {
            return Composition {
                text: entries.join(" "),
                source: AnswerSource::KnowledgeBase,
            };
        }

        if let Some(group) = keywords::detect_group(utterance) {
            debug!(group = group.name, topic = group.topic, "Keyword group matched");
            if let Some(text) = self.store.get(group.topic) {
                return Composition {
                    text: text.to_string(),
                    source: AnswerSource::KeywordFallback,
                };
            }
        }

        Composition {
            text: self.store.default_entry().to_string(),
            source: AnswerSource::Default,
        }
    }
}
