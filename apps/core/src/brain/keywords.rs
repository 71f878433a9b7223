//! Coarse keyword groups used when no topic produced an answer.
//!
//! Each group maps a set of game aliases to that game's lineup topic. Groups
//! are checked in priority order with plain substring containment.

/// A game alias group and the topic it falls back to.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub topic: &'static str,
}

// NOTE: Rocket League and Rainbow Six (the furia_other topic) have no group,
// so those questions fall through to the default answer.
pub const KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        name: "counter_strike",
        keywords: &["cs", "cs2", "counter", "counter-strike", "fps"],
        topic: "cs2_lineup",
    },
    KeywordGroup {
        name: "league_of_legends",
        keywords: &["lol", "league", "legends", "moba"],
        topic: "lol_lineup",
    },
    KeywordGroup {
        name: "valorant",
        keywords: &["val", "valorant"],
        topic: "valorant_lineup",
    },
];

/// First group with any keyword contained in `text`.
pub fn detect_group(text: &str) -> Option<&'static KeywordGroup> {
    let text = text.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|group| group.keywords.iter().any(|k| text.contains(k)))
}
