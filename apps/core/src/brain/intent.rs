//! Intent Classification using regex patterns.
//!
//! Pattern-based topic detection over lowercased Portuguese text.
//! No ML model required - pure Rust regex matching.
//!
//! Topics are tested in registration order and a topic is recorded on its
//! first matching pattern, so the output is deduplicated and ordered by the
//! table, not by where the match sits in the text.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use super::topic::Topic;
use crate::error::AppError;

// Alias groups reused across the per-discipline rules.
const CS: &str = "(cs|counter|cs2)";
const LOL: &str = "(lol|league|legends)";
const VAL: &str = "(val|valorant)";

const LINEUP_WORDS: &str = r"(line(\s)?up|elenco|jogadores|integrantes|time)";
const COACH_WORDS: &str = "(técnico|coach|treinador|comissão)";
const TITLE_WORDS: &str = "(conquistas|títulos|troféus|vitórias|campeonatos)";
const WIN_WORDS: &str = "(ganhou|venceu|conquistou)";
const COMPETITION_WORDS: &str = "(competições|torneios|campeonatos|disputam)";
const CHANGE_WORDS: &str = "(mudanças|alterações|trocas|substituições)";

/// Pattern definition for one topic.
struct TopicRules {
    topic: Topic,
    patterns: Vec<Regex>,
}

/// Immutable topic → ordered pattern list, in registration order.
pub struct RuleTable {
    rules: Vec<TopicRules>,
}

/// One matched topic plus the pattern that fired.
#[derive(Debug, Clone, Serialize)]
pub struct TopicMatch {
    pub topic: Topic,
    pub pattern: String,
}

fn both_ways(subject: &str, words: &str) -> [String; 2] {
    [format!("{words}.*{subject}"), format!("{subject}.*{words}")]
}

fn lineup_rules(subject: &str) -> Vec<String> {
    let mut rules = both_ways(subject, LINEUP_WORDS).to_vec();
    rules.push(format!("quem.*(joga|está).*{subject}"));
    rules.push(format!("quem.*(é|são).*jogadores.*{subject}"));
    rules
}

fn coach_rules(subject: &str) -> Vec<String> {
    let mut rules = both_ways(subject, COACH_WORDS).to_vec();
    rules.push(format!("quem.*(treina|comanda).*{subject}"));
    rules
}

fn achievement_rules(subject: &str) -> Vec<String> {
    let mut rules = both_ways(subject, TITLE_WORDS).to_vec();
    rules.push(format!("{subject}.*{WIN_WORDS}"));
    rules
}

fn recent_rules(subject: &str, words: &str) -> Vec<String> {
    let mut rules = both_ways(subject, words).to_vec();
    rules.push(format!("como.*(foi|está).*{subject}"));
    rules
}

fn literal(pattern: &str) -> Vec<String> {
    vec![pattern.to_string()]
}

/// The organization's built-in rules, in registration order.
fn builtin_rules() -> Vec<(&'static str, Vec<String>)> {
    vec![
        // CS2 / Counter Strike
        ("cs2_lineup", lineup_rules(CS)),
        ("cs2_coach", coach_rules(CS)),
        ("cs2_achievements", achievement_rules(CS)),
        ("cs2_competitions", both_ways(CS, COMPETITION_WORDS).to_vec()),
        ("cs2_player_kscerato", literal("kscerato")),
        ("cs2_player_fallen", literal("fallen")),
        ("cs2_player_yuurih", literal("yuurih")),
        ("cs2_recent", recent_rules(CS, "(recente|última|recém)")),
        ("cs2_changes", both_ways(CS, CHANGE_WORDS).to_vec()),
        // League of Legends
        ("lol_lineup", lineup_rules(LOL)),
        ("lol_coach", coach_rules(LOL)),
        ("lol_achievements", achievement_rules(LOL)),
        ("lol_competitions", both_ways(LOL, COMPETITION_WORDS).to_vec()),
        ("lol_recent", recent_rules(LOL, "(recente|última|recém|próxima)")),
        ("lol_player_ayu", literal("ayu")),
        ("lol_player_tutsz", literal("tutsz")),
        ("lol_changes", both_ways(LOL, CHANGE_WORDS).to_vec()),
        ("lol_previous", both_ways(LOL, "(antiga|anterior|passada|2024)").to_vec()),
        // Valorant
        ("valorant_lineup", lineup_rules(VAL)),
        ("valorant_coach", coach_rules(VAL)),
        ("valorant_academy", both_ways(VAL, "(academy|base|jovem)").to_vec()),
        ("valorant_achievements", achievement_rules(VAL)),
        ("valorant_competitions", both_ways(VAL, COMPETITION_WORDS).to_vec()),
        ("valorant_player_heat", literal("heat")),
        ("valorant_player_raafa", literal("raafa")),
        ("valorant_changes", {
            let mut rules = both_ways(VAL, CHANGE_WORDS).to_vec();
            rules.push("mwzera".to_string());
            rules
        }),
        // Organization
        (
            "furia_history",
            vec![
                "(história|fundação|fundada|sobre).*(furia|pantera)".to_string(),
                "quando.*(foi|surgiu|nasceu|criada)".to_string(),
                "quem.*(fundou|criou)".to_string(),
            ],
        ),
        (
            "furia_branding",
            vec![
                "(logo|marca|símbolo|cor|visual|identidade|mascote)".to_string(),
                "pantera".to_string(),
            ],
        ),
        (
            "furia_other",
            vec![
                "(outros|outras).*(jogos|modalidades|esports)".to_string(),
                "(rocket|r6|rainbow|siege)".to_string(),
            ],
        ),
        // Conversation
        (
            "greeting",
            vec![
                "^(oi|olá|e aí|salve|opa|eae|beleza|tudo bem|como vai)".to_string(),
                "(oi|olá|e aí|salve|opa|eae|beleza)$".to_string(),
            ],
        ),
        (
            "thanks",
            vec![
                "(obrigad|valeu|agradec|thanks|brigad|vlw)".to_string(),
                "(obrigad|valeu|agradec|thanks|brigad|vlw)$".to_string(),
            ],
        ),
        (
            "goodbye",
            vec![
                "^(tchau|adeus|até|flw|falou)".to_string(),
                "(tchau|adeus|até|flw|falou)$".to_string(),
            ],
        ),
    ]
}

impl RuleTable {
    /// Compiles the built-in rule set.
    pub fn builtin() -> Result<Self, AppError> {
        Self::new(builtin_rules())
    }

    /// Compiles `(topic, patterns)` pairs, keeping their order.
    ///
    /// Fails on an invalid pattern or a repeated topic.
    pub fn new<T, P, S>(rules: impl IntoIterator<Item = (T, P)>) -> Result<Self, AppError>
    where
        T: Into<String>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut compiled = Vec::new();

        for (topic, patterns) in rules {
            let topic = Topic::new(topic);
            if !seen.insert(topic.clone()) {
                return Err(AppError::Config(format!(
                    "Duplicate rule group for topic '{}'",
                    topic
                )));
            }
            let patterns = patterns
                .into_iter()
                .map(|p| Regex::new(p.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            compiled.push(TopicRules { topic, patterns });
        }

        Ok(Self { rules: compiled })
    }

    /// Topics in registration order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.rules.iter().map(|r| &r.topic)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Intent classifier over a shared [`RuleTable`].
pub struct IntentClassifier<'a> {
    table: &'a RuleTable,
}

impl<'a> IntentClassifier<'a> {
    pub fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    /// Matched topics in registration order, each at most once.
    #[cfg(test)]
    pub fn classify(&self, text: &str) -> Vec<Topic> {
        self.classify_detailed(text)
            .into_iter()
            .map(|m| m.topic)
            .collect()
    }

    /// Matched topics in registration order, each at most once, with the
    /// pattern that fired for each.
    ///
    /// One trailing newline is ignored, so end-anchored patterns still match
    /// a message submitted with a final line break.
    pub fn classify_detailed(&self, text: &str) -> Vec<TopicMatch> {
        let lowered = text.to_lowercase();
        let text = lowered.strip_suffix('\n').unwrap_or(lowered.as_str());
        if text.is_empty() {
            return vec![];
        }

        self.table
            .rules
            .iter()
            .filter_map(|group| {
                group
                    .patterns
                    .iter()
                    .find(|pattern| pattern.is_match(text))
                    .map(|pattern| TopicMatch {
                        topic: group.topic.clone(),
                        pattern: pattern.as_str().to_string(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleTable {
        RuleTable::builtin().expect("builtin rules compile")
    }

    #[test]
    fn test_lineup_question_detection() {
        let table = table();
        let classifier = IntentClassifier::new(&table);

        assert_eq!(classifier.classify("quem joga cs2"), vec!["cs2_lineup"]);
        assert_eq!(classifier.classify("Qual o elenco de Valorant?"), vec!["valorant_lineup"]);
        assert_eq!(classifier.classify("line up do lol"), vec!["lol_lineup"]);
    }

    #[test]
    fn test_player_name_detection() {
        let table = table();
        let classifier = IntentClassifier::new(&table);

        assert_eq!(classifier.classify("kscerato"), vec!["cs2_player_kscerato"]);
        assert_eq!(classifier.classify("FalleN"), vec!["cs2_player_fallen"]);
        assert_eq!(classifier.classify("tutsz"), vec!["lol_player_tutsz"]);
    }

    #[test]
    fn test_greeting_detection() {
        let table = table();
        let classifier = IntentClassifier::new(&table);

        assert_eq!(classifier.classify("oi"), vec!["greeting"]);
        assert_eq!(classifier.classify("Salve"), vec!["greeting"]);
    }

    #[test]
    fn test_registration_order_not_text_order() {
        let table = table();
        let classifier = IntentClassifier::new(&table);

        // "obrigado" appears first in the text but thanks is registered after cs2_coach.
        let topics = classifier.classify("obrigado, quem é o técnico do cs?");
        assert_eq!(topics, vec!["cs2_coach", "thanks"]);
    }

    #[test]
    fn test_unknown_detection() {
        let table = table();
        let classifier = IntentClassifier::new(&table);

        assert!(classifier.classify("").is_empty());
        assert!(classifier.classify("qual a previsão do tempo").is_empty());
    }

    #[test]
    fn test_detailed_reports_first_pattern() {
        let table = RuleTable::new([("t", vec!["abc", "a"])]).unwrap();
        let classifier = IntentClassifier::new(&table);

        let matches = classifier.classify_detailed("xabcx");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pattern, "abc");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = RuleTable::new([("broken", vec!["(unclosed"])]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let result = RuleTable::new([("a", vec!["x"]), ("a", vec!["y"])]);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("Duplicate")));
    }

    #[test]
    fn test_builtin_order() {
        let table = table();
        let topics: Vec<&str> = table.topics().map(Topic::as_str).collect();
        assert_eq!(
            topics,
            vec![
                "cs2_lineup",
                "cs2_coach",
                "cs2_achievements",
                "cs2_competitions",
                "cs2_player_kscerato",
                "cs2_player_fallen",
                "cs2_player_yuurih",
                "cs2_recent",
                "cs2_changes",
                "lol_lineup",
                "lol_coach",
                "lol_achievements",
                "lol_competitions",
                "lol_recent",
                "lol_player_ayu",
                "lol_player_tutsz",
                "lol_changes",
                "lol_previous",
                "valorant_lineup",
                "valorant_coach",
                "valorant_academy",
                "valorant_achievements",
                "valorant_competitions",
                "valorant_player_heat",
                "valorant_player_raafa",
                "valorant_changes",
                "furia_history",
                "furia_branding",
                "furia_other",
                "greeting",
                "thanks",
                "goodbye",
            ]
        );
        assert_eq!(table.len(), 32);
    }

    #[test]
    fn test_every_topic_has_a_firing_rule() {
        let table = table();
        let classifier = IntentClassifier::new(&table);

        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("quem joga cs2", vec!["cs2_lineup"]),
            ("quem é o técnico do cs", vec!["cs2_coach"]),
            ("conquistas do cs", vec!["cs2_achievements"]),
            ("torneios de cs", vec!["cs2_competitions"]),
            ("kscerato", vec!["cs2_player_kscerato"]),
            ("fallen", vec!["cs2_player_fallen"]),
            ("yuurih", vec!["cs2_player_yuurih"]),
            ("última do cs", vec!["cs2_recent"]),
            ("mudanças no cs", vec!["cs2_changes"]),
            ("elenco do lol", vec!["lol_lineup"]),
            ("coach do lol", vec!["lol_coach"]),
            ("lol ganhou?", vec!["lol_achievements"]),
            ("campeonatos do lol", vec!["lol_achievements", "lol_competitions"]),
            ("próxima do lol", vec!["lol_recent"]),
            ("ayu", vec!["lol_player_ayu"]),
            ("tutsz", vec!["lol_player_tutsz"]),
            ("trocas no lol", vec!["lol_changes"]),
            ("lol anterior", vec!["lol_previous"]),
            ("elenco do valorant", vec!["valorant_lineup"]),
            ("treinador valorant", vec!["valorant_coach"]),
            ("qual a base do valorant", vec!["valorant_academy"]),
            ("troféus valorant", vec!["valorant_achievements"]),
            ("torneios valorant", vec!["valorant_competitions"]),
            ("heat", vec!["valorant_player_heat"]),
            ("raafa", vec!["valorant_player_raafa"]),
            ("mwzera voltou?", vec!["valorant_changes"]),
            ("história da furia", vec!["furia_history"]),
            ("qual a cor da marca", vec!["furia_branding"]),
            ("e o r6?", vec!["furia_other"]),
            ("oi", vec!["greeting"]),
            ("obrigado", vec!["thanks"]),
            ("tchau", vec!["goodbye"]),
        ];

        for (utterance, expected) in cases {
            assert_eq!(classifier.classify(utterance), expected, "Wrong topics for '{}'", utterance);
        }
    }

    #[test]
    fn test_trailing_newline_keeps_end_anchor() {
        let table = table();
        let classifier = IntentClassifier::new(&table);

        assert_eq!(classifier.classify("ok, flw\n"), vec!["goodbye"]);
        assert_eq!(classifier.classify("ok, flw"), vec!["goodbye"]);
        assert!(classifier.classify("\n").is_empty());
    }
}
