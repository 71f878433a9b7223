//! Brain Module Tests
//!
//! End-to-end checks of the fallback path over the built-in rule table and
//! knowledge base, plus context serialization of the bundled record.

use crate::brain::{
    build_context, AnswerSource, BrainAnalyzer, IntentClassifier, KnowledgeStore, RuleTable,
    CONTEXT_HEADER,
};
use crate::fs_manager::PortablePathManager;
use crate::record::OrgRecord;
use std::sync::Arc;

fn brain() -> BrainAnalyzer {
    BrainAnalyzer::new(
        Arc::new(RuleTable::builtin().expect("builtin rules compile")),
        Arc::new(KnowledgeStore::builtin().expect("builtin knowledge is valid")),
    )
}

#[cfg(test)]
mod fallback_answer_tests {
    use super::*;

    #[test]
    fn test_single_topic_answers() {
        let brain = brain();
        let kb = brain.knowledge();

        let cases = vec![
            ("quem joga cs2", "cs2_lineup"),
            ("kscerato", "cs2_player_kscerato"),
            ("oi", "greeting"),
            ("e o r6?", "furia_other"),
            ("ok, flw\n", "goodbye"),
        ];

        for (utterance, topic) in cases {
            let packet = brain.analyze(utterance);
            assert_eq!(
                packet.answer,
                kb.get(topic).unwrap(),
                "Expected {} entry for '{}'",
                topic,
                utterance
            );
            assert_eq!(packet.source, AnswerSource::KnowledgeBase);
        }
    }

    #[test]
    fn test_two_topics_joined_in_registration_order() {
        let brain = brain();
        let kb = brain.knowledge();

        let packet = brain.analyze("obrigado, quem é o técnico do cs?");
        let expected = format!("{} {}", kb.get("cs2_coach").unwrap(), kb.get("thanks").unwrap());
        assert_eq!(packet.answer, expected);
    }

    #[test]
    fn test_third_topic_is_dropped() {
        let brain = brain();
        let kb = brain.knowledge();

        let packet = brain.analyze("oi, valeu, tchau");
        assert_eq!(packet.matched_topics, vec!["greeting", "thanks", "goodbye"]);
        assert_eq!(
            packet.answer,
            format!("{} {}", kb.get("greeting").unwrap(), kb.get("thanks").unwrap())
        );
    }

    #[test]
    fn test_keyword_groups() {
        let brain = brain();
        let kb = brain.knowledge();

        let cases = vec![
            ("counter strike novidades", "cs2_lineup"),
            ("me fala do lol", "lol_lineup"),
            ("valorant!!", "valorant_lineup"),
            // group 1 wins over group 2
            ("cs ou lol?", "cs2_lineup"),
        ];

        for (utterance, topic) in cases {
            let packet = brain.analyze(utterance);
            assert!(packet.matched_topics.is_empty(), "No rule should match '{}'", utterance);
            assert_eq!(packet.answer, kb.get(topic).unwrap(), "Expected {} for '{}'", topic, utterance);
            assert_eq!(packet.source, AnswerSource::KeywordFallback);
        }
    }

    #[test]
    fn test_default_for_unrelated_and_empty() {
        let brain = brain();
        let default = brain.knowledge().default_entry().to_string();

        for utterance in ["qual a previsão do tempo", "", "   "] {
            let packet = brain.analyze(utterance);
            assert_eq!(packet.answer, default, "Expected default for '{}'", utterance);
            assert_eq!(packet.source, AnswerSource::Default);
        }
    }

    #[test]
    fn test_answers_never_empty() {
        let brain = brain();
        let utterances = [
            "Quem é o técnico do Valorant?",
            "CONQUISTAS DA FURIA NO LOL",
            "como foi o último campeonato de cs",
            "qual a cor da marca",
            "🐾🐾🐾",
            "quando foi criada a furia",
        ];

        for utterance in utterances {
            assert!(!brain.analyze(utterance).answer.is_empty(), "Empty answer for '{}'", utterance);
        }
    }

    #[test]
    fn test_classifier_is_deterministic() {
        let table = RuleTable::builtin().unwrap();
        let classifier = IntentClassifier::new(&table);

        let first = classifier.classify("quem treina o time de valorant?");
        let second = classifier.classify("quem treina o time de valorant?");
        assert_eq!(first, second);
        assert!(first.contains(&"valorant_coach".into()));
    }
}

#[cfg(test)]
mod context_tests {
    use super::*;

    fn bundled_record() -> OrgRecord {
        OrgRecord::load(&PortablePathManager::default_record_path()).expect("bundled record loads")
    }

    #[test]
    fn test_empty_record_round_trip() {
        assert_eq!(build_context(&OrgRecord::empty()), CONTEXT_HEADER);
    }

    #[test]
    fn test_bundled_record_sections_in_order() {
        let context = build_context(&bundled_record());
        assert!(context.starts_with(CONTEXT_HEADER));
        assert!(context.len() > CONTEXT_HEADER.len());

        let markers = [
            "Sobre: ",
            "Fundada em: 2017\n",
            "\nTimes:\n",
            "\nPrincipais Competições:\n",
            "\nLeague of Legends (2025):\n",
            "\nCounter Strike 2 (2025):\n",
            "\nValorant (2025):\n",
            "\nConquistas Históricas:\n",
            "\nEstatísticas de Jogadores:\n",
        ];

        let mut cursor = 0;
        for marker in markers {
            let found = context[cursor..]
                .find(marker)
                .unwrap_or_else(|| panic!("Missing or out of order: {:?}", marker));
            cursor += found + marker.len();
        }
    }

    #[test]
    fn test_bundled_record_details() {
        let context = build_context(&bundled_record());

        assert!(context.contains("- Lineup atual: Guigo (Top), Tatu (Jungle), Tutsz (Mid), Ayu (ADC), JoJo (Support)\n"));
        assert!(context.contains("- Competição atual: LTA Sul 2025\n"));
        assert!(context.contains("- Competição recente: Esports World Cup (Riade), Resultado: Eliminados pela NAVI\n"));
        assert!(context.contains("- Time Academy: Above, Desire, Loss, skz, swag, Coach: ryotzz\n"));
        assert!(context.contains("- 2020: ESL Pro League Season 12 North America\n"));
        assert!(context.contains("- KSCERATO: rating: 1.18, entry_kills_per_round: 0.14, kd_ratio: 1.3\n"));
    }

    #[test]
    fn test_context_is_stable() {
        let record = bundled_record();
        assert_eq!(build_context(&record), build_context(&record));
    }
}
