//! Preflight Check System
//!
//! Verifies the data, credential and tables before the server starts.
//! A failed check only degrades service: the fallback brain always answers.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::brain::{KnowledgeStore, RuleTable, DEFAULT_TOPIC, UNKNOWN_TOPIC};
use crate::config::AppConfig;
use crate::record::OrgRecord;

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }

    fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub generative_ready: bool,
    pub summary: String,
}

#[cfg(test)]
impl PreflightReport {
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Performs all preflight checks and returns a report
pub fn run_preflight_checks(
    config: &AppConfig,
    record: &OrgRecord,
    rules: &RuleTable,
    knowledge: &KnowledgeStore,
) -> PreflightReport {
    info!("╔══════════════════════════════════════════════════════╗");
    info!("║  🔍 RUNNING PREFLIGHT CHECKS                         ║");
    info!("╚══════════════════════════════════════════════════════╝");

    let checks = vec![
        check_record(config, record),
        check_credential(config),
        check_knowledge(knowledge),
        check_rule_coverage(rules, knowledge),
    ];

    let all_passed = checks.iter().all(|c| c.passed);
    let generative_ready = config.has_credential() && !record.is_empty();

    let summary = if all_passed {
        "All checks passed. Generative answers enabled.".to_string()
    } else if generative_ready {
        "Some checks failed. Generative answers enabled with warnings.".to_string()
    } else {
        "Generative path unavailable. Serving fallback answers only.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!("  ✅ {}: {}", check.name, check.message);
        } else {
            warn!("  ❌ {}: {}", check.name, check.message);
        }
        if let Some(details) = &check.details {
            info!("      Details: {}", details);
        }
    }

    info!("Summary: {}", summary);

    PreflightReport {
        all_passed,
        checks,
        generative_ready,
        summary,
    }
}

// --- Individual Checks ---

fn check_record(config: &AppConfig, record: &OrgRecord) -> CheckResult {
    if record.is_empty() {
        return CheckResult::fail(
            "data_file",
            "Organization record missing or empty",
            Some(format!("Expected at: {:?}", config.data_path)),
        );
    }

    let sections: Vec<&str> = record.sections().map(|(k, _)| k).collect();
    CheckResult::pass(
        "data_file",
        &format!("Organization record OK ({} sections)", sections.len()),
    )
    .with_details(sections.join(", "))
}

fn check_credential(config: &AppConfig) -> CheckResult {
    if config.has_credential() {
        CheckResult::pass(
            "credential",
            &format!("API key configured (model {})", config.openai_model),
        )
    } else {
        CheckResult::fail(
            "credential",
            "OPENAI_API_KEY not set",
            Some("Only fallback answers will be served".to_string()),
        )
    }
}

fn check_knowledge(knowledge: &KnowledgeStore) -> CheckResult {
    let required_present = [DEFAULT_TOPIC, UNKNOWN_TOPIC]
        .iter()
        .all(|topic| knowledge.contains(topic));

    let required_filled = !knowledge.default_entry().trim().is_empty()
        && !knowledge.unknown_entry().trim().is_empty();

    if required_present && required_filled {
        CheckResult::pass(
            "knowledge_base",
            &format!("Knowledge base OK ({} entries)", knowledge.len()),
        )
    } else {
        CheckResult::fail(
            "knowledge_base",
            "Required entries missing",
            Some(format!("Required: {}, {}", DEFAULT_TOPIC, UNKNOWN_TOPIC)),
        )
    }
}

/// Informational: topics that can match but have nothing to say.
fn check_rule_coverage(rules: &RuleTable, knowledge: &KnowledgeStore) -> CheckResult {
    let uncovered: Vec<&str> = rules
        .topics()
        .map(|t| t.as_str())
        .filter(|t| !knowledge.contains(t))
        .collect();

    let result = CheckResult::pass(
        "rule_coverage",
        &format!(
            "{} rule topics, {} without knowledge entries",
            rules.len(),
            uncovered.len()
        ),
    );

    if uncovered.is_empty() {
        result
    } else {
        result.with_details(uncovered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(with_key: bool) -> AppConfig {
        AppConfig::from_lookup(|k| (with_key && k == "OPENAI_API_KEY").then(|| "sk-test".to_string())).unwrap()
    }

    fn tables() -> (RuleTable, KnowledgeStore) {
        (RuleTable::builtin().unwrap(), KnowledgeStore::builtin().unwrap())
    }

    #[test]
    fn test_all_passed_with_record_and_key() {
        let (rules, knowledge) = tables();
        let record = OrgRecord::parse(r#"{"info": {}}"#).unwrap();
        let report = run_preflight_checks(&config(true), &record, &rules, &knowledge);

        assert!(report.all_passed);
        assert!(report.generative_ready);
        assert_eq!(report.checks.len(), 4);
    }

    #[test]
    fn test_missing_key_and_record_still_reports() {
        let (rules, knowledge) = tables();
        let report = run_preflight_checks(&config(false), &OrgRecord::empty(), &rules, &knowledge);

        assert!(!report.all_passed);
        assert!(!report.generative_ready);
        assert!(!report.check("data_file").unwrap().passed);
        assert!(!report.check("credential").unwrap().passed);
        assert!(report.check("knowledge_base").unwrap().passed);
    }

    #[test]
    fn test_rule_coverage_lists_uncovered_topics() {
        let knowledge = KnowledgeStore::builtin().unwrap();
        let rules = RuleTable::new([("no_entry_topic", vec!["xyz"]), ("greeting", vec!["oi"])]).unwrap();
        let report = run_preflight_checks(&config(false), &OrgRecord::empty(), &rules, &knowledge);

        let coverage = report.check("rule_coverage").unwrap();
        assert!(coverage.passed);
        assert_eq!(coverage.details.as_deref(), Some("no_entry_topic"));
    }
}
