//! Context Builder - flattens the organization record into prose.
//!
//! The output grounds the generative collaborator and is never parsed back.
//! Sections follow a fixed order; each one is skipped when its key is absent
//! and missing sub-fields render as empty text.

use serde_json::{Map, Value};

use crate::record::OrgRecord;

/// First line of every context, present even for an empty record.
pub const CONTEXT_HEADER: &str = "Informações sobre a FURIA Esports:\n\n";

const HISTORICAL_TITLES_KEY: &str = "historical_titles";
const STATISTICS_KEY: &str = "statistics";

/// Serializes `record` into the grounding context string. Never fails.
pub fn build_context(record: &OrgRecord) -> String {
    let mut context = String::from(CONTEXT_HEADER);

    if let Some(info) = record.get("info") {
        push_overview(&mut context, info);
    }
    if let Some(teams) = record.get("times").and_then(Value::as_object) {
        push_rosters(&mut context, teams);
    }
    if let Some(competitions) = record.get("competicoes").and_then(Value::as_array) {
        push_competitions(&mut context, competitions);
    }
    for (key, value) in record.sections() {
        if let (Some(year), Some(versioned)) = (version_year(key), value.as_object()) {
            push_versioned(&mut context, year, versioned);
        }
    }

    context
}

fn push_overview(context: &mut String, info: &Value) {
    context.push_str(&format!("Sobre: {}\n", text(info.get("sobre"))));
    context.push_str(&format!("Fundada em: {}\n", text(info.get("fundada"))));
}

fn push_rosters(context: &mut String, teams: &Map<String, Value>) {
    context.push_str("\nTimes:\n");
    for (game, team) in teams {
        context.push_str(&format!("\n{}:\n", game));
        context.push_str(&format!("- Lineup: {}\n", text_list(team.get("lineup")).join(", ")));
        context.push_str(&format!(
            "- Campeonatos: {}\n",
            text_list(team.get("campeonatos")).join(", ")
        ));
        if let Some(achievements) = team.get("conquistas") {
            context.push_str("- Conquistas:\n");
            for achievement in text_list(Some(achievements)) {
                context.push_str(&format!("  * {}\n", achievement));
            }
        }
    }
}

fn push_competitions(context: &mut String, competitions: &[Value]) {
    context.push_str("\nPrincipais Competições:\n");
    for competition in competitions {
        context.push_str(&format!(
            "- {}: {}\n",
            text(competition.get("nome")),
            text(competition.get("resultado"))
        ));
    }
}

fn push_versioned(context: &mut String, year: &str, versioned: &Map<String, Value>) {
    for (discipline, data) in versioned {
        if discipline == HISTORICAL_TITLES_KEY || discipline == STATISTICS_KEY {
            continue;
        }
        if let Some(data) = data.as_object() {
            push_discipline(context, discipline, year, data);
        }
    }

    if let Some(titles) = versioned.get(HISTORICAL_TITLES_KEY).and_then(Value::as_object) {
        push_historical_titles(context, titles);
    }
    if let Some(stats) = versioned.get(STATISTICS_KEY).and_then(Value::as_object) {
        push_statistics(context, stats);
    }
}

fn push_discipline(context: &mut String, discipline: &str, year: &str, data: &Map<String, Value>) {
    context.push_str(&format!("\n{} ({}):\n", humanize(discipline), year));

    if let Some(lineup) = data.get("lineup") {
        let players = match lineup {
            Value::Object(roles) => roles
                .iter()
                .map(|(role, player)| format!("{} ({})", text(Some(player)), role_label(role)))
                .collect(),
            other => text_list(Some(other)),
        };
        context.push_str(&format!("- Lineup atual: {}\n", players.join(", ")));
    }

    if let Some(staff) = data.get("coaching_staff") {
        let members: Vec<String> = staff
            .as_object()
            .map(|staff| {
                staff
                    .iter()
                    .map(|(role, who)| format!("{} ({})", names(who), role_label(role)))
                    .collect()
            })
            .unwrap_or_default();
        context.push_str(&format!("- Comissão Técnica: {}\n", members.join(", ")));
    }

    if let Some(competition) = data.get("latest_competition") {
        let name = text(competition.get("name"));
        match competition.get("result") {
            Some(result) => context.push_str(&format!(
                "- Competição recente: {}, Resultado: {}\n",
                name,
                text(Some(result))
            )),
            None => context.push_str(&format!("- Competição atual: {}\n", name)),
        }
    }

    if let Some(academy) = data.get("academy_team") {
        context.push_str(&format!(
            "- Time Academy: {}, Coach: {}\n",
            text_list(academy.get("players")).join(", "),
            text(academy.get("coach"))
        ));
    }

    if let Some(notes) = data.get("notes") {
        context.push_str(&format!("- Notas: {}\n", text_list(Some(notes)).join("; ")));
    }
}

fn push_historical_titles(context: &mut String, titles: &Map<String, Value>) {
    context.push_str("\nConquistas Históricas:\n");
    for (game, achievements) in titles {
        context.push_str(&format!("\n{}:\n", humanize(game)));
        for achievement in achievements.as_array().into_iter().flatten() {
            context.push_str(&format!(
                "- {}: {}\n",
                text(achievement.get("year")),
                text(achievement.get("title"))
            ));
        }
    }
}

fn push_statistics(context: &mut String, stats: &Map<String, Value>) {
    context.push_str("\nEstatísticas de Jogadores:\n");
    for (game, players) in stats {
        context.push_str(&format!("\n{}:\n", humanize(game)));
        for (player, player_stats) in players.as_object().into_iter().flatten() {
            let line: Vec<String> = player_stats
                .as_object()
                .into_iter()
                .flatten()
                .map(|(stat, value)| format!("{}: {}", stat, text(Some(value))))
                .collect();
            context.push_str(&format!("- {}: {}\n", player, line.join(", ")));
        }
    }
}

/// `FURIA_Esports_2025` -> `Some("2025")`.
fn version_year(key: &str) -> Option<&str> {
    let (_, year) = key.rsplit_once('_')?;
    (year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())).then_some(year)
}

/// Scalar as display text; anything else is empty.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Scalar items of an array; anything else is an empty list.
fn text_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| text(Some(item)))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// A single name or a list of names.
fn names(value: &Value) -> String {
    match value {
        Value::Array(_) => text_list(Some(value)).join(", "),
        other => text(Some(other)),
    }
}

fn humanize(key: &str) -> String {
    key.replace('_', " ")
}

/// `head_coach` -> `Head Coach`, `adc` -> `ADC`.
fn role_label(key: &str) -> String {
    if key.eq_ignore_ascii_case("adc") {
        return "ADC".to_string();
    }
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
