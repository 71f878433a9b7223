//! Knowledge Store - canned answers keyed by topic.
//!
//! Built once at startup and shared read-only. The `default` and `unknown`
//! entries are mandatory: they are the terminal fallback of the composer.

use std::collections::HashMap;

use super::topic::Topic;
use crate::error::AppError;

/// Topic of the generic "what can I do for you" answer.
pub const DEFAULT_TOPIC: &str = "default";
/// Topic of the "I don't have that information" answer.
pub const UNKNOWN_TOPIC: &str = "unknown";

const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    // CS2 / Counter Strike
    ("cs2_lineup", "Nosso time de CS2 é composto por KSCERATO, yuurih, FalleN, chelo e skullz. Eles são considerados um dos melhores times do Brasil e competem nos maiores torneios internacionais."),
    ("cs2_coach", "A comissão técnica de CS2 é liderada por sidde como head coach, com Lucid como assistente técnico e innersh1ne como analista."),
    ("cs2_achievements", "Entre as conquistas no CS2/CSGO estão: ESL Pro League Season 12 North America (2020), IEM Fall North America (2021) e CBCS Elite League Season 2 (2022). Também fomos finalistas da IEM Dallas 2022."),
    ("cs2_competitions", "Nossa equipe de CS2 compete em torneios como ESL Pro League, BLAST Premier, IEM e campeonatos regionais como a CBCS."),
    ("cs2_player_kscerato", "KSCERATO é um dos principais jogadores da FURIA, com rating médio de 1.18, 0.14 entry kills por round e K/D ratio de 1.3. Ele renovou contrato por 3 anos."),
    ("cs2_player_fallen", "FalleN é um veterano lendário do CS brasileiro que se juntou à FURIA. Ele mantém um rating de 1.02, com 0.08 entry kills por round e K/D ratio de 1.05."),
    ("cs2_player_yuurih", "yuurih é um dos pilares da FURIA CS2, conhecido por sua consistência. Ele recentemente renovou seu contrato por 3 anos com a organização."),
    ("cs2_recent", "Recentemente nossa equipe de CS2 participou da Esports World Cup em Riade, onde fomos eliminados pela NAVI."),
    ("cs2_changes", "A mudança mais recente no nosso time de CS2 foi a saída de arT (que foi para o Fluxo) e a entrada de skullz na equipe."),
    // League of Legends
    ("lol_lineup", "Nosso time de League of Legends que compete no CBLOL é formado por Guigo (Top), Tatu (Jungle), Tutsz (Mid), Ayu (ADC) e JoJo (Support)."),
    ("lol_coach", "A comissão técnica de League of Legends é liderada por Thinkcard como head coach, com furyz como assistente técnico e Maestro como gerente geral."),
    ("lol_achievements", "No League of Legends, conquistamos o CBLOL Academy 1° Split 2022 e o CBLOL Academy 2° Split 2023. Além disso, chegamos ao Top 4 no CBLOL 2023."),
    ("lol_competitions", "Nossa equipe de LoL compete principalmente no CBLOL (Campeonato Brasileiro de League of Legends) e no CBLOL Academy."),
    ("lol_recent", "Nossa equipe está se preparando para a LTA Sul 2025, com o sorteio marcado para 18 de janeiro de 2025 e início em 25 de janeiro de 2025."),
    ("lol_player_ayu", "Ayu é nosso atirador (ADC), com bom posicionamento e mecânica apurada. Ele mantém um KDA de 5.1, participação em kills de 72% e 540 de dano por minuto."),
    ("lol_player_tutsz", "Tutsz é nosso mid laner versátil com experiência no CBLOL. Ele tem um KDA de 4.3, participação em kills de 68% e 490 de dano por minuto."),
    ("lol_changes", "Em 2025, retornamos à comunicação em português e formamos uma equipe que combina experiência e novos talentos."),
    ("lol_previous", "Na temporada anterior (CBLOL 2024), nosso time era composto por Zzk (Top), Wiz (Jungle), Tutsz (Mid), Ayu (ADC) e JoJo (Support), com Westonway como técnico."),
    // Valorant
    ("valorant_lineup", "A equipe principal de Valorant da FURIA é composta por khalil, havoc, heat, raafa e pryze."),
    ("valorant_coach", "O head coach da nossa equipe de Valorant é peu, que lidera a comissão técnica."),
    ("valorant_academy", "Temos também um time academy de Valorant formado por Above, Desire, Loss, skz e swag, com ryotzz como treinador."),
    ("valorant_achievements", "No Valorant, fomos campeões do VCT Challengers Brazil em 2021 e finalistas do VCT Brazil Playoffs em 2022. Também alcançamos o Top 8 no VCT Americas 2023."),
    ("valorant_competitions", "Nossa equipe de Valorant compete no VCT Americas e no Challengers BR."),
    ("valorant_player_heat", "heat é um dos nossos principais jogadores de Valorant, com ACS de 240, KDA de 1.25 e 27% de headshot."),
    ("valorant_player_raafa", "raafa traz experiência e liderança ao time de Valorant, com ACS de 210, KDA de 1.30 e 25% de headshot."),
    ("valorant_changes", "Atualmente mwzera está afastado temporariamente por questões de saúde, enquanto heat e raafa trazem experiência e liderança ao time."),
    // Organization
    ("furia_history", "A FURIA Esports é uma organização brasileira de esportes eletrônicos fundada em 2017. Nos destacamos em modalidades como CS2, League of Legends e Valorant."),
    ("furia_branding", "Nossa identidade visual é caracterizada pelo preto como cor primária e branco como secundária, com a pantera como símbolo e um estilo agressivo e moderno."),
    ("furia_other", "A FURIA já teve times em outras modalidades como Rocket League (último evento: RLCS South America 2022) e Rainbow Six Siege (último evento: Brasileirão R6 2022), que atualmente estão inativos."),
    // Conversation
    (DEFAULT_TOPIC, "Sou o chatbot oficial da FURIA Esports. Posso fornecer informações sobre nossos times de League of Legends, Counter Strike 2 e Valorant. Como posso ajudar você hoje?"),
    (UNKNOWN_TOPIC, "Não tenho essa informação específica no momento. Posso ajudar com detalhes sobre nossos times atuais de CS2, League of Legends e Valorant, ou sobre a história da FURIA. O que você gostaria de saber?"),
    ("greeting", "E aí! Tudo bem? Sou o bot oficial da FURIA Esports, pronto pra te ajudar com informações sobre nossos times e jogadores. O que você quer saber sobre a pantera? 🐾🖤"),
    ("thanks", "Por nada! Sempre à disposição para falar sobre a FURIA. Se tiver mais perguntas, é só chamar! #GoPantera 🖤"),
    ("goodbye", "Valeu pela conversa! Se precisar de mais informações sobre a FURIA, é só voltar. #SomosFURIA 🐾"),
];

/// Immutable topic → answer mapping.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    entries: HashMap<Topic, String>,
    default_entry: String,
    unknown_entry: String,
}

impl KnowledgeStore {
    /// The organization's built-in knowledge base.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_entries(BUILTIN_ENTRIES.iter().copied())
    }

    /// Builds a store from `(topic, answer)` pairs.
    ///
    /// Fails when a topic repeats, when `default` / `unknown` is missing, or
    /// when `default` is blank.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut map = HashMap::new();
        for (topic, text) in entries {
            if map.insert(Topic::from(topic), text.to_string()).is_some() {
                return Err(AppError::Config(format!(
                    "Duplicate knowledge entry for topic '{}'",
                    topic
                )));
            }
        }

        let required = |topic: &str| {
            map.get(topic).cloned().ok_or_else(|| {
                AppError::Config(format!("Knowledge store is missing the '{}' entry", topic))
            })
        };
        let default_entry = required(DEFAULT_TOPIC)?;
        let unknown_entry = required(UNKNOWN_TOPIC)?;
        if default_entry.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Knowledge entry '{}' must not be blank",
                DEFAULT_TOPIC
            )));
        }

        Ok(Self {
            entries: map,
            default_entry,
            unknown_entry,
        })
    }

    /// Returns the entry for `topic`, if any.
    pub fn get(&self, topic: &str) -> Option<&str> {
        self.entries.get(topic).map(String::as_str)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.entries.contains_key(topic)
    }

    /// Terminal fallback answer. Always present.
    pub fn default_entry(&self) -> &str {
        &self.default_entry
    }

    pub fn unknown_entry(&self) -> &str {
        &self.unknown_entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
