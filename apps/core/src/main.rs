// FURIA Esports chatbot backend entry point
// Generative answers with a deterministic fallback brain

mod brain;
mod config;
mod error;
mod fs_manager;
mod llm;
mod models;
mod preflight;
mod record;
mod server;
mod service;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use tracing::{info, warn};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use brain::{BrainAnalyzer, KnowledgeStore, RuleTable};
use config::{AppConfig, LogFormat};
use llm::{ChatModel, OpenAiChatModel};
use record::OrgRecord;
use server::AppState;
use service::QueryService;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                env!("CARGO_PKG_NAME").to_string(),
                std::io::stdout,
            ))
            .init(),
    }
}

/// Builds the chat model when a credential is configured.
fn chat_model(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn ChatModel>>> {
    let Some(api_key) = &config.openai_api_key else {
        return Ok(None);
    };

    let model = OpenAiChatModel::new(
        &config.openai_api_base,
        api_key.clone(),
        config.openai_model.clone(),
        config.openai_temperature,
        config.llm_timeout(),
    )?;
    Ok(Some(Arc::new(model)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting FURIA chatbot");

    let rules = Arc::new(RuleTable::builtin()?);
    let knowledge = Arc::new(KnowledgeStore::builtin()?);
    let record = OrgRecord::load_or_empty(&config.data_path);

    let report = preflight::run_preflight_checks(&config, &record, &rules, &knowledge);
    if !report.generative_ready {
        warn!("{}", report.summary);
    }

    let service = QueryService::new(
        BrainAnalyzer::new(rules, knowledge),
        chat_model(&config)?,
        &record,
        config.llm_timeout(),
    );

    let state = AppState {
        service: Arc::new(service),
    };

    info!(
        generative = state.service.generative_enabled(),
        "Query service ready"
    );
    server::serve(&config, state).await?;
    Ok(())
}
