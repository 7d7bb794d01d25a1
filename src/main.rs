//! BlockSign API server.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use blocksign::adapters::ai::{GeminiConfig, GeminiProvider};
use blocksign::adapters::document::PulldownExportService;
use blocksign::adapters::http::{app_router, AppState, ContractAppState, PublishingAppState};
use blocksign::adapters::ledger::{AlgodClient, AlgodConfig};
use blocksign::adapters::storage::{InMemoryContentStorage, PinataConfig, PinataStorage};
use blocksign::application::ContractGenerator;
use blocksign::config::{AiConfig, AppConfig, ServerConfig, StorageConfig};
use blocksign::ports::{AIProvider, ContentStorage};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let generator = build_generator(&config.ai)?;
    let storage = build_storage(&config.storage)?;
    let ledger = AlgodClient::new(
        AlgodConfig::new(config.ledger.algod_url.clone())
            .with_token(config.ledger.token().unwrap_or_default())
            .with_token_header(config.ledger.token_header.clone()),
    )?;

    let state = AppState {
        contract: ContractAppState::new(generator, Arc::new(PulldownExportService::new())),
        publishing: PublishingAppState::new(
            storage,
            Arc::new(ledger),
            config.storage.max_upload_bytes,
        ),
    };

    let app = app_router(state, &config.server);
    let addr = config.server.socket_addr()?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        algod = %config.ledger.algod_url,
        "starting BlockSign API"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

fn build_generator(ai: &AiConfig) -> Result<ContractGenerator, BoxError> {
    let Some(api_key) = ai.api_key() else {
        tracing::warn!("no Gemini API key configured, contracts will be drafted from the offline template");
        return Ok(ContractGenerator::offline());
    };

    let mut gemini = GeminiConfig::new(api_key)
        .with_model(ai.model.clone())
        .with_base_url(ai.base_url.clone())
        .with_timeout(ai.timeout());
    if let Some(temperature) = ai.temperature {
        gemini = gemini.with_temperature(temperature);
    }
    if let Some(max) = ai.max_output_tokens {
        gemini = gemini.with_max_output_tokens(max);
    }

    let provider = GeminiProvider::new(gemini)?;
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "drafting with AI provider");
    Ok(ContractGenerator::with_provider(Arc::new(provider)))
}

fn build_storage(storage: &StorageConfig) -> Result<Arc<dyn ContentStorage>, BoxError> {
    match storage.jwt() {
        Some(jwt) => {
            let pinata = PinataStorage::new(
                PinataConfig::new(jwt).with_base_url(storage.pinata_base_url.clone()),
            )?;
            Ok(Arc::new(pinata))
        }
        None => {
            tracing::warn!("no Pinata JWT configured, documents are kept in memory");
            Ok(Arc::new(InMemoryContentStorage::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
