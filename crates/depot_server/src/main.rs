use anyhow::Result;
use clap::Parser;
use depot_database::{PostgresStore, establish_pool, run_migrations};
use depot_models::{OpenAiClient, OpenAiConfig};
use depot_server::{DepotConfig, ObservabilityConfig, build_state, init_observability, router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Depot supply-chain decision API", long_about = None)]
struct Args {
    /// Configuration file (replaces ./depot.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, e.g. 127.0.0.1:3000
    #[arg(short, long)]
    bind: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut config = DepotConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config = config.clone().with_server(config.server().clone().with_bind_addr(bind));
    }
    if args.verbose {
        config = config.clone().with_logging(config.logging().clone().verbose());
    }

    let _guard = init_observability(&ObservabilityConfig::from(config.logging()))
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    let pool = establish_pool(&config.database().resolved_url(), *config.database().pool_size())?;
    if *config.database().run_migrations() {
        run_migrations(&pool)?;
        info!("Database migrations applied");
    }
    let store = Arc::new(PostgresStore::new(pool));

    let llm = config.llm();
    let mut client_config =
        OpenAiConfig::new(llm.base_url().clone(), llm.model().clone()).with_timeout(llm.timeout());
    match llm.api_key() {
        Some(key) => client_config = client_config.with_api_key(key),
        None => warn!(
            env = %llm.api_key_env(),
            "No API key configured; model-backed routes will fail"
        ),
    }
    let client = Arc::new(OpenAiClient::new(client_config));

    let state = build_state(config.engine(), llm.chat_prompt(), client, store);
    let app = router(state, config.server().request_timeout());

    let listener = tokio::net::TcpListener::bind(config.server().bind_addr()).await?;
    info!(
        addr = %listener.local_addr()?,
        model = %llm.model(),
        "depot-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("depot-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
