use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hotdog_or_not::api::{self, AppState};
use hotdog_or_not::classifier::OpenAiClassifier;
use hotdog_or_not::config::Config;
use hotdog_or_not::pipeline::AnalysisPipeline;
use hotdog_or_not::store::{FsBlobStore, SqliteRepository};

#[derive(Parser)]
#[command(name = "hotdog-or-not", about = "Is it a hot dog? Classification server")]
struct Cli {
    /// Bind address (overrides HOTDOG_LISTEN)
    #[arg(long)]
    listen: Option<String>,

    /// SQLite database file (overrides HOTDOG_DATABASE)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Directory for uploaded images (overrides HOTDOG_STORAGE_DIR)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Public base URL (overrides HOTDOG_PUBLIC_URL)
    #[arg(long)]
    public_url: Option<String>,

    /// Vision model (overrides HOTDOG_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hotdog_or_not=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();

    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    if let Some(storage_dir) = cli.storage_dir {
        config.storage_dir = storage_dir;
    }
    if let Some(public_url) = cli.public_url {
        config.public_base_url = public_url;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    let api_key = config.get_api_key()?;

    std::fs::create_dir_all(&config.storage_dir)
        .with_context(|| format!("creating storage dir {}", config.storage_dir.display()))?;

    let repository = Arc::new(
        SqliteRepository::open(&config.database_path)
            .with_context(|| format!("opening database {}", config.database_path.display()))?,
    );
    let blobs = Arc::new(FsBlobStore::new(
        config.storage_dir.clone(),
        config.images_base_url(),
    ));
    let classifier = Arc::new(OpenAiClassifier::new(
        api_key,
        config.model.clone(),
        config.ai_timeout(),
    )?);

    let pipeline = Arc::new(AnalysisPipeline::new(classifier, repository, blobs));
    let app = api::router(AppState { pipeline }, Some(config.storage_dir.clone()));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, model = %config.model, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
