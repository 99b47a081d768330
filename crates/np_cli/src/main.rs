use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use np_core::{Config, Error, Result, StoreAdmin};
use np_inference::GeminiClient;
use np_news::NewsApiClient;
use np_pipeline::Pipeline;
use np_storage::MongoStore;
use np_web::{create_app, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000", env = "NEWSPULSE_ADDR")]
        addr: SocketAddr,
    },
    /// Fetch, generate and persist a fresh batch of articles
    Pipeline,
    /// Create the collections with their validation rules and indexes
    Setup,
    /// Print article counts and the most recently saved articles
    Status,
}

struct Services {
    store: Arc<MongoStore>,
    news: Arc<NewsApiClient>,
    model: Arc<GeminiClient>,
}

async fn connect(config: &Config) -> Result<Services> {
    let store = Arc::new(MongoStore::connect(&config.mongodb_uri, &config.database).await?);
    let news = Arc::new(NewsApiClient::new(&config.news_api_key)?);
    let model = Arc::new(GeminiClient::new(&config.google_api_key));
    Ok(Services { store, news, model })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let services = connect(&config).await?;

    match cli.command {
        Commands::Serve { addr } => {
            let state = AppState {
                articles: services.store.clone(),
                chats: services.store.clone(),
                admin: services.store.clone(),
                model: services.model,
                news: services.news,
            };
            let app = create_app(state);
            let listener = TcpListener::bind(addr).await?;
            info!("📰 listening on {}", listener.local_addr()?);
            axum::serve(listener, app).await?;
        }
        Commands::Pipeline => {
            let pipeline = Pipeline::new(services.news, services.model, services.store);
            let report = pipeline.execute().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.success {
                return Err(Error::News(report.errors.join("; ")));
            }
        }
        Commands::Setup => {
            services.store.setup().await?;
            info!("🏦 collections created with validation rules and indexes");
        }
        Commands::Status => {
            let pipeline = Pipeline::new(services.news, services.model, services.store);
            let status = pipeline.status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}
