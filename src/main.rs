use std::sync::Arc;

use tokio::net::TcpListener;

use wordnet_similarity::models::config::ServerConfig;
use wordnet_similarity::oracle::OracleError;
use wordnet_similarity::processing::similarity::{SimilarityService, init_oracle};
use wordnet_similarity::routes::{AppState, build_router};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for the shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let wordnet_path = config.wordnet_path.clone();
    let oracle = match tokio::task::spawn_blocking(move || init_oracle(&wordnet_path)).await {
        Ok(oracle) => oracle,
        Err(e) => {
            log::error!("WordNet loader crashed: {e}");
            Err(OracleError::Unavailable(e.to_string()))
        }
    };

    let service = Arc::new(SimilarityService::new(
        oracle,
        config.oracle_access,
        config.request_timeout(),
    ));
    let app = build_router(AppState {
        service,
        fallback_on_error: config.fallback_on_error,
    });

    let listener = match TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Cannot bind to {}: {e}", config.bind_address);
            std::process::exit(1);
        }
    };
    log::info!("Listening on {}", config.bind_address);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("Server error: {e}");
    }

    log::info!("WordNet similarity service shutdown. Bye!");
}
