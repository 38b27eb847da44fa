use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_planner::cache::CacheConfig;
use transit_planner::config::ServerConfig;
use transit_planner::feed;
use transit_planner::planner::PlannerConfig;
use transit_planner::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transit_planner=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Fail fast: the server is useless without a timetable
    let feed = match feed::load_from_path(&config.timetable_path) {
        Ok(feed) => feed,
        Err(e) => {
            error!(path = %config.timetable_path.display(), error = %e, "failed to load timetable");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(
        feed.index,
        feed.service_date,
        PlannerConfig::default(),
        &CacheConfig::default(),
    );
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "transit planner listening");
    info!("  GET  /health        - Health check");
    info!("  GET  /stops         - List stops");
    info!("  POST /journey/plan  - Plan an arrive-by journey");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
