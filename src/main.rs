//! Quotation Listing Service
//!
//! This application serves the providers of a finalized quotation version,
//! each with the products quoted from it, as a JSON listing.

mod api;
mod conversion;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::repositories::open_repository;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // .env is optional
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level);

    print_startup_banner(&config);

    let repository = match open_repository(&config).await {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to load quotation data: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Using data source: {} ({} rows)",
        repository.source_name(),
        repository.row_count().await
    );

    let app_state = AppState {
        config: config.clone(),
        repository,
    };

    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 Quotation Listing Service v{}", env!("CARGO_PKG_VERSION"));
    println!("✅ Configuration loaded successfully");
    println!("   Data source: {:?}", config.data_source);
    println!("   Seed file: {}", config.seed_path.display());
    println!("   Server: {}:{}", config.host, config.port);
    println!("   Log level: {}", config.log_level);
    println!(
        "   Client API Key Validation: {}",
        if config.api_key.is_some() {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!();
}

/// Print help message
fn print_help() {
    println!("Quotation Listing Service v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: quotation-listing [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  CONFIG_PATH - Path to the TOML configuration (default: config.toml)");
    println!("  RUST_LOG    - Overrides server.log_level");
    println!();
    println!("Configuration file:");
    println!("  [server] host, port, log_level (default: 0.0.0.0, 8082, info)");
    println!("  [data]   source - json_file or memory (default: json_file)");
    println!("           seed_path (default: data/quotations.json)");
    println!("  [auth]   api_key - Expected client key; validation is off when unset");
    println!();
    println!("Endpoints:");
    println!("  GET  /quotations/{{quotation_id}}/versions/{{version_id}}/providers");
    println!("  POST /admin/reload");
    println!("  GET  /health");
}
