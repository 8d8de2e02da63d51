use parkspot_api::app::create_app;
use parkspot_api::config::{load_config, save_default_config};
use parkspot_api::constants::CONFIG_PATH;
use parkspot_api::logging::{init_logging, install_panic_hook};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--init-config") {
        match save_default_config(&CONFIG_PATH) {
            Ok(_) => {
                println!("Default configuration saved to {:?}", *CONFIG_PATH);
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Failed to save default configuration: {}", e);
                std::process::exit(1);
            }
        }
    }

    let config = Arc::new(load_config(&CONFIG_PATH));

    init_logging(config.server.debug);
    install_panic_hook();

    let app = create_app(Arc::clone(&config));

    let addr: SocketAddr = match format!("{}:{}", config.server.host, config.server.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid server address {}: {}", config.server.host, e);
            std::process::exit(1);
        }
    };
    info!(
        "Starting parkspot API on {} (max distance {} km, bounds mode {:?})",
        addr, config.search.max_distance_km, config.map.bounds_mode
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server failed");
}
