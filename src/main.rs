//! Sensor Network Server - Entry Point
//!
//! A UDP presence-and-event relay: sensor clients register, keep themselves
//! alive, and have their events relayed to every other live client.

use log::{error, info};
use std::process;

use sensornet_server::error::handle_error;
use sensornet_server::{Server, ServerConfig, ServerError};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching sensor network server...");

    if let Err(e) = run().await {
        handle_error(&e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::load()?;
    let mut server = Server::bind(&config).await?;
    server.run(shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
