use storefront_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(config.log_level.as_deref(), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        "Storefront server starting..."
    );

    // 2. Initialize server state
    let state = storefront_server::ServerState::initialize(&config).await?;

    // 3. Start the HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
