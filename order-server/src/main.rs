use order_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    order_server::init_logger_with_file(None, config.log_dir.as_deref());

    tracing::info!("Order server starting...");

    // 2. Initialize server state (database, repositories, service facade)
    let state = ServerState::initialize(&config).await;

    // 3. Run HTTP server (blocks until shutdown signal)
    let server = Server::with_state(config, state);
    server.run().await
}
