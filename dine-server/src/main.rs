use dine_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("Dine Server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. State (database, migrations, services)
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server (starts background tasks)
    let server = Server::new(state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
