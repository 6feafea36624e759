use lunchly_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging) and configuration
    let config = setup_environment();

    print_banner();

    tracing::info!("Lunchly server starting...");

    // 2. Open the database and build state
    let state = ServerState::initialize(&config).await?;

    // 3. Serve HTTP until ctrl-c
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
