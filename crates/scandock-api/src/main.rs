use scandock_api::setup;
use scandock_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize telemetry, clients, the auto-scan supervisor and routes
    let (_state, router, supervisor) = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, router, supervisor).await?;

    Ok(())
}
