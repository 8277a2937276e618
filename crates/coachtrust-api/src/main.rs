use coachtrust_core::Settings;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let settings = Settings::from_env()?;

    // Initialize the application (storage, services, routes)
    let (_state, router) = coachtrust_api::setup::initialize_app(settings.clone()).await?;

    // Start the server
    coachtrust_api::setup::server::start_server(&settings, router).await?;

    Ok(())
}
