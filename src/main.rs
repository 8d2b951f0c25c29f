use ordering_system::config::configuration;
use ordering_system::db::{establish_connection, run_migrations};
use ordering_system::seed::seed_database;
use ordering_system::startup::Application;
use ordering_system::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("ordering-system".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = configuration::Settings::new().expect("Failed to load configurations");
    let database_url = config.database.url();

    if let Err(err) = run_migrations(&database_url) {
        tracing::error!("Failed to connect to database: {}", err);
        std::process::exit(1);
    }

    let pool = establish_connection(&database_url);
    if let Err(err) = seed_database(&pool).await {
        tracing::error!("Failed to seed database: {}", err);
        std::process::exit(1);
    }

    let port = 8080;
    tracing::info!("Starting server on :{}...", port);
    let application = Application::build(port, pool).await?;
    application.run_until_stopped().await?;
    Ok(())
}
