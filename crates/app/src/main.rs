//! Sales walk-through entry point.

use app::SalesContext;
use app::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    app::init_tracing(&config);

    // 2. Open the database and apply migrations
    tracing::info!(database_url = %config.database_url, "starting sales walk-through");
    let ctx = SalesContext::connect(&config).await?;

    // 3. Run the scenario and report
    let summary = app::walkthrough::run(&ctx).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    ctx.close().await;
    tracing::info!("done");
    Ok(())
}
