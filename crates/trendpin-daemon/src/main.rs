use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trendpin_bundle::BundleClient;
use trendpin_gen::ModelClient;
use trendpin_publish::{Dispatch, Dispatcher, Scheduler, SystemClock};

#[derive(Debug, Parser)]
#[command(name = "trendpin")]
#[command(about = "Scheduled Pinterest posting of trending Amazon products")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the daily scheduling loop forever (default).
    Run,
    /// Generate and schedule a single post immediately, then exit.
    ///
    /// Useful for smoke-testing credentials without waiting for a trigger.
    Once,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = trendpin_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        teams = config.team_ids.len(),
        timezone = %config.timezone,
        model = %config.model,
        "trendpin starting"
    );

    let model = ModelClient::with_base_url(
        &config.openai_api_key,
        &config.model,
        &config.openai_base_url,
    );
    let bundle = BundleClient::with_base_url(&config.bundle_api_key, &config.bundle_base_url);
    let image_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.image_timeout_secs))
        .build()?;
    let dispatcher = Dispatcher::new(&config, &model, &bundle, image_client);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let scheduler = Scheduler::new(&dispatcher, SystemClock::new(config.timezone));
            // Diverges; only a dispatch failure brings us here.
            scheduler.run().await?;
        }
        Commands::Once => {
            let now = chrono::Utc::now().with_timezone(&config.timezone);
            dispatcher.dispatch(now).await?;
            tracing::info!("single dispatch complete");
        }
    }

    Ok(())
}
