use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use digest_worker::clients::AwsClients;
use digest_worker::config::{WorkerConfig, DEFAULT_SCHEDULE_SECS};
use digest_worker::health;
use digest_worker::scheduler::DigestScheduler;
use digest_worker::types::Environment;

/// Drains the SNS digest queue and publishes passthrough notifications or digest links
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Run a single invocation and exit
    #[arg(long)]
    once: bool,

    /// Seconds between scheduled invocations
    #[arg(long, env = "DIGEST_SCHEDULE_SECS", default_value_t = DEFAULT_SCHEDULE_SECS)]
    schedule_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let env = Environment::from_env();

    // JSON logs for staging/production, plain text for development
    if env.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    info!("Starting Digest Worker in {:?} environment", env);

    let config = WorkerConfig::from_environment(&env, Duration::from_secs(args.schedule_secs))
        .context("Invalid digest worker configuration")?;
    info!(
        queue_url = %config.queue.queue_url,
        topic_arn = %config.topic_arn,
        bucket = %config.bucket_name,
        format = %config.format,
        "Loaded configuration"
    );

    let clients = AwsClients::from_environment(&env).await;
    let aggregator = Arc::new(clients.aggregator(&config));

    if args.once {
        let outcome = aggregator
            .run_once()
            .await
            .context("Digest invocation failed")?;
        info!(?outcome, "Digest invocation complete");
        return Ok(());
    }

    let shutdown_token = CancellationToken::new();

    let health_shutdown = shutdown_token.clone();
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_shutdown).await {
            error!("Health server error: {}", e);
        }
    });

    let signal_shutdown = shutdown_token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, initiating graceful shutdown...");
                signal_shutdown.cancel();
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    });

    DigestScheduler::new(aggregator, config.schedule_interval, shutdown_token)
        .start()
        .await;

    info!("✅ Digest Worker shutdown complete");
    Ok(())
}
