use anyhow::Result;
use sortvis::generator;
use sortvis::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // 2. Load the configuration (an explicit path may be given as the first argument).
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = SortvisConfig::load(config_path.as_deref())?;
    info!(?config, "Configuration loaded.");

    // 3. Create the controller and generate the input.
    let controller: RunController = RunController::new();
    let sequence = generator::generate(config.element_count, config.min_value, config.max_value)?;
    info!(?sequence, "Generated input.");

    // 4. Spawn a listener for the lifecycle event stream.
    spawn_event_listener(&controller);

    // 5. Run every algorithm to completion, speeding each one up halfway through.
    for algorithm in AlgorithmId::ALL {
        run_to_completion(&controller, &config, sequence.clone(), algorithm).await?;
    }

    // 6. Start one more run and abandon it after a few steps.
    demonstrate_cancellation(&controller, &config, sequence).await?;

    Ok(())
}

/// Logs every lifecycle event the controller broadcasts.
fn spawn_event_listener(controller: &RunController) {
    let mut run_rx = controller.subscribe_run_events();
    tokio::spawn(async move {
        while let Ok(event) = run_rx.recv().await {
            info!("[RUN] => {:?}", event);
        }
    });
}

async fn run_to_completion(
    controller: &RunController,
    config: &SortvisConfig,
    sequence: Vec<i64>,
    algorithm: AlgorithmId,
) -> Result<()> {
    let counter = Arc::new(AtomicU64::new(0));
    let seen = counter.clone();
    let handle = controller
        .start(sequence, algorithm, config.pace()?, move |step| {
            seen.fetch_add(1, Ordering::Relaxed);
            info!(
                "[{}] {:>9} {:?} {:?}",
                algorithm, step.kind, step.highlighted, step.snapshot
            );
        })
        .await?;

    tokio::time::sleep(config.pace()?.as_duration() * 5).await;
    if controller
        .set_pace(&handle, config.pace_for_speed(config.speed * 4.0)?)
        .is_ok()
    {
        info!("[{}] Sped up to {}x.", algorithm, config.speed * 4.0);
    }

    let outcome = handle.wait().await?;
    info!(
        "[{}] {:?} after {} steps ({} events): {:?}",
        algorithm,
        outcome.status,
        outcome.steps,
        counter.load(Ordering::Relaxed),
        outcome.sequence
    );
    Ok(())
}

async fn demonstrate_cancellation(
    controller: &RunController,
    config: &SortvisConfig,
    sequence: Vec<i64>,
) -> Result<()> {
    let pace = config.pace()?;
    let handle = controller
        .start(sequence, AlgorithmId::Merge, pace, |step| {
            info!("[cancel demo] {:>9} {:?}", step.kind, step.highlighted);
        })
        .await?;

    tokio::time::sleep(pace.as_duration() * 3 + Duration::from_millis(1)).await;
    controller.cancel(&handle);
    let outcome = handle.wait().await?;
    info!(
        "[cancel demo] {:?} after {} steps, left as {:?}",
        outcome.status, outcome.steps, outcome.sequence
    );
    Ok(())
}
