use anyhow::Result;
use fare_estimator::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over server.logs.level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    // Reject typos before the subscriber swallows them
    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // JSON lines, one object per event
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        "Starting fare estimator server with log level: {}",
        log_level
    );
    info!(
        "Model source: {:?}, layout: {:?}, fare band: [{}, {}] km/l",
        config.model.source,
        config.model.layout,
        config.fare.mileage_floor,
        config.fare.mileage_ceiling
    );
    match &config.specs_lookup {
        Some(lookup) => info!("Car specs lookup at {}", lookup.url),
        None => info!("Car specs lookup disabled; pool fares need explicit prices"),
    }

    // Blocks until the listener shuts down
    server::run(config).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_validation() {
        for level in ["error", "warn", "info", "debug", "trace", "off"] {
            assert!(validate_log_level(level).is_ok(), "{level} should be accepted");
        }
        let err = validate_log_level("verbose").unwrap_err();
        assert!(err.to_string().contains("Invalid log level: 'verbose'"));
    }
}
