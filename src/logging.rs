use std::path::PathBuf;

use color_eyre::eyre::Result;
use lazy_static::lazy_static;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::get_app_config_path;

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

pub fn get_log_dir() -> PathBuf {
    if let Some(p) = dirs_next::data_dir() {
        p.join(env!("CARGO_CRATE_NAME"))
    } else if let Ok(p) = get_app_config_path() {
        p
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Installs a file-backed subscriber.  Only called when diagnostics are
/// enabled, so a plain run never touches the filesystem for logs.
pub fn initialize_logging(log_to: &Option<PathBuf>) -> Result<()> {
    let log_path = match log_to {
        Some(p) => p.clone(),
        None => {
            let directory = get_log_dir();
            std::fs::create_dir_all(directory.clone())?;
            directory.join(LOG_FILE.clone())
        }
    };

    let log_file = std::fs::File::create(log_path)?;
    std::env::set_var(
        "RUST_LOG",
        std::env::var("RUST_LOG")
            .or_else(|_| std::env::var(LOG_ENV.clone()))
            .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME"))),
    );
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .with(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    info!("logging initialised");
    Ok(())
}
