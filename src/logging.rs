use std::fs::{create_dir_all, File};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use crate::error::{ErrorContext, LoadTestError, LoadTestResult};

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("pr-reviewers-loadtest")
        .join("logs")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` with `verbose`.
/// With `to_file` the output goes to a timestamped file under the cache dir
/// instead of stderr.
pub fn init_logging(verbose: bool, to_file: bool) -> LoadTestResult<Option<PathBuf>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let log_path = if to_file {
        let log_dir = default_log_dir();
        create_dir_all(&log_dir).context("Failed to create log directory")?;
        let log_path = log_dir.join(format!("loadtest-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
        let file = File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| LoadTestError::Unknown(format!("Failed to install logger: {}", e)))?;
        Some(log_path)
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| LoadTestError::Unknown(format!("Failed to install logger: {}", e)))?;
        None
    };

    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = log_path.clone();
    }
    if let Some(path) = &log_path {
        tracing::info!("Logging initialized to: {}", path.display());
    }

    Ok(log_path)
}

/// Route panics through tracing so they end up in the log file too.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic_info(info);
        default_hook(info);
    }));
}

pub fn log_panic_info(info: &std::panic::PanicInfo) {
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "unknown location".to_string());

    let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic payload".to_string()
    };

    tracing::error!(location = %location, "PANIC: {}", payload);
    tracing::debug!("Backtrace:\n{}", std::backtrace::Backtrace::capture());
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|slot| slot.clone())
}
