use std::{
    env, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    str::FromStr,
    thread,
    time::{Duration, SystemTime},
};
use tokio::net::TcpListener;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Keeps the non-blocking file writer alive for the life of the process.
pub struct TracingGuards {
    _file_guard: Option<WorkerGuard>,
}

pub fn init_tracing(service_name: &str) -> TracingGuards {
    // RUST_LOG wins over the default filter.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "/var/log/relay".to_string());
    let log_root = PathBuf::from(log_dir).join(service_name);

    match rolling_file_writer(&log_root, service_name) {
        Some((writer, guard)) => {
            let subscriber = Registry::default()
                .with(filter)
                .with(stdout_layer)
                .with(fmt::layer().with_writer(writer));
            let _ = tracing::subscriber::set_global_default(subscriber);

            let retention_days = env_or("LOG_RETENTION_DAYS", 14u64);
            let cleanup_minutes = env_or("LOG_CLEANUP_INTERVAL_MINUTES", 360u64);
            spawn_log_cleanup(log_root, retention_days, cleanup_minutes);

            TracingGuards {
                _file_guard: Some(guard),
            }
        }
        None => {
            let subscriber = Registry::default().with(filter).with(stdout_layer);
            let _ = tracing::subscriber::set_global_default(subscriber);
            TracingGuards { _file_guard: None }
        }
    }
}

fn rolling_file_writer(log_root: &Path, service_name: &str) -> Option<(NonBlocking, WorkerGuard)> {
    // A read-only filesystem leaves us with stdout only.
    fs::create_dir_all(log_root).ok()?;
    let appender = tracing_appender::rolling::daily(log_root, format!("{service_name}.log"));
    Some(tracing_appender::non_blocking(appender))
}

/// Parse a typed environment value, falling back to `default` when the
/// variable is unset or unparseable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

fn spawn_log_cleanup(log_root: PathBuf, retention_days: u64, cleanup_interval_minutes: u64) {
    if retention_days == 0 || cleanup_interval_minutes == 0 {
        return;
    }

    let retention = Duration::from_secs(retention_days * 24 * 60 * 60);
    let interval = Duration::from_secs(cleanup_interval_minutes * 60);

    thread::spawn(move || loop {
        if let Some(cutoff) = SystemTime::now().checked_sub(retention) {
            remove_logs_older_than(&log_root, cutoff);
        }
        thread::sleep(interval);
    });
}

fn remove_logs_older_than(root: &Path, cutoff: SystemTime) {
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let modified = fs::metadata(&path).and_then(|meta| meta.modified());
            if matches!(modified, Ok(modified) if modified < cutoff) {
                let _ = fs::remove_file(&path);
            }
        }
    }
}

/// Bind on all interfaces for container compatibility.
pub async fn bind_listener(port: u16) -> TcpListener {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr).await.expect("bind listener")
}

/// Resolve on ctrl-c or SIGTERM so axum can drain in-flight requests.
pub async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("sigterm handler");
        tokio::select! {
            _ = ctrl_c => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }
}

#[cfg(test)]
mod tests {
    use super::env_or;

    #[test]
    fn env_or_falls_back_on_missing_or_garbage() {
        std::env::remove_var("RELAY_COMMON_TEST_UNSET");
        assert_eq!(env_or("RELAY_COMMON_TEST_UNSET", 7u16), 7);

        std::env::set_var("RELAY_COMMON_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("RELAY_COMMON_TEST_GARBAGE", 7u16), 7);
        std::env::remove_var("RELAY_COMMON_TEST_GARBAGE");
    }

    #[test]
    fn env_or_parses_typed_values() {
        std::env::set_var("RELAY_COMMON_TEST_PORT", "9005");
        assert_eq!(env_or("RELAY_COMMON_TEST_PORT", 8080u16), 9005);
        std::env::remove_var("RELAY_COMMON_TEST_PORT");
    }
}
