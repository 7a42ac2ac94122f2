use tracing_subscriber::EnvFilter;

/// Filter used when the configured one does not parse.
pub const FALLBACK_FILTER: &str = "info,hyper_util=warn";

/// Build the filter directive from `GARMIN_CONNECT_LOG_LEVEL` (or `RUST_LOG`,
/// default `info`). Response logging needs the client crate at debug.
pub fn filter_directive<F>(mut get: F, log_responses: bool) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let level = get("GARMIN_CONNECT_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string());
    let mut directive = format!("{level},hyper_util=warn");
    if log_responses {
        directive.push_str(",garmin_connect_client=debug");
    }
    directive
}

pub fn init(log_responses: bool) {
    let directive = filter_directive(|k| std::env::var(k).ok(), log_responses);
    let env_filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("log filter: {}", directive);
}
