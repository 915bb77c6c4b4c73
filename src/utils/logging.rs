use tracing_subscriber::EnvFilter;

/// environment variable overriding the log filter, e.g. `changelog2version=trace`
pub const LOG_ENV: &str = "CHANGELOG2VERSION_LOG";

/// filter directive used when `LOG_ENV` is unset
pub fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "warn" }
}

/// filter from an optional `LOG_ENV` value, invalid directives fall back to the default
pub fn build_filter(debug: bool, directive: Option<&str>) -> EnvFilter {
    match directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); using '{}'",
                LOG_ENV,
                err,
                default_directive(debug)
            );
            EnvFilter::new(default_directive(debug))
        }),
        None => EnvFilter::new(default_directive(debug)),
    }
}

/// install the stderr subscriber used by the command line tool
///
/// stdout is left to the printed report. Calling this twice is harmless.
pub fn init_logging(debug: bool) {
    let directive = std::env::var(LOG_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(debug, directive.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(debug)
        .try_init()
        .ok();
}
