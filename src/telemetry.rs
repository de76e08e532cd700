//! Log setup. `LOG_LEVEL` takes EnvFilter directives, `LOG_FORMAT=json` switches
//! to structured output.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,compose=info,quizmix_backend=debug,tower_http=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if json {
        builder.json().with_current_span(true).init();
    } else {
        builder.with_file(true).with_line_number(true).init();
    }
}
