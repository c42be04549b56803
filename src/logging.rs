use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is not set.
///
/// Per-request pagination decisions log at debug/trace under the middleware
/// target; production keeps them out.
pub fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "list_paginator=debug,list_paginator::middleware=trace,tower_http=debug,info",
        Environment::Staging => "list_paginator=info,list_paginator::middleware=debug,tower_http=info,info",
        Environment::Prod => "list_paginator=info,list_paginator::middleware=warn,tower_http=warn,warn",
    }
}

pub fn init_logging(env: &Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(env)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // JSON lines in production, pretty output otherwise
    if matches!(env, Environment::Prod) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .init();
    }

    tracing::info!("Logging initialized for {:?} environment", env);
}
