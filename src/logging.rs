use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

fn default_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "warn" };
    format!("msgcost={level}")
}

/// Initializes the stderr subscriber. `RUST_LOG` takes precedence over `--debug`.
pub(crate) fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
