//! Log setup for the `doorlot` binary.
//!
//! Command output goes to stdout, so every log line goes to stderr. The
//! filter is read from `DOORLOT_LOG`, then `RUST_LOG`, and otherwise only
//! raises Doorlot's own crates to the requested level.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "DOORLOT_LOG";

/// Filter used when neither variable is set: dependencies stay at `warn`.
fn default_directives(level: Level) -> String {
    format!("warn,doorlot_core={level},doorlot_state={level},doorlot={level}")
}

fn filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Install the global subscriber. Only the first call in a process wins.
///
/// With `json`, each line is a JSON object that carries the enclosing draw
/// span, so a draw's events can be grouped by actor.
pub fn init_tracing(json: bool, level: Level) {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter(level));

    if json {
        registry
            .with(layer.json().with_current_span(true).with_span_list(false))
            .try_init()
            .ok();
    } else {
        registry.with(layer).try_init().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_scope_to_doorlot_crates() {
        let directives = default_directives(Level::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("doorlot_core=DEBUG"));
        assert!(directives.contains("doorlot=DEBUG"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
