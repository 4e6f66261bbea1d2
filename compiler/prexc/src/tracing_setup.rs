//! Tracing subscriber setup for the CLI.
//!
//! The filter comes from `PREX_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `warn`. With `--tree`, events are printed as an indented
//! span tree instead of flat lines, which makes nested calls readable.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PREX_LOG";

const DEFAULT_FILTER: &str = "warn";

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(tree: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let registry = tracing_subscriber::registry().with(filter);

        // try_init: a test harness may already own the global subscriber
        let installed = if tree {
            registry
                .with(
                    HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .try_init()
        };
        if let Err(err) = installed {
            eprintln!("warning: tracing already initialized: {err}");
        }
    });
}
