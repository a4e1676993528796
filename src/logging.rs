//! Tracing subscriber setup for the command-line binary.
//!
//! - `PTE_LOG` takes full `EnvFilter` directives (e.g. "pte_scoring=debug").
//! - Without it, the level is `warn`, or `debug` when verbose.
//! - Logs are written to stderr so stdout stays parseable.

use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PTE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "warn,pte_scoring=debug,pte_score=debug"
        } else {
            "warn"
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
