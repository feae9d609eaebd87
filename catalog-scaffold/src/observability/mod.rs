//! Observability (logging)
//!
//! Structured logging for scaffolding runs. Events go to stderr so the
//! console report printed on stdout stays readable and pipeable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const QUIET_FILTER: &str = "warn";

/// Default filter for `--verbose`
const VERBOSE_FILTER: &str = "debug,catalog_scaffold=trace";

/// Initialize logging
///
/// `RUST_LOG` always wins. Without it, only warnings are shown unless
/// `verbose` is set.
///
/// # Example
///
/// ```rust,no_run
/// use catalog_scaffold::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(false)?;
/// tracing::info!("Scaffolder started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

const fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        QUIET_FILTER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "warn");
        assert!(default_filter(true).contains("catalog_scaffold=trace"));
    }
}
