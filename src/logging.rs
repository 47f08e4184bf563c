//! Logging and tracing configuration
//!
//! Structured logging via the `tracing` crate. Initialize once at startup
//! with `logging::init()`; control levels at runtime with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=debug ./crc32-embed file.bin          # All debug logs
//! RUST_LOG=crc32_embed=trace ./crc32-embed file.bin  # Trace for this crate only
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging/tracing system
///
/// Call this once at application startup (in main.rs)
pub fn init() {
    // Build filter from environment or use defaults
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Default: info in release, debug in debug builds
        if cfg!(debug_assertions) {
            EnvFilter::new("crc32_embed=debug")
        } else {
            EnvFilter::new("crc32_embed=info")
        }
    });

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .compact(),
    );

    // Set as global default (ignore error if already set)
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info};

    #[test]
    fn test_init() {
        init();
        info!("Test log message");
        debug!(key = "value", "Structured log");
    }
}
