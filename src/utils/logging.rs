// ============================================================================
// Tracing Subscriber Setup
// ============================================================================

/// Install a formatted `tracing` subscriber for binaries and demos.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::INFO)
        .try_init()
}
