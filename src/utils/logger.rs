use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs a stdout subscriber as the global default.
/// Returns false when another subscriber was already installed.
pub fn setup_logging(max_level: Level) -> bool {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(false)
        .finish();

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Failed to set default tracing subscriber: {}", e);
            false
        }
    }
}
