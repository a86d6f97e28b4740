//! # Apagado del servidor
//! src/server/shutdown.rs
//!
//! Un thread dedicado espera SIGINT o SIGTERM. Al recibirlo espera a que
//! las conexiones en curso terminen (como máximo [`SHUTDOWN_GRACE`]) y sale
//! del proceso, lo que libera el socket de escucha.

use super::tracker::ConnectionTracker;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Tiempo máximo de espera por conexiones en curso
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Instala el handler de señales
#[cfg(unix)]
pub fn install(tracker: Arc<ConnectionTracker>) -> Result<()> {
    use crate::error::ServerError;
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use std::thread;

    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(ServerError::Signal)?;

    thread::Builder::new()
        .name("shutdown".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::info!(signal, active = tracker.active(), "shutdown requested");
                drain(&tracker, SHUTDOWN_GRACE);
                tracing::info!("exiting");
                std::process::exit(0);
            }
        })
        .map_err(ServerError::Spawn)?;

    Ok(())
}

/// Sin señales POSIX el proceso termina por el sistema operativo
#[cfg(not(unix))]
pub fn install(_tracker: Arc<ConnectionTracker>) -> Result<()> {
    Ok(())
}

/// Espera el drenado de conexiones; retorna `true` si no quedó ninguna
pub fn drain(tracker: &ConnectionTracker, grace: Duration) -> bool {
    let drained = tracker.wait_for_zero(grace);
    if !drained {
        tracing::warn!(
            active = tracker.active(),
            grace_ms = grace.as_millis() as u64,
            "connections still open after grace period"
        );
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_idle() {
        let tracker = ConnectionTracker::new();
        assert!(drain(&tracker, Duration::from_millis(1)));
    }

    #[test]
    fn test_drain_gives_up() {
        let tracker = Arc::new(ConnectionTracker::new());
        let _guard = tracker.track();
        assert!(!drain(&tracker, Duration::from_millis(10)));
    }
}
