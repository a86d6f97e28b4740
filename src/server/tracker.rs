//! # Conexiones en curso
//! src/server/tracker.rs
//!
//! Contador de handlers activos. Cada thread de conexión sostiene un
//! [`ConnectionGuard`]; al soltarlo el contador baja y, si llega a cero,
//! despierta a quien espera el drenado en el apagado.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Contador thread-safe de conexiones en curso
#[derive(Debug, Default)]
pub struct ConnectionTracker {
    active: Mutex<usize>,
    drained: Condvar,
}

impl ConnectionTracker {
    /// Crea un tracker sin conexiones
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una conexión nueva
    ///
    /// La conexión cuenta como activa hasta que se suelta el guard.
    pub fn track(self: &Arc<Self>) -> ConnectionGuard {
        *self.lock() += 1;
        ConnectionGuard {
            tracker: Arc::clone(self),
        }
    }

    /// Número de conexiones activas
    pub fn active(&self) -> usize {
        *self.lock()
    }

    /// Espera hasta que no queden conexiones o venza `timeout`
    ///
    /// Retorna `true` si se drenaron todas.
    pub fn wait_for_zero(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (count, _) = self
            .drained
            .wait_timeout_while(guard, timeout, |active| *active > 0)
            .unwrap_or_else(PoisonError::into_inner);
        *count == 0
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // Un contador no queda inconsistente si un handler hizo panic
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self) {
        let mut active = self.lock();
        *active = active.saturating_sub(1);
        if *active == 0 {
            self.drained.notify_all();
        }
    }
}

/// Mantiene una conexión registrada mientras vive
#[derive(Debug)]
pub struct ConnectionGuard {
    tracker: Arc<ConnectionTracker>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.tracker.release();
    }
}
