//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, cada una en su propio thread
//! 3. Lee y parsea un único request por conexión
//! 4. Genera y envía la response y cierra la conexión
//!
//! Además lleva la cuenta de conexiones en curso para el apagado.

pub mod shutdown;
pub mod tcp;
pub mod tracker;

// Re-exportar para facilitar el uso
pub use tcp::{handle_connection, Connection, ConnectionState, Server};
pub use tracker::ConnectionTracker;
