//! # Errores del Servidor
//! src/error.rs
//!
//! Errores de arranque y del accept loop. Los errores dentro de una
//! conexión nunca llegan hasta aquí: se registran y la conexión se cierra.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errores fatales del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// El directorio de almacenamiento no existe o no se puede leer
    #[error("cannot open directory {}: {source}", .path.display())]
    InvalidDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// La ruta existe pero no es un directorio
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// No se pudo abrir el socket de escucha
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// No se pudo crear el thread de una conexión
    #[error("failed to spawn connection thread: {0}")]
    Spawn(#[source] io::Error),

    /// No se pudieron registrar los handlers de señales
    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
