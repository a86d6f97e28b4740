//! # Configuración del Servidor
//! src/config.rs
//!
//! La única opción es el directorio de almacenamiento para `/files/*`.
//! El puerto es fijo (4221) y se escucha en todas las interfaces.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./minihttpd --directory /tmp/files
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! FILES_DIRECTORY=/tmp/files RUST_LOG=minihttpd=debug ./minihttpd
//! ```

use crate::error::{Result, ServerError};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

/// Puerto fijo del servidor
pub const DEFAULT_PORT: u16 = 4221;

/// Se escucha en todas las interfaces
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuración del servidor
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "minihttpd")]
#[command(about = "Servidor HTTP/1.1 mínimo: echo, user-agent y archivos estáticos")]
#[command(version)]
pub struct Config {
    /// Directorio donde se guardan/leen archivos. Sin él, /files/* responde 404
    #[arg(long, env = "FILES_DIRECTORY")]
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use minihttpd::config::Config;
    ///
    /// assert_eq!(Config::default().address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT)
    }

    /// Directorio de almacenamiento, si se configuró
    pub fn storage_root(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Valida la configuración
    ///
    /// El directorio, si existe, debe ser un directorio que se pueda listar.
    pub fn validate(&self) -> Result<()> {
        let Some(dir) = &self.directory else {
            return Ok(());
        };

        let metadata = fs::metadata(dir).map_err(|source| ServerError::InvalidDirectory {
            path: dir.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(ServerError::NotADirectory(dir.clone()));
        }

        fs::read_dir(dir).map_err(|source| ServerError::InvalidDirectory {
            path: dir.clone(),
            source,
        })?;

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("=================================");
        println!("  minihttpd");
        println!("=================================");
        println!("   Address:   {}", self.address());
        match self.storage_root() {
            Some(dir) => println!("   Directory: {}", dir.display()),
            None => println!("   Directory: (none, /files/* disabled)"),
        }
        println!();
    }
}
