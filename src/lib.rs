//! # minihttpd
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo de un proceso: acepta conexiones TCP, parsea
//! un request crudo hacia un conjunto fijo de rutas y emite la respuesta,
//! opcionalmente comprimida con gzip.
//!
//! ## Arquitectura
//!
//! ```text
//! accept loop → thread por conexión → Request::parse → Router → Response::write_to
//! ```
//!
//! - `http`: parsing, responses, compresión y códigos de estado
//! - `router`: tabla de decisión de rutas
//! - `handlers`: comportamiento de cada ruta
//! - `server`: accept loop, conexiones, apagado
//! - `config`: argumentos CLI
//! - `error`: errores de arranque y del accept loop
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use minihttpd::config::Config;
//! use minihttpd::server::Server;
//!
//! let config = Config::default();
//! let server = Server::from_config(&config).expect("bind");
//! server.run().expect("accept loop");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;

pub use error::{Result, ServerError};
