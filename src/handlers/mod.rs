//! # Handlers de las rutas
//!
//! Cada ruta fija del servidor tiene su handler:
//!
//! - **basic**: `/`, `/echo/<text>`, `/user-agent` y el 404 genérico
//! - **files**: lectura y escritura en el directorio de almacenamiento
//!
//! Los handlers reciben los datos ya extraídos por el parser y retornan
//! una Response; el router decide cuál llamar.

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;
