//! # Handlers de archivos
//! src/handlers/files.rs
//!
//! - `GET /files/<name>`: envía el archivo como `application/octet-stream`
//! - `POST /files/<name>`: sobrescribe el archivo con el body del request
//!
//! Los nombres se resuelven bajo el directorio de almacenamiento. Un nombre
//! con `..`, raíz absoluta o prefijo de unidad no se resuelve y responde 404.
//! Escrituras concurrentes al mismo archivo no se serializan: gana la última.

use crate::http::{Response, StatusCode};
use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

/// Resuelve `name` dentro de `root`
///
/// Retorna `None` si algún componente no es un nombre normal.
///
/// # Ejemplo
/// ```
/// use minihttpd::handlers::files::resolve;
/// use std::path::Path;
///
/// let root = Path::new("/srv/files");
/// assert_eq!(resolve(root, "a/b.txt"), Some(root.join("a/b.txt")));
/// assert_eq!(resolve(root, "../etc/passwd"), None);
/// ```
pub fn resolve(root: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    let all_normal = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));

    if name.is_empty() || !all_normal {
        return None;
    }
    Some(root.join(relative))
}

/// Handler para `GET /files/<name>`
///
/// - Archivo existente: 200 con el archivo como body
/// - Archivo inexistente o ilegible: 404
/// - Falla de `stat` tras abrirlo: 500
pub fn read_file_handler(root: &Path, name: &str) -> Response {
    let Some(path) = resolve(root, name) else {
        tracing::warn!(filename = name, "rejected filename outside storage root");
        return Response::not_found();
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "file not readable");
            return Response::not_found();
        }
    };

    let metadata = match file.metadata() {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "stat failed");
            return internal_error();
        }
    };

    if !metadata.is_file() {
        return Response::not_found();
    }

    Response::new(StatusCode::Ok)
        .with_header("Content-Type", "application/octet-stream")
        .with_file(file, metadata.len())
}

/// Handler para `POST /files/<name>`
///
/// Trunca y escribe el archivo completo. 201 si se escribió, 500 si no.
pub fn create_file_handler(root: &Path, name: &str, body: &[u8]) -> Response {
    let Some(path) = resolve(root, name) else {
        tracing::warn!(filename = name, "rejected filename outside storage root");
        return Response::not_found();
    };

    match fs::write(&path, body) {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = body.len(), "file written");
            Response::new(StatusCode::Created).with_body("File Created!")
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to write file");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    Response::new(StatusCode::InternalServerError).with_body("Internal Server Error")
}
