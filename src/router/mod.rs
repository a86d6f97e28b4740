//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea un request parseado a uno de los comportamientos fijos del servidor.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Tabla de decisión (gana la primera que coincide):
//!
//! | Ruta                         | Resultado                         |
//! |------------------------------|-----------------------------------|
//! | inválida                     | 404                               |
//! | `/user-agent` con header     | 200 con el User-Agent             |
//! | `/echo/<text>`               | 200 con el texto                  |
//! | `/`                          | 200 sin body                      |
//! | `POST /files/<name>` con dir | 201, o 500 si falla la escritura  |
//! | `GET /files/<name>` con dir  | 200 con el archivo, o 404         |
//! | `/files/*` sin dir           | 404                               |
//! | cualquier otra               | 404                               |

use crate::config::Config;
use crate::handlers;
use crate::http::{Method, Request, Response, Route};
use std::path::{Path, PathBuf};

/// Router con el directorio de almacenamiento, inmutable tras el arranque
#[derive(Debug, Clone, Default)]
pub struct Router {
    /// Raíz para `/files/*`; `None` deshabilita esas rutas
    storage_root: Option<PathBuf>,
}

impl Router {
    /// Crea un router con el directorio de almacenamiento dado
    pub fn new(storage_root: Option<PathBuf>) -> Self {
        Self { storage_root }
    }

    /// Crea el router desde la configuración validada
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.directory.clone())
    }

    /// Directorio de almacenamiento configurado
    pub fn storage_root(&self) -> Option<&Path> {
        self.storage_root.as_deref()
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// # Ejemplo
    /// ```
    /// use minihttpd::router::Router;
    /// use minihttpd::http::{Request, StatusCode};
    ///
    /// let router = Router::new(None);
    /// let request = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n");
    /// assert_eq!(router.route(&request).status(), StatusCode::Ok);
    ///
    /// let request = Request::parse(b"GET /files/abc HTTP/1.1\r\n\r\n");
    /// assert_eq!(router.route(&request).status(), StatusCode::NotFound);
    /// ```
    pub fn route(&self, request: &Request) -> Response {
        match request.route() {
            Route::Invalid => handlers::not_found_handler(),
            Route::UserAgent(Some(agent)) => handlers::user_agent_handler(agent),
            Route::UserAgent(None) => handlers::not_found_handler(),
            Route::Echo(text) => handlers::echo_handler(text),
            Route::Root => handlers::root_handler(),
            Route::File(name) => self.route_file(request, name),
            Route::Unknown => handlers::not_found_handler(),
        }
    }

    fn route_file(&self, request: &Request, name: &str) -> Response {
        // Sin directorio nunca se intenta leer ni escribir
        let Some(root) = self.storage_root() else {
            return handlers::not_found_handler();
        };

        match request.method() {
            Method::POST => {
                handlers::create_file_handler(root, name, request.body().unwrap_or_default())
            }
            Method::GET => handlers::read_file_handler(root, name),
            Method::INVALID => handlers::not_found_handler(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Body, StatusCode};

    fn route(router: &Router, raw: &[u8]) -> Response {
        router.route(&Request::parse(raw))
    }

    fn text_of(response: &Response) -> &str {
        match response.body() {
            Body::Text(text) => text,
            other => panic!("expected text body, got {:?}", other),
        }
    }

    #[test]
    fn test_root() {
        let response = route(&Router::default(), b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(matches!(response.body(), Body::Empty));
    }

    #[test]
    fn test_echo() {
        let response = route(&Router::default(), b"GET /echo/abc HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(text_of(&response), "abc");
    }

    #[test]
    fn test_user_agent() {
        let raw = b"GET /user-agent HTTP/1.1\r\nUser-Agent: foo/1.0\r\n\r\n";
        let response = route(&Router::default(), raw);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(text_of(&response), "foo/1.0");
    }

    #[test]
    fn test_user_agent_missing_header() {
        let response = route(&Router::default(), b"GET /user-agent HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_invalid_and_unknown() {
        let router = Router::default();
        assert_eq!(route(&router, b"BREW / HTTP/1.1\r\n\r\n").status(), StatusCode::NotFound);
        assert_eq!(route(&router, b"GET /nope HTTP/1.1\r\n\r\n").status(), StatusCode::NotFound);
    }

    #[test]
    fn test_files_without_directory() {
        let router = Router::new(None);
        let response = route(&router, b"POST /files/x HTTP/1.1\r\n\r\ndata");
        assert_eq!(response.status(), StatusCode::NotFound);

        let response = route(&router, b"GET /files/x HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_files_post_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let router = Router::new(Some(dir.path().to_path_buf()));

        let created = route(&router, b"POST /files/report.txt HTTP/1.1\r\n\r\nhello");
        assert_eq!(created.status(), StatusCode::Created);
        assert_eq!(std::fs::read(dir.path().join("report.txt")).unwrap(), b"hello");

        let read = route(&router, b"GET /files/report.txt HTTP/1.1\r\n\r\n");
        assert_eq!(read.status(), StatusCode::Ok);
        assert_eq!(read.header("Content-Length"), Some("5"));
        assert!(matches!(read.body(), Body::File { len: 5, .. }));
    }

    #[test]
    fn test_files_missing() {
        let dir = tempfile::tempdir().unwrap();
        let router = Router::new(Some(dir.path().to_path_buf()));
        let response = route(&router, b"GET /files/missing.txt HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            directory: Some(PathBuf::from("/srv")),
        };
        assert_eq!(Router::from_config(&config).storage_root(), Some(Path::new("/srv")));
    }
}
