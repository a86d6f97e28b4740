//! # Módulo HTTP
//!
//! Subconjunto de HTTP/1.1 implementado desde cero:
//!
//! - Parsing de requests de un solo disparo
//! - Construcción y envío de responses
//! - Compresión gzip de bodies en memoria
//! - Códigos de estado
//!
//! No hay keep-alive, chunked transfer encoding ni pipelining: un request
//! por conexión y una respuesta por request.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Encoding: gzip\r\n
//! Content-Length: 23\r\n
//! \r\n
//! <bytes gzip>
//! ```

pub mod compression; // gzip de bodies en memoria
pub mod request;     // Parsing de HTTP requests
pub mod response;    // Construcción y envío de HTTP responses
pub mod status;      // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, Request, Route};
pub use response::{Body, Response};
pub use status::StatusCode;
