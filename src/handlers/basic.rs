//! # Handlers básicos
//! src/handlers/basic.rs
//!
//! - `/`: 200 sin body
//! - `/echo/<text>`: devuelve el texto
//! - `/user-agent`: devuelve el header `User-Agent`

use crate::http::{Response, StatusCode};

/// Handler para `GET /`
///
/// Sin body, así que nunca lleva `Content-Encoding`.
pub fn root_handler() -> Response {
    Response::new(StatusCode::Ok).with_header("Content-Length", "0")
}

/// Handler para `GET /echo/<text>`
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
/// Content-Length: 3
///
/// abc
/// ```
pub fn echo_handler(text: &str) -> Response {
    Response::text(StatusCode::Ok, text)
}

/// Handler para `GET /user-agent`
pub fn user_agent_handler(agent: &str) -> Response {
    Response::text(StatusCode::Ok, agent)
}

/// Respuesta para rutas inválidas o desconocidas
pub fn not_found_handler() -> Response {
    Response::not_found()
}
