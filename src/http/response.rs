//! # Construcción y envío de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas y escribirlas
//! en el socket, opcionalmente comprimiendo el body con gzip.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use minihttpd::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("abc");
//!
//! let mut wire = Vec::new();
//! response.write_to(&mut wire, false).unwrap();
//! assert!(wire.ends_with(b"\r\n\r\nabc"));
//! ```

use super::compression::gzip_compress;
use super::StatusCode;
use std::fs::File;
use std::io::{self, ErrorKind, Read, Write};

/// Tamaño de cada lectura al enviar un archivo
pub const FILE_CHUNK_SIZE: usize = 8192;

/// Origen del body de una respuesta
#[derive(Debug)]
pub enum Body {
    /// Sin body
    Empty,

    /// Texto en memoria (el único que se comprime, incluso vacío)
    Text(String),

    /// Archivo abierto que se envía por bloques, con su tamaño
    File { file: File, len: u64 },
}

/// Representa una respuesta HTTP completa
#[derive(Debug)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en orden de inserción
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta
    body: Body,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe (sin distinguir mayúsculas) se sobrescribe
    /// conservando su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(mut self, body: &str) -> Self {
        self.add_header("Content-Length", &body.len().to_string());
        self.body = Body::Text(body.to_string());
        self
    }

    /// Establece un archivo como cuerpo
    ///
    /// `Content-Length` toma el tamaño del archivo.
    pub fn with_file(mut self, file: File, len: u64) -> Self {
        self.add_header("Content-Length", &len.to_string());
        self.body = Body::File { file, len };
        self
    }

    /// Respuesta `text/plain` con el texto dado
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_body(body)
    }

    /// 404 con body `Not Found`
    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound).with_body("Not Found")
    }

    /// Escribe la respuesta completa en `out`
    ///
    /// Con `accepts_gzip` y un body de texto (aunque sea vacío), el body se comprime
    /// en una sola pasada, se agrega `Content-Encoding: gzip` y
    /// `Content-Length` pasa a ser el tamaño comprimido. Los headers y el
    /// body se envían en dos escrituras separadas.
    ///
    /// # Errores
    ///
    /// Cualquier error de compresión o de escritura se propaga; el caller
    /// debe cerrar la conexión sin intentar otra respuesta.
    pub fn write_to<W: Write>(mut self, out: &mut W, accepts_gzip: bool) -> io::Result<()> {
        match std::mem::replace(&mut self.body, Body::Empty) {
            Body::Text(text) if accepts_gzip => {
                let compressed = gzip_compress(text.as_bytes())?;
                self.add_header("Content-Encoding", "gzip");
                self.add_header("Content-Length", &compressed.len().to_string());

                out.write_all(&self.header_block())?;
                out.write_all(&compressed)?;
            }
            Body::Text(text) => {
                out.write_all(&self.header_block())?;
                if !text.is_empty() {
                    out.write_all(text.as_bytes())?;
                }
            }
            Body::Empty => {
                out.write_all(&self.header_block())?;
            }
            Body::File { mut file, .. } => {
                out.write_all(&self.header_block())?;
                stream_file(&mut file, out)?;
            }
        }

        out.flush()
    }

    /// Genera la status line y los headers, terminados en `\r\n\r\n`
    pub fn header_block(&self) -> Vec<u8> {
        let mut block = format!("HTTP/1.1 {}\r\n", self.status);
        for (name, value) in &self.headers {
            block.push_str(name);
            block.push_str(": ");
            block.push_str(value);
            block.push_str("\r\n");
        }
        block.push_str("\r\n");
        block.into_bytes()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden de inserción
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &Body {
        &self.body
    }
}

/// Copia el archivo a `out` en bloques de [`FILE_CHUNK_SIZE`]
///
/// Usa su propio buffer, separado del que arma los headers.
fn stream_file<W: Write>(file: &mut File, out: &mut W) -> io::Result<()> {
    let mut chunk = [0u8; FILE_CHUNK_SIZE];
    loop {
        let read = match file.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        out.write_all(&chunk[..read])?;
    }
}
