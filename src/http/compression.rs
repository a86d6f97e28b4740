//! # Compresión gzip
//! src/http/compression.rs
//!
//! DEFLATE con envoltorio gzip en nivel por defecto, en una sola pasada.
//! Solo se aplica a bodies en memoria; los archivos se envían sin comprimir.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Read, Write};

/// Comprime `data` completo con gzip
///
/// # Ejemplo
/// ```
/// use minihttpd::http::compression::{gzip_compress, gzip_decompress};
///
/// let compressed = gzip_compress(b"hello").unwrap();
/// assert_eq!(gzip_decompress(&compressed).unwrap(), b"hello");
/// ```
pub fn gzip_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Descomprime un stream gzip completo
pub fn gzip_decompress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
