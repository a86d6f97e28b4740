//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio `Server` en 127.0.0.1:0 dentro de un thread
//! y habla con él por TCP.

use flate2::read::GzDecoder;
use minihttpd::router::Router;
use minihttpd::server::Server;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Helper: levanta un servidor y retorna su dirección
fn start_server(directory: Option<PathBuf>) -> SocketAddr {
    let server = Server::bind("127.0.0.1:0", Router::new(directory)).expect("bind");
    let addr = server.local_addr().expect("local addr");
    thread::spawn(move || server.run());
    addr
}

/// Respuesta separada en partes
struct RawResponse {
    status_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn status(&self) -> u16 {
        self.status_line
            .split(' ')
            .nth(1)
            .and_then(|code| code.parse().ok())
            .expect("status code")
    }
}

/// Helper: envía bytes crudos y lee hasta que el servidor cierra
fn send_raw(addr: SocketAddr, raw: &[u8]) -> RawResponse {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).expect("write request");

    let mut wire = Vec::new();
    stream.read_to_end(&mut wire).expect("read response");

    let pos = wire
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header terminator");
    let head = String::from_utf8(wire[..pos].to_vec()).expect("utf8 head");
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap_or_default().to_string();
    let headers = lines
        .filter_map(|line| line.split_once(": "))
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();

    RawResponse {
        status_line,
        headers,
        body: wire[pos + 4..].to_vec(),
    }
}

fn get(addr: SocketAddr, path: &str, extra_headers: &str) -> RawResponse {
    let raw = format!("GET {} HTTP/1.1\r\nHost: localhost\r\n{}\r\n", path, extra_headers);
    send_raw(addr, raw.as_bytes())
}

fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out).expect("valid gzip");
    out
}

#[test]
fn test_root_endpoint() {
    let addr = start_server(None);
    let response = get(addr, "/", "");

    assert_eq!(response.status_line, "HTTP/1.1 200 OK");
    assert!(response.body.is_empty());
}

#[test]
fn test_root_is_never_gzipped() {
    let addr = start_server(None);
    let response = get(addr, "/", "Accept-Encoding: gzip\r\n");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Encoding"), None);
    assert_eq!(response.header("Content-Length"), Some("0"));
    assert!(response.body.is_empty());
}

#[test]
fn test_echo_endpoint() {
    let addr = start_server(None);
    let response = get(addr, "/echo/abc", "");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("Content-Length"), Some("3"));
    assert_eq!(response.body, b"abc");
}

#[test]
fn test_echo_empty_value() {
    let addr = start_server(None);
    let response = get(addr, "/echo/", "");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Length"), Some("0"));
    assert!(response.body.is_empty());
}

#[test]
fn test_echo_empty_gzip() {
    let addr = start_server(None);
    let response = get(addr, "/echo/", "Accept-Encoding: gzip\r\n");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Encoding"), Some("gzip"));
    assert_eq!(
        response.header("Content-Length"),
        Some(response.body.len().to_string().as_str())
    );
    assert_eq!(gunzip(&response.body), b"");
}

#[test]
fn test_echo_gzip() {
    let addr = start_server(None);
    let text = "compress-me-".repeat(50);
    let response = get(addr, &format!("/echo/{}", text), "Accept-Encoding: gzip\r\n");

    assert_eq!(response.status(), 200);
    assert_eq!(response.header("Content-Encoding"), Some("gzip"));
    assert_eq!(
        response.header("Content-Length"),
        Some(response.body.len().to_string().as_str())
    );
    assert_eq!(gunzip(&response.body), text.as_bytes());
}

#[test]
fn test_echo_without_gzip_support() {
    let addr = start_server(None);
    let response = get(addr, "/echo/abc", "Accept-Encoding: deflate, br\r\n");

    assert_eq!(response.header("Content-Encoding"), None);
    assert_eq!(response.body, b"abc");
}

#[test]
fn test_echo_is_idempotent() {
    let addr = start_server(None);
    let first = get(addr, "/echo/same", "");
    let second = get(addr, "/echo/same", "");

    assert_eq!(first.status_line, second.status_line);
    assert_eq!(first.headers, second.headers);
    assert_eq!(first.body, second.body);
}

#[test]
fn test_user_agent_endpoint() {
    let addr = start_server(None);
    let response = get(addr, "/user-agent", "User-Agent: foo/1.0\r\n");

    assert_eq!(response.status(), 200);
    assert_eq!(response.body, b"foo/1.0");
}

#[test]
fn test_user_agent_gzip() {
    let addr = start_server(None);
    let response = get(
        addr,
        "/user-agent",
        "User-Agent: foo/1.0\r\nAccept-Encoding: gzip\r\n",
    );

    assert_eq!(response.header("Content-Encoding"), Some("gzip"));
    assert_eq!(gunzip(&response.body), b"foo/1.0");
}

#[test]
fn test_not_found() {
    let addr = start_server(None);
    assert_eq!(get(addr, "/nonexistent", "").status(), 404);
}

#[test]
fn test_invalid_requests_are_not_found() {
    let addr = start_server(None);

    let requests: [&[u8]; 5] = [
        b"DELETE / HTTP/1.1\r\n\r\n",
        b"GET\r\n\r\n",
        b"GET noslash HTTP/1.1\r\n\r\n",
        b"POST /echo/abc HTTP/1.1\r\n\r\nx",
        b"\x00\x01\x02garbage",
    ];

    for raw in requests {
        assert_eq!(send_raw(addr, raw).status(), 404, "request {:?}", raw);
    }
}

#[test]
fn test_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(Some(dir.path().to_path_buf()));

    let created = send_raw(
        addr,
        b"POST /files/report.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    );
    assert_eq!(created.status_line, "HTTP/1.1 201 Created");
    assert_eq!(created.body, b"File Created!");

    let read = get(addr, "/files/report.txt", "");
    assert_eq!(read.status(), 200);
    assert_eq!(read.header("Content-Type"), Some("application/octet-stream"));
    assert_eq!(read.header("Content-Length"), Some("5"));
    assert_eq!(read.body, b"hello");
}

#[test]
fn test_file_is_never_gzipped() {
    let dir = tempfile::tempdir().unwrap();
    let content = "line of text\n".repeat(2000);
    std::fs::write(dir.path().join("big.txt"), &content).unwrap();
    let addr = start_server(Some(dir.path().to_path_buf()));

    let read = get(addr, "/files/big.txt", "Accept-Encoding: gzip\r\n");

    assert_eq!(read.status(), 200);
    assert_eq!(read.header("Content-Encoding"), None);
    assert_eq!(read.body, content.as_bytes());
}

#[test]
fn test_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(Some(dir.path().to_path_buf()));

    assert_eq!(get(addr, "/files/missing.txt", "").status(), 404);
}

#[test]
fn test_files_without_directory() {
    let addr = start_server(None);

    let response = send_raw(addr, b"POST /files/x HTTP/1.1\r\n\r\nhello");
    assert_eq!(response.status(), 404);
}

#[test]
fn test_files_traversal_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    std::fs::create_dir(&root).unwrap();
    let addr = start_server(Some(root));

    let response = send_raw(addr, b"POST /files/../escaped.txt HTTP/1.1\r\n\r\nx");
    assert_eq!(response.status(), 404);
    assert!(!dir.path().join("escaped.txt").exists());
}

#[test]
fn test_non_utf8_filename_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(Some(dir.path().to_path_buf()));

    let response = send_raw(addr, b"POST /files/report\xff.txt HTTP/1.1\r\n\r\nx");
    assert_eq!(response.status(), 404);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_concurrent_requests() {
    let addr = start_server(None);

    let clients: Vec<_> = (0..8)
        .map(|i| thread::spawn(move || get(addr, &format!("/echo/client-{}", i), "")))
        .collect();

    for (i, client) in clients.into_iter().enumerate() {
        let response = client.join().unwrap();
        assert_eq!(response.body, format!("client-{}", i).as_bytes());
    }
}
