//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementacion del servidor TCP que maneja multiples conexiones
//! simultaneas usando threads. Cada conexión se procesa en su propio thread
//! desacoplado: el accept loop nunca espera a los handlers.
//!
//! Cada conexión recorre `Receiving → Parsing → Dispatching → Encoding →
//! Closed` sin volver atrás; cualquier error salta directo a `Closed`.

use super::tracker::ConnectionTracker;
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::http::{Request, StatusCode};
use crate::router::Router;
use std::fmt;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Tamaño del buffer de la única lectura por conexión
pub const RECV_BUFFER_SIZE: usize = 8192;

/// Etapas de una conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Receiving,
    Parsing,
    Dispatching,
    Encoding,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Receiving => "receiving",
            ConnectionState::Parsing => "parsing",
            ConnectionState::Dispatching => "dispatching",
            ConnectionState::Encoding => "encoding",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Una conexión: una lectura, un request, una respuesta
#[derive(Debug)]
pub struct Connection<S> {
    stream: S,
    state: ConnectionState,
}

impl<S: Read + Write> Connection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            state: ConnectionState::Receiving,
        }
    }

    /// Etapa alcanzada
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Atiende el request
    ///
    /// Retorna `Ok(None)` si el peer cerró sin enviar nada. Los errores de
    /// lectura, compresión o escritura se propagan sin enviar otra respuesta.
    pub fn serve(&mut self, router: &Router) -> io::Result<Option<StatusCode>> {
        let start = Instant::now();

        let mut buffer = [0u8; RECV_BUFFER_SIZE];
        let bytes_read = self.stream.read(&mut buffer)?;
        if bytes_read == 0 {
            tracing::debug!("peer closed before sending a request");
            return Ok(None);
        }

        self.state = ConnectionState::Parsing;
        let request = Request::parse(&buffer[..bytes_read]);

        self.state = ConnectionState::Dispatching;
        let response = router.route(&request);
        let status = response.status();

        self.state = ConnectionState::Encoding;
        response.write_to(&mut self.stream, request.accepts_gzip())?;

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if status.is_server_error() {
            tracing::warn!(
                method = request.method().as_str(),
                path = request.path(),
                status = status.as_u16(),
                bytes_read,
                elapsed_ms,
                "request failed"
            );
        } else {
            tracing::info!(
                method = request.method().as_str(),
                path = request.path(),
                status = status.as_u16(),
                gzip = request.accepts_gzip(),
                bytes_read,
                elapsed_ms,
                "request served"
            );
        }

        Ok(Some(status))
    }

    /// Cierra la conexión soltando el stream
    pub fn close(mut self) -> ConnectionState {
        self.state = ConnectionState::Closed;
        self.state
    }
}

/// Atiende una conexión completa y la cierra en cualquier caso
pub fn handle_connection(stream: TcpStream, router: &Router) {
    let mut connection = Connection::new(stream);

    if let Err(e) = connection.serve(router) {
        tracing::warn!(state = %connection.state(), error = %e, "connection aborted");
    }

    connection.close();
}

/// Servidor HTTP concurrente, un thread por conexión
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    tracker: Arc<ConnectionTracker>,
}

impl Server {
    /// Abre el socket de escucha en `address`
    pub fn bind(address: &str, router: Router) -> Result<Self> {
        let listener = TcpListener::bind(address).map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })?;

        Ok(Self {
            listener,
            router: Arc::new(router),
            tracker: Arc::new(ConnectionTracker::new()),
        })
    }

    /// Abre el socket en la dirección fija con el directorio configurado
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::bind(&config.address(), Router::from_config(config))
    }

    /// Dirección real de escucha (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Tracker de conexiones en curso, para el apagado
    pub fn tracker(&self) -> Arc<ConnectionTracker> {
        Arc::clone(&self.tracker)
    }

    /// Accept loop
    ///
    /// Los errores de `accept` se registran y el loop continúa. Si no se
    /// puede crear el thread de una conexión el loop termina con
    /// [`ServerError::Spawn`].
    pub fn run(&self) -> Result<()> {
        tracing::info!(address = %self.local_addr()?, "listening");

        for (id, stream) in (1u64..).zip(self.listener.incoming()) {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                    continue;
                }
            };

            let peer = stream
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            tracing::debug!(connection = id, %peer, "accepted");

            let router = Arc::clone(&self.router);
            let guard = self.tracker.track();

            let spawned = thread::Builder::new()
                .name(format!("conn-{id}"))
                .spawn(move || {
                    let _guard = guard;
                    let span = tracing::info_span!("connection", id, %peer);
                    let _enter = span.enter();
                    handle_connection(stream, &router);
                });

            // El JoinHandle se descarta: el thread queda desacoplado
            if let Err(e) = spawned {
                tracing::error!(error = %e, "failed to spawn connection thread, shutting down");
                return Err(ServerError::Spawn(e));
            }
        }

        Ok(())
    }
}
