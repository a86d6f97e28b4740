//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser de un solo disparo: el buffer recibido en una única lectura del
//! socket se considera el request completo.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/report.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/8.4.0\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /target VERSION`
//! 2. **Headers**: solo se consultan `User-Agent` y `Accept-Encoding`
//! 3. **Empty Line**: separa headers del body (`\r\n` o `\n`)
//! 4. **Body**: solo en POST, todo lo que sigue a la primera línea vacía
//!
//! El parser nunca falla hacia afuera: cualquier entrada malformada produce
//! un [`Request`] con [`Route::Invalid`], que el router convierte en 404.
//! Las líneas se recorren como slices del buffer original, sin mutarlo.

use thiserror::Error;

/// Métodos HTTP reconocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Escribir un archivo en `/files/<name>`
    POST,

    /// Método ausente o no soportado
    INVALID,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es GET ni POST
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::INVALID => "INVALID",
        }
    }
}

/// Ruta reconocida para un request.
///
/// Cada variante lleva solo los datos que le corresponden, así que un
/// request inválido nunca arrastra campos de otra ruta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /`
    Root,

    /// `GET /echo/<text>`, con el sufijo (puede ser vacío)
    Echo(String),

    /// `GET /user-agent`, con el valor del header si vino
    UserAgent(Option<String>),

    /// `GET|POST /files/<name>`, nombre no vacío
    File(String),

    /// Target válido que no coincide con ninguna ruta
    Unknown,

    /// Request malformado
    Invalid,
}

/// Representa un request parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST o INVALID)
    method: Method,

    /// Target tal cual llegó (ej: "/echo/abc"); vacío si el request es inválido
    path: String,

    /// Ruta clasificada a partir del target
    route: Route,

    /// Body del request, solo para POST
    body: Option<Vec<u8>>,

    /// `true` si `Accept-Encoding` menciona `gzip`
    accepts_gzip: bool,
}

/// Motivos por los que un request se rechaza
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío o sin request line
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no tiene la forma `METHOD SP TARGET SP VERSION`
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Método HTTP no soportado
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// El target no empieza con `/`
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// POST a algo distinto de `/files/<name>`
    #[error("POST is only accepted on /files/<name>, got {0}")]
    InvalidPostTarget(String),

    /// `/files/` sin nombre de archivo
    #[error("Missing filename")]
    MissingFilename,

    /// La request line contiene bytes que no son UTF-8
    #[error("Request line is not valid UTF-8")]
    InvalidEncoding,
}

impl Request {
    /// Parsea un request desde los bytes leídos del socket
    ///
    /// Nunca falla: los errores se registran en nivel `debug` y se
    /// traducen a [`Route::Invalid`].
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttpd::http::{Request, Route};
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n";
    /// let request = Request::parse(raw);
    ///
    /// assert_eq!(request.route(), &Route::Echo("abc".to_string()));
    /// assert!(request.accepts_gzip());
    /// ```
    pub fn parse(buffer: &[u8]) -> Self {
        match Self::try_parse(buffer) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "request rejected");
                Self::invalid()
            }
        }
    }

    /// Request inválido: sin campos específicos de ruta
    fn invalid() -> Self {
        Request {
            method: Method::INVALID,
            path: String::new(),
            route: Route::Invalid,
            body: None,
            accepts_gzip: false,
        }
    }

    /// La request line debe ser UTF-8 válido; así el target (y el nombre
    /// de archivo que sale de él) nunca se reescribe en silencio. En los
    /// headers los bytes inválidos se reemplazan por U+FFFD.
    fn try_parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let line_end = buffer
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(buffer.len());
        std::str::from_utf8(&buffer[..line_end]).map_err(|_| ParseError::InvalidEncoding)?;

        let text = String::from_utf8_lossy(buffer);

        // Separar por \n y quitar el \r final: acepta \r\n y \n
        let mut lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line));

        // 1. Request line
        let request_line = lines
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or(ParseError::EmptyRequest)?;
        let (method, path) = Self::parse_request_line(request_line)?;

        // 2. Clasificar el target
        let mut route = Self::classify(method, &path)?;

        // 3. Headers (hasta la primera línea vacía)
        let (user_agent, accepts_gzip) = Self::scan_headers(lines);
        if let Route::UserAgent(slot) = &mut route {
            *slot = user_agent;
        }

        // 4. Body
        let body = match method {
            Method::POST => Some(Self::parse_body(buffer)),
            _ => None,
        };

        Ok(Request {
            method,
            path,
            route,
            body,
            accepts_gzip,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1`. La versión no se valida, solo debe
    /// estar presente.
    fn parse_request_line(line: &str) -> Result<(Method, String), ParseError> {
        let mut parts = line.splitn(3, ' ');

        let method = parts.next().ok_or(ParseError::InvalidRequestLine)?;
        let method = Method::from_str(method)?;

        let target = parts.next().ok_or(ParseError::InvalidRequestLine)?;
        match parts.next() {
            Some(version) if !version.is_empty() => {}
            _ => return Err(ParseError::InvalidRequestLine),
        }

        if !target.starts_with('/') {
            return Err(ParseError::InvalidTarget(target.to_string()));
        }

        Ok((method, target.to_string()))
    }

    /// Clasifica el target en una ruta, del prefijo más específico al menos
    fn classify(method: Method, target: &str) -> Result<Route, ParseError> {
        if method == Method::POST {
            let name = target
                .strip_prefix("/files/")
                .ok_or_else(|| ParseError::InvalidPostTarget(target.to_string()))?;
            if name.trim().is_empty() {
                return Err(ParseError::MissingFilename);
            }
            return Ok(Route::File(name.to_string()));
        }

        if target == "/" {
            return Ok(Route::Root);
        }
        if let Some(text) = target.strip_prefix("/echo/") {
            return Ok(Route::Echo(text.to_string()));
        }
        if let Some(name) = target.strip_prefix("/files/") {
            if name.is_empty() {
                return Err(ParseError::MissingFilename);
            }
            return Ok(Route::File(name.to_string()));
        }
        if target == "/user-agent" || target == "/user-agent/" {
            return Ok(Route::UserAgent(None));
        }

        Ok(Route::Unknown)
    }

    /// Recorre los headers buscando `User-Agent` y `Accept-Encoding`
    ///
    /// Los nombres se comparan sin distinguir mayúsculas. Para
    /// `Accept-Encoding` basta con que el valor contenga `gzip`.
    fn scan_headers<'a>(lines: impl Iterator<Item = &'a str>) -> (Option<String>, bool) {
        let mut user_agent = None;
        let mut accepts_gzip = false;

        for line in lines {
            // La línea vacía marca el fin de los headers
            if line.is_empty() {
                break;
            }

            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let name = name.trim();

            if name.eq_ignore_ascii_case("User-Agent") {
                user_agent = Some(value.trim_start().to_string());
            } else if name.eq_ignore_ascii_case("Accept-Encoding") {
                accepts_gzip = value.contains("gzip");
            }
        }

        (user_agent, accepts_gzip)
    }

    /// Extrae el body: todo lo que sigue a la primera línea vacía.
    ///
    /// No se valida `Content-Length`. Sin línea vacía el body queda vacío.
    fn parse_body(buffer: &[u8]) -> Vec<u8> {
        let crlf = find(buffer, b"\r\n\r\n").map(|pos| pos + 4);
        let lf = find(buffer, b"\n\n").map(|pos| pos + 2);

        let start = match (crlf, lf) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => return Vec::new(),
        };

        buffer[start..].to_vec()
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el target del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la ruta clasificada
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Sufijo de `/echo/`, solo para la ruta echo
    pub fn echo_value(&self) -> Option<&str> {
        match &self.route {
            Route::Echo(text) => Some(text),
            _ => None,
        }
    }

    /// Valor de `User-Agent`, solo para la ruta `/user-agent`
    pub fn user_agent(&self) -> Option<&str> {
        match &self.route {
            Route::UserAgent(agent) => agent.as_deref(),
            _ => None,
        }
    }

    /// Nombre de archivo de `/files/<name>`
    pub fn filename(&self) -> Option<&str> {
        match &self.route {
            Route::File(name) => Some(name),
            _ => None,
        }
    }

    /// Obtiene el body del request (solo POST)
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Indica si el cliente acepta gzip
    pub fn accepts_gzip(&self) -> bool {
        self.accepts_gzip
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
