//! # minihttpd - Entry Point
//! src/main.rs
//!
//! Parsea `--directory`, valida el directorio antes de abrir el socket,
//! instala el apagado por señales y corre el accept loop.

use minihttpd::config::Config;
use minihttpd::server::{shutdown, Server};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "minihttpd=info".into()),
        )
        .init();

    let config = Config::new();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> minihttpd::Result<()> {
    config.validate()?;
    config.print_summary();

    let server = Server::from_config(config)?;
    shutdown::install(server.tracker())?;

    server.run()
}
