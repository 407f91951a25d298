//! Local preview server.
//!
//! Serves the generated output directory over HTTP so the site can be
//! browsed immediately. The server is composed, not hand-rolled: axum
//! routing over `tower_http::services::ServeDir`, which resolves
//! directory requests to their `index.html` — together with the
//! generator's directory layout this gives clean, extensionless URLs
//! (`/` and `/stories/`).
//!
//! The rest of gramview is synchronous; a tokio runtime is created here
//! and only here, for the lifetime of the server. Once bound, the server
//! runs until the process terminates — Ctrl-C goes through the workspace
//! cleanup handler.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use thiserror::Error;

use axum::Router;
use tower_http::services::ServeDir;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("could not bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve `dir` on `127.0.0.1:port` until the process exits.
///
/// `on_ready` runs exactly once, after the port is bound and before the
/// first request is handled — the CLI uses it to print the URL and offer
/// to open a browser.
pub fn serve(
    dir: &Path,
    port: u16,
    on_ready: impl FnOnce(&str),
) -> Result<(), ServeError> {
    let app = Router::new()
        .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServeError::Bind { port, source })?;

        on_ready(&format!("http://localhost:{port}"));

        axum::serve(listener, app).await?;
        Ok(())
    })
}
