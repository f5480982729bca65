//! Same-origin proxy for PokeAPI Pokémon lookups.
//!
//! Browsers served from a different origin cannot always call PokeAPI
//! directly. This crate exposes a single JSON endpoint that forwards to the
//! upstream and maps failures to stable error bodies:
//!
//! ```text
//! GET /api/pokemon?name=Pikachu  ─►  GET {base_url}/pokemon/pikachu
//! ```
//!
//! See [`routes`] for the full route table.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rd_api::PokeApi;
//! use rd_core::Config;
//! use rd_proxy::ProxyServer;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let upstream = Arc::new(PokeApi::new(&config.api)?);
//! ProxyServer::new(config.proxy.bind_address, upstream)
//!     .start(async { tokio::signal::ctrl_c().await.ok(); })
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use rd_api::Upstream;
use tokio::net::TcpListener;
use tracing::info;

pub use error::ProxyError;
pub use routes::{LookupError, PokemonQuery, router};

/// HTTP server exposing the proxy routes.
#[derive(Debug)]
pub struct ProxyServer<U> {
    bind_addr: SocketAddr,
    upstream: Arc<U>,
}

impl<U: Upstream + 'static> ProxyServer<U> {
    /// Creates a server that will listen on `bind_addr`.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr, upstream: Arc<U>) -> Self {
        Self {
            bind_addr,
            upstream,
        }
    }

    /// Returns the configured listen address.
    #[inline]
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Binds and serves until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> Result<(), ProxyError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.bind_addr)
            .await
            .map_err(|e| ProxyError::bind(self.bind_addr, e))?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ProxyError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(%addr, "proxy listening");

        axum::serve(listener, router(self.upstream))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("proxy stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use rd_api::ApiError;
    use serde_json::Value;

    use super::*;

    struct Unreachable;

    #[async_trait]
    impl Upstream for Unreachable {
        async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
            Err(ApiError::status(503, path))
        }
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let err = ProxyServer::new(addr, Arc::new(Unreachable))
            .start(async {})
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Bind { addr: a, .. } if a == addr));
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = ProxyServer::new(listener.local_addr().unwrap(), Arc::new(Unreachable));
        assert!(server.serve(listener, async {}).await.is_ok());
    }
}
