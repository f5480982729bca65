//! Proxy errors.
//!
//! [`ProxyError`] covers server lifecycle failures. Per-request failures
//! never surface here; they are turned into JSON error responses by the
//! route handlers.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors that stop the proxy server.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProxyError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server loop failed after binding.
    #[error("proxy server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl ProxyError {
    /// Creates a bind error for `addr`.
    #[must_use]
    pub const fn bind(addr: SocketAddr, source: std::io::Error) -> Self {
        Self::Bind { addr, source }
    }
}
