use thiserror::Error;

/// Failures that can keep the server from coming up. Request handlers
/// themselves are infallible; a malformed POST body is answered by the
/// `Json` extractor's own rejection.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid bind address {addr}: {source}")]
    InvalidBindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
