use std::net::{Ipv4Addr, SocketAddr};

/// Default address the server listens on.
pub const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(Ipv4Addr::LOCALHOST),
    7878,
);

/// Default upper bound for a single request or response frame, in bytes.
pub const DEFAULT_MAX_FRAME_BYTES: usize = 4096;

/// Smallest accepted frame limit. Every rendered error line fits in it.
pub const MIN_FRAME_BYTES: usize = 256;

/// Runtime settings of the TCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// Applies to both request and response payloads.
    pub max_frame_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn with_listen_addr(mut self, listen_addr: SocketAddr) -> Self {
        self.listen_addr = listen_addr;
        self
    }

    pub fn with_max_frame_bytes(mut self, max_frame_bytes: usize) -> Self {
        self.max_frame_bytes = max_frame_bytes.max(MIN_FRAME_BYTES);
        self
    }
}
