use super::SharedMarketplace;
use super::connection::Connection;
use crate::application::Marketplace;
use crate::config::ServerConfig;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Pause after a failed accept, so errors such as fd exhaustion do not spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts clients and runs one [`Connection`] task per client, all sharing a
/// single marketplace.
pub struct Server {
    listener: TcpListener,
    market: SharedMarketplace,
    config: ServerConfig,
}

impl Server {
    /// Binds the listening socket. Use port 0 to let the OS pick one.
    pub async fn bind(config: ServerConfig, market: Marketplace) -> io::Result<Self> {
        let listener = TcpListener::bind(config.listen_addr).await?;
        Ok(Self {
            listener,
            market: Arc::new(Mutex::new(market)),
            config,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the shared marketplace.
    pub fn marketplace(&self) -> SharedMarketplace {
        self.market.clone()
    }

    /// Serves until the process ends.
    pub async fn run(self) -> io::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serves until `shutdown` completes. Connections already accepted keep
    /// running on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        tracing::info!(
            addr = %addr,
            max_frame_bytes = self.config.max_frame_bytes,
            "Marketplace server listening"
        );
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Marketplace server shutting down");
                    break;
                }

                result = self.listener.accept() => {
                    match result {
                        Ok((stream, addr)) => self.spawn_connection(stream, addr),
                        Err(e) => backoff_after_accept_error(&e).await,
                    }
                }
            }
        }

        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream, addr: SocketAddr) {
        tracing::info!(peer = %addr, "Client connected");
        let connection = Connection::new(
            stream,
            addr.to_string(),
            self.market.clone(),
            self.config.max_frame_bytes,
        );

        tokio::spawn(async move {
            match connection.run().await {
                Ok(()) => tracing::info!(peer = %addr, "Client disconnected"),
                Err(e) => tracing::warn!(peer = %addr, error = %e, "Connection closed with error"),
            }
        });
    }
}

async fn backoff_after_accept_error(error: &io::Error) {
    tracing::error!(
        error = %error,
        backoff_ms = ACCEPT_ERROR_BACKOFF.as_millis() as u64,
        "Failed to accept connection"
    );
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}
