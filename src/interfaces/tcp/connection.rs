use super::SharedMarketplace;
use super::frame::{read_frame, write_frame};
use crate::application::dispatcher::{dispatch, render_error};
use crate::error::{ConnectionError, MarketError};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

/// Phases of a connection.
///
/// `Idle -> Receiving -> Dispatching -> Sending -> Idle`, with `Closed` as the
/// terminal state reached from `Receiving` or `Sending` on any transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Receiving,
    Dispatching,
    Sending,
    Closed,
}

/// Serves request/response exchanges for one client.
///
/// The marketplace lock is held only while dispatching, so commands from all
/// connections are totally ordered while socket I/O of one connection never
/// blocks another.
pub struct Connection<S> {
    stream: S,
    peer: String,
    market: SharedMarketplace,
    max_frame_bytes: usize,
    state: ConnectionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        stream: S,
        peer: impl Into<String>,
        market: SharedMarketplace,
        max_frame_bytes: usize,
    ) -> Self {
        Self {
            stream,
            peer: peer.into(),
            market,
            max_frame_bytes,
            state: ConnectionState::Idle,
        }
    }

    /// Runs until the peer disconnects or the transport fails.
    ///
    /// A clean disconnect is `Ok(())`; anything else is returned after the
    /// stream has been shut down.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        let outcome = self.serve().await;
        self.transition(ConnectionState::Closed);
        let _ = self.stream.shutdown().await;

        match outcome {
            Err(ConnectionError::Closed) => Ok(()),
            other => other,
        }
    }

    async fn serve(&mut self) -> Result<(), ConnectionError> {
        loop {
            self.transition(ConnectionState::Receiving);
            let request = read_frame(&mut self.stream, self.max_frame_bytes).await?;
            let line = request.trim_end_matches(['\r', '\n', '\0']);

            self.transition(ConnectionState::Dispatching);
            let response = {
                let market = self.market.lock().await;
                tracing::debug!(peer = %self.peer, command = %line, "Dispatching command");
                dispatch(&market, line).await
            };

            self.transition(ConnectionState::Sending);
            let response = self.fit(response);
            write_frame(&mut self.stream, &response, self.max_frame_bytes).await?;

            self.transition(ConnectionState::Idle);
        }
    }

    /// Replaces a response that would not fit in one frame.
    fn fit(&self, response: String) -> String {
        if response.len() <= self.max_frame_bytes {
            return response;
        }
        tracing::warn!(
            peer = %self.peer,
            size = response.len(),
            limit = self.max_frame_bytes,
            "Response exceeds frame limit"
        );
        render_error(&MarketError::ResponseTooLarge {
            size: response.len(),
            limit: self.max_frame_bytes,
        })
    }

    fn transition(&mut self, next: ConnectionState) {
        tracing::trace!(peer = %self.peer, from = ?self.state, to = ?next, "Connection state change");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Marketplace;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, DuplexStream};
    use tokio::sync::Mutex;
    use tokio::task::JoinHandle;

    const LIMIT: usize = 512;

    fn spawn_connection(
        market: SharedMarketplace,
        limit: usize,
    ) -> (DuplexStream, JoinHandle<Result<(), ConnectionError>>) {
        let (client, server) = tokio::io::duplex(4096);
        let connection = Connection::new(server, "test", market, limit);
        (client, tokio::spawn(connection.run()))
    }

    async fn roundtrip(client: &mut DuplexStream, request: &str) -> String {
        write_frame(client, request, usize::MAX).await.unwrap();
        read_frame(client, usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn test_request_response_cycle() {
        let market = Arc::new(Mutex::new(Marketplace::in_memory()));
        let (mut client, handle) = spawn_connection(market.clone(), LIMIT);

        assert_eq!(
            roundtrip(&mut client, "addSeller Alice\n").await,
            "Seller added: Alice (id 1)"
        );
        assert_eq!(
            roundtrip(&mut client, "addSeller Bob\0").await,
            "Seller added: Bob (id 2)"
        );
        assert_eq!(roundtrip(&mut client, "").await, "Error: empty command");

        drop(client);
        assert!(handle.await.unwrap().is_ok());

        let snapshot = market.lock().await.snapshot().await.unwrap();
        assert_eq!(snapshot.sellers.len(), 2);
    }

    #[tokio::test]
    async fn test_response_too_large_keeps_connection_open() {
        let market = Arc::new(Mutex::new(Marketplace::in_memory()));
        let (mut client, handle) = spawn_connection(market, 256);

        roundtrip(&mut client, "addSeller Alice").await;
        for i in 0..20 {
            let line = format!("addProduct Alice Product{i:02} 1 1");
            roundtrip(&mut client, &line).await;
        }

        let response = roundtrip(&mut client, "displayProducts").await;
        assert!(response.starts_with("Error: response too large"), "{response}");

        let response = roundtrip(&mut client, "addSeller Bob").await;
        assert_eq!(response, "Seller added: Bob (id 2)");

        drop(client);
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_long_names_are_rejected_before_any_mutation() {
        let market = Arc::new(Mutex::new(Marketplace::in_memory()));
        let (mut client, handle) = spawn_connection(market.clone(), 256);

        roundtrip(&mut client, "addSeller Alice").await;
        roundtrip(&mut client, "addCustomer Carl 100").await;
        let before = market.lock().await.snapshot().await.unwrap();

        // a receipt for this name would not fit in a 256-byte frame
        let name = "P".repeat(150);
        let response = roundtrip(&mut client, &format!("addProduct Alice {name} 1 5")).await;
        assert!(response.starts_with("Error: malformed command"), "{response}");

        let response = roundtrip(&mut client, &format!("buyProduct Carl {name} 1 Cash")).await;
        assert!(response.starts_with("Error: malformed command"), "{response}");
        assert!(response.len() <= 256);

        assert_eq!(market.lock().await.snapshot().await.unwrap(), before);

        drop(client);
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_long_unknown_verb_is_echoed_truncated() {
        let market = Arc::new(Mutex::new(Marketplace::in_memory()));
        let (mut client, handle) = spawn_connection(market, 256);

        let verb = "z".repeat(240);
        let response = roundtrip(&mut client, &verb).await;
        assert!(response.starts_with("Error: unknown command: "), "{response}");
        assert!(response.ends_with('…'), "{response}");
        assert!(response.len() <= 256);

        drop(client);
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_oversized_request_closes_connection() {
        let market = Arc::new(Mutex::new(Marketplace::in_memory()));
        let (mut client, handle) = spawn_connection(market, 256);

        write_frame(&mut client, &"x".repeat(300), usize::MAX)
            .await
            .unwrap();

        let result = handle.await.unwrap();
        assert!(matches!(
            result,
            Err(ConnectionError::FrameTooLarge { size: 300, limit: 256 })
        ));

        let mut rest = Vec::new();
        client.read_to_end(&mut rest).await.unwrap();
        assert!(rest.is_empty());
    }
}
