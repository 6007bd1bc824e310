#![allow(dead_code)]

use std::net::SocketAddr;
use tokio::net::TcpStream;
use tradepost::application::{Marketplace, dispatch};
use tradepost::config::ServerConfig;
use tradepost::interfaces::tcp::frame::{read_frame, write_frame};
use tradepost::interfaces::tcp::{Server, SharedMarketplace};

pub const FRAME_LIMIT: usize = 4096;

/// Starts a server on an ephemeral loopback port.
pub async fn start_server() -> (SocketAddr, SharedMarketplace) {
    let config = ServerConfig::default()
        .with_listen_addr("127.0.0.1:0".parse().unwrap())
        .with_max_frame_bytes(FRAME_LIMIT);
    let server = Server::bind(config, Marketplace::in_memory())
        .await
        .expect("Failed to bind test server");
    let addr = server.local_addr().unwrap();
    let market = server.marketplace();
    tokio::spawn(server.run());
    (addr, market)
}

pub struct Client {
    stream: TcpStream,
}

impl Client {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr)
            .await
            .expect("Failed to connect to test server");
        Self { stream }
    }

    pub async fn send(&mut self, command: &str) -> String {
        write_frame(&mut self.stream, command, FRAME_LIMIT)
            .await
            .unwrap();
        read_frame(&mut self.stream, FRAME_LIMIT).await.unwrap()
    }
}

/// Runs every command against `market` and returns the responses.
pub async fn run_script(market: &Marketplace, commands: &[&str]) -> Vec<String> {
    let mut responses = Vec::with_capacity(commands.len());
    for command in commands {
        responses.push(dispatch(market, command).await);
    }
    responses
}

pub async fn snapshot_json(market: &Marketplace) -> String {
    serde_json::to_string(&market.snapshot().await.unwrap()).unwrap()
}
