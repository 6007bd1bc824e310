//! TCP transport: framing, the per-connection loop and the accept loop.

pub mod connection;
pub mod frame;
pub mod server;

use crate::application::Marketplace;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The one marketplace shared by every connection, behind the process-wide
/// dispatch lock.
pub type SharedMarketplace = Arc<Mutex<Marketplace>>;

pub use connection::{Connection, ConnectionState};
pub use server::Server;
