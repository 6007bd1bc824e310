//! Length-delimited text frames.
//!
//! A frame is a 4-byte little-endian payload length followed by that many
//! bytes of UTF-8 text. The same layout is used in both directions.

use crate::error::ConnectionError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Reads one frame.
///
/// Returns `ConnectionError::Closed` when the peer disconnects cleanly between
/// frames. A length above `limit` is rejected before the payload is read.
pub async fn read_frame<R: AsyncRead + Unpin>(
    reader: &mut R,
    limit: usize,
) -> Result<String, ConnectionError> {
    let mut len_buf = [0u8; LENGTH_PREFIX_BYTES];
    let read = reader.read(&mut len_buf).await?;
    if read == 0 {
        return Err(ConnectionError::Closed);
    }
    reader.read_exact(&mut len_buf[read..]).await?;

    let size = u32::from_le_bytes(len_buf) as usize;
    if size > limit {
        return Err(ConnectionError::FrameTooLarge { size, limit });
    }

    let mut payload = vec![0u8; size];
    reader.read_exact(&mut payload).await?;
    Ok(String::from_utf8(payload)?)
}

/// Writes one frame and flushes it.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    text: &str,
    limit: usize,
) -> Result<(), ConnectionError> {
    let size = text.len();
    if size > limit {
        return Err(ConnectionError::FrameTooLarge { size, limit });
    }

    let mut data = Vec::with_capacity(LENGTH_PREFIX_BYTES + size);
    data.extend_from_slice(&(size as u32).to_le_bytes());
    data.extend_from_slice(text.as_bytes());
    writer.write_all(&data).await?;
    writer.flush().await?;
    Ok(())
}
