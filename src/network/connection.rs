//! Connection Handler
//!
//! Owns the stream to the analyzer application and performs one
//! request/response exchange at a time.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use bytes::Bytes;

use crate::config::{Config, Framing};
use crate::error::Result;
use crate::protocol::{read_response, write_frame, Request};

/// A single open stream to the analyzer application
///
/// Exchanges take `&mut self`, so only one request can be in flight.
pub struct Connection<S = TcpStream> {
    /// Underlying transport
    stream: S,

    /// How the end of a response is detected
    framing: Framing,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection<TcpStream> {
    /// Connect to the configured endpoint
    ///
    /// No retry is attempted; a refused or unreachable endpoint is returned
    /// as a connection error.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let addr = config.addr();
        tracing::debug!("Connecting to {}", addr);

        let stream = TcpStream::connect(&addr).map_err(|e| {
            tracing::warn!("Failed to connect to {}: {}", addr, e);
            e
        })?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or(addr);

        // Requests are small; don't let Nagle hold them back
        stream.set_nodelay(config.nodelay)?;

        let connection = Self {
            stream,
            framing: config.framing,
            peer_addr,
        };
        connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;

        tracing::info!("Connected to {}", connection.peer_addr);
        Ok(connection)
    }

    /// Configure socket timeouts (0 means block forever)
    pub fn set_timeouts(&self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        let write = (write_ms > 0).then(|| Duration::from_millis(write_ms));

        self.stream.set_read_timeout(read)?;
        self.stream.set_write_timeout(write)?;
        Ok(())
    }
}

impl<S: Read + Write> Connection<S> {
    /// Wrap an already-established stream
    pub fn from_stream(stream: S, framing: Framing) -> Self {
        Self {
            stream,
            framing,
            peer_addr: "stream".to_string(),
        }
    }

    /// Send one request and return the raw bytes of its response
    ///
    /// Encoding failures are reported before anything is written.
    pub fn exchange(&mut self, request: &Request) -> Result<Bytes> {
        let encoded = request.encode()?;
        self.exchange_encoded(&encoded)
    }

    /// Send already-encoded request bytes and return the raw response
    pub fn exchange_encoded(&mut self, encoded: &[u8]) -> Result<Bytes> {
        write_frame(&mut self.stream, encoded).map_err(|e| {
            tracing::debug!("Send to {} failed: {}", self.peer_addr, e);
            e
        })?;

        let buffer = read_response(&mut self.stream, self.framing).map_err(|e| {
            tracing::debug!("Receive from {} failed: {}", self.peer_addr, e);
            e
        })?;

        Ok(buffer.freeze())
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }
}
