//! Client Module
//!
//! The framing entry point (`send_command`) and the typed command layer
//! built on it.
//!
//! ## Flow
//! ```text
//! command method ──► validate args ──► Request ──► Connection::exchange_encoded
//!                                                        │
//!        typed result ◄── decode lines ◄── Reply ◄── decode_response
//! ```

mod commands;
mod shared;
mod types;

use std::io::{Read, Write};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::{LogicError, Result};
use crate::network::Connection;
use crate::protocol::{decode_response, Reply, Request, Response};

pub use shared::SharedClient;
pub use types::{
    ActiveChannels, Analyzer, Device, PerformanceOption, PretriggerBufferSize, SampleRate,
    TriggerMode,
};

/// Receives the text of every request and raw response
///
/// Both methods default to doing nothing.
pub trait Observer: Send {
    fn on_request(&self, _request: &str) {}

    fn on_response(&self, _response: &str) {}
}

/// Observer that emits `tracing` debug events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_request(&self, request: &str) {
        tracing::debug!(target: "logicwire::wire", "Send: {:?}", request);
    }

    fn on_response(&self, response: &str) {
        tracing::debug!(target: "logicwire::wire", "Recv: {:?}", response);
    }
}

/// Client for the analyzer scripting socket
///
/// Not internally synchronized; wrap in [`SharedClient`] to share across
/// threads.
pub struct Client<S = TcpStream> {
    connection: Connection<S>,
    config: Config,
    observer: Box<dyn Observer>,
}

impl Client<TcpStream> {
    /// Connect to `host:port` with otherwise default settings
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Self::with_config(Config::builder().host(host).port(port).build())
    }

    /// Connect using a full configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let connection = Connection::open(&config)?;
        Ok(Self {
            connection,
            config,
            observer: Box::new(TracingObserver),
        })
    }
}

impl<S: Read + Write> Client<S> {
    /// Build a client over an already-connected stream
    ///
    /// The configuration is validated the same way [`Client::with_config`]
    /// validates it; only the endpoint fields go unused.
    pub fn from_stream(stream: S, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            connection: Connection::from_stream(stream, config.framing),
            config,
            observer: Box::new(TracingObserver),
        })
    }

    /// Replace the request/response observer
    pub fn set_observer(&mut self, observer: Box<dyn Observer>) {
        self.observer = observer;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connection(&self) -> &Connection<S> {
        &self.connection
    }

    /// Send one request and decode its acknowledgement
    ///
    /// With `multiline` unset, at most one data line is accepted.
    pub fn send_command(&mut self, request: &Request, multiline: bool) -> Result<Reply> {
        self.transact(request)?.into_reply(multiline)
    }

    /// Exchange one request for its decoded, acknowledged response
    fn transact(&mut self, request: &Request) -> Result<Response> {
        let encoded = request.encode()?;
        self.observer.on_request(&request.text());

        let raw = self.connection.exchange_encoded(&encoded)?;
        self.observer.on_response(&String::from_utf8_lossy(&raw));

        decode_response(&raw).map_err(|e| {
            if let LogicError::Command { .. } = e {
                tracing::debug!("{} rejected by server", request.name());
            }
            e
        })
    }

    /// Send a request that must produce exactly one data line
    ///
    /// Returns the line along with the raw response text, which decode
    /// errors further up report.
    pub(crate) fn query_line(&mut self, request: Request) -> Result<(Vec<String>, String)> {
        let response = self.transact(&request)?;
        let raw = response.raw.clone();
        match response.into_reply(false)? {
            Reply::Line(line) => Ok((line, raw)),
            _ => Err(LogicError::invalid_response("expected 1 line, got 0", raw)),
        }
    }

    /// Send a request whose data lines (if any) are ignored
    pub(crate) fn execute(&mut self, request: Request) -> Result<()> {
        self.send_command(&request, false)?;
        Ok(())
    }

    /// Send a request and collect every data line, with the raw response text
    pub(crate) fn query_lines(&mut self, request: Request) -> Result<(Vec<Vec<String>>, String)> {
        let response = self.transact(&request)?;
        let raw = response.raw.clone();
        Ok((response.into_reply(true)?.into_lines(), raw))
    }
}
