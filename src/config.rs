//! Configuration for logicwire
//!
//! Centralized client configuration with defaults matching the analyzer
//! application's scripting socket.

use crate::error::{LogicError, Result};

/// Default host of the scripting socket
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port of the scripting socket
pub const DEFAULT_PORT: u16 = 10429;

/// Read chunk size used by the short-read framing heuristic
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Main configuration for a client instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Remote host running the analyzer application
    pub host: String,

    /// Remote TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------
    /// Read timeout (milliseconds), 0 blocks forever
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds), 0 blocks forever
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm on the socket
    pub nodelay: bool,

    /// How the end of a response is detected
    pub framing: Framing,

    // -------------------------------------------------------------------------
    // Device
    // -------------------------------------------------------------------------
    /// Channel count of the connected device, when known.
    /// `set_trigger` requires exactly this many modes if set.
    pub channel_count: Option<usize>,
}

/// Response framing strategy
///
/// The protocol carries no length prefix, so the client has to guess where a
/// response ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// A read shorter than `chunk_size` ends the response.
    ///
    /// This is what the server expects. A response whose length is an exact
    /// multiple of `chunk_size` leaves the client waiting for a read that never
    /// comes; set a read timeout to turn that hang into an error.
    ShortRead { chunk_size: usize },

    /// Keep reading until the last buffered line is `ACK` or `NAK`.
    ///
    /// The check runs after every read, so a data line that is exactly
    /// `ACK` or `NAK` ends the response early when a read happens to stop
    /// right after it. Command replies never carry such a line; piped
    /// `export_analyzers` output can, and should use `ShortRead` if it might.
    StatusLine,
}

impl Default for Framing {
    fn default() -> Self {
        Framing::ShortRead {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            nodelay: true,
            framing: Framing::default(),
            channel_count: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` string for connecting
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject settings that can never produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(LogicError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(LogicError::Config("port must not be 0".to_string()));
        }
        if let Framing::ShortRead { chunk_size: 0 } = self.framing {
            return Err(LogicError::Config(
                "short-read chunk size must not be 0".to_string(),
            ));
        }
        if self.channel_count == Some(0) {
            return Err(LogicError::Config(
                "channel count must not be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the remote host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the remote port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.config.nodelay = enabled;
        self
    }

    /// Set the response framing strategy
    pub fn framing(mut self, framing: Framing) -> Self {
        self.config.framing = framing;
        self
    }

    /// Set the device channel count used to check trigger arity
    pub fn channel_count(mut self, count: usize) -> Self {
        self.config.channel_count = Some(count);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
