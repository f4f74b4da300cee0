//! # logicwire
//!
//! A client for the scripting socket of a logic analyzer control application:
//! - Comma-delimited, NUL-terminated requests
//! - Newline-separated responses ending in an `ACK`/`NAK` status token
//! - Typed commands with local argument validation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Command Layer                           │
//! │        (validate args, pick line mode, decode result)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Framing Layer                            │
//! │      (encode, send, read until framed, ACK/NAK check)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Connection (TcpStream)                      │
//! │                 one request in flight                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use logicwire::Client;
//!
//! # fn main() -> logicwire::Result<()> {
//! let mut client = Client::connect("127.0.0.1", 10429)?;
//! client.set_performance_option(33)?;
//! for rate in client.get_available_sample_rates()? {
//!     println!("{} / {}", rate.digital, rate.analog);
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LogicError, Result};
pub use config::{Config, Framing};
pub use client::{
    ActiveChannels, Analyzer, Client, Device, Observer, PerformanceOption,
    PretriggerBufferSize, SampleRate, SharedClient, TracingObserver, TriggerMode,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of logicwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
