//! Network Module
//!
//! TCP transport to the analyzer application.
//!
//! ## Architecture
//! - One persistent stream per client
//! - Strict request/response, no pipelining
//! - No reconnect: a broken stream fails the next exchange

mod connection;

pub use connection::Connection;
