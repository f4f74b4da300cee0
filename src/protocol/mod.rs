//! Protocol Module
//!
//! Defines the text protocol spoken by the analyzer application's
//! scripting socket.
//!
//! ## Request Format
//! ```text
//! ┌─────────┬───┬──────┬───┬──────┬─────┬──────┐
//! │  name   │ , │ arg1 │ , │ arg2 │ ... │  \0  │
//! └─────────┴───┴──────┴───┴──────┴─────┴──────┘
//! ```
//!
//! ## Response Format
//! ```text
//! ┌──────────────────────────────┐
//! │ field, field, ...        \n  │  data line (0..n)
//! ├──────────────────────────────┤
//! │ ACK | NAK                    │  status token
//! └──────────────────────────────┘
//! ```
//!
//! No escaping exists: a field may not contain `,` or NUL.

mod request;
mod response;
mod codec;

pub use request::Request;
pub use response::{Reply, Response, Status};
pub use codec::{decode_response, ends_with_status, read_response, write_frame, write_request};

/// Separator between request fields
pub const FIELD_SEPARATOR: char = ',';

/// Separator between response fields
pub const RESPONSE_FIELD_SEPARATOR: &str = ", ";

/// Terminator appended to every request
pub const REQUEST_TERMINATOR: u8 = 0;
