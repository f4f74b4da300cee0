//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! name[,arg1[,arg2...]]\0
//! ```
//!
//! ### Response
//! ```text
//! field, field, ...\n      (zero or more data lines)
//! field, field, ...\n
//! ACK | NAK                (status token, always last)
//! ```
//!
//! There is no length prefix. Where a response ends is decided by the
//! configured [`Framing`].

use std::io::{ErrorKind, Read, Write};

use bytes::BytesMut;

use crate::config::Framing;
use crate::error::{LogicError, Result};
use super::{Request, Response, Status, RESPONSE_FIELD_SEPARATOR};

/// Read size used while waiting for a status line
const STATUS_LINE_READ_SIZE: usize = 4096;

/// Bytes stripped from the end of a response before splitting into lines
const TRAILING_BYTES: &[char] = &['\0', '\r', '\n'];

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a complete response
///
/// The last line is the status token. `NAK` becomes [`LogicError::Command`],
/// anything other than `ACK` becomes [`LogicError::InvalidResponse`].
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let raw = match std::str::from_utf8(bytes) {
        Ok(text) if text.is_ascii() => text.to_string(),
        _ => {
            return Err(LogicError::invalid_response(
                "response is not ASCII",
                String::from_utf8_lossy(bytes).into_owned(),
            ))
        }
    };

    let body = raw.trim_end_matches(TRAILING_BYTES);
    let mut lines: Vec<&str> = body
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    // split always yields at least one element
    let status = lines.pop().unwrap_or_default();

    match status.parse::<Status>() {
        Ok(Status::Ack) => {}
        Ok(Status::Nak) => return Err(LogicError::Command { raw }),
        Err(()) => {
            return Err(LogicError::invalid_response(
                format!("unknown status token {:?}", status),
                raw,
            ))
        }
    }

    let lines = lines
        .into_iter()
        .map(|line| {
            line.split(RESPONSE_FIELD_SEPARATOR)
                .map(str::to_string)
                .collect::<Vec<String>>()
        })
        .collect();

    Ok(Response { raw, lines })
}

/// Check whether buffered bytes end with a status line
pub fn ends_with_status(bytes: &[u8]) -> bool {
    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b'\0' | b'\r' | b'\n') {
        end -= 1;
    }
    let body = &bytes[..end];

    let last = match body.iter().rposition(|&b| b == b'\n') {
        Some(pos) => &body[pos + 1..],
        None => body,
    };
    last == Status::Ack.as_str().as_bytes() || last == Status::Nak.as_str().as_bytes()
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = request.encode()?;
    write_frame(writer, &bytes)
}

/// Write already-encoded request bytes
///
/// `write_all` retries short writes until the whole request is accepted.
pub fn write_frame<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read the raw bytes of one response from a stream
///
/// Blocks until the framing strategy considers the response complete or the
/// transport fails.
pub fn read_response<R: Read>(reader: &mut R, framing: Framing) -> Result<BytesMut> {
    let buffer = match framing {
        Framing::ShortRead { chunk_size } => read_until_short(reader, chunk_size)?,
        Framing::StatusLine => read_until_status(reader)?,
    };

    if buffer.is_empty() {
        return Err(LogicError::Connection(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            "connection closed before a response was received",
        )));
    }

    Ok(buffer)
}

/// Accumulate chunks until a read returns fewer bytes than `chunk_size`
fn read_until_short<R: Read>(reader: &mut R, chunk_size: usize) -> Result<BytesMut> {
    if chunk_size == 0 {
        return Err(LogicError::Config(
            "short-read chunk size must not be 0".to_string(),
        ));
    }

    let mut buffer = BytesMut::with_capacity(chunk_size);
    let mut chunk = vec![0u8; chunk_size];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        tracing::trace!("Read chunk of {} bytes", n);
        buffer.extend_from_slice(&chunk[..n]);

        if n < chunk_size {
            return Ok(buffer);
        }
    }
}

/// Accumulate reads until the buffer's last line is `ACK` or `NAK`
fn read_until_status<R: Read>(reader: &mut R) -> Result<BytesMut> {
    let mut buffer = BytesMut::with_capacity(STATUS_LINE_READ_SIZE);
    let mut chunk = vec![0u8; STATUS_LINE_READ_SIZE];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            if buffer.is_empty() {
                return Ok(buffer);
            }
            return Err(LogicError::Connection(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!(
                    "connection closed mid-response after {} bytes",
                    buffer.len()
                ),
            )));
        }

        tracing::trace!("Read {} bytes", n);
        buffer.extend_from_slice(&chunk[..n]);

        if ends_with_status(&buffer) {
            return Ok(buffer);
        }
    }
}
