//! Response definitions
//!
//! Represents decoded acknowledgements from the analyzer application.

use std::fmt;
use std::str::FromStr;

use crate::error::{LogicError, Result};

/// Status token ending every response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ack,
    Nak,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ack => "ACK",
            Status::Nak => "NAK",
        }
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(token: &str) -> std::result::Result<Self, Self::Err> {
        match token {
            "ACK" => Ok(Status::Ack),
            "NAK" => Ok(Status::Nak),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An acknowledged response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Full response text as received
    pub raw: String,

    /// Data lines preceding the status token, each split into fields
    pub lines: Vec<Vec<String>>,
}

/// Response payload shaped for the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Single-line request acknowledged with no data
    Empty,

    /// Exactly one data line
    Line(Vec<String>),

    /// Every data line in order (possibly none)
    Lines(Vec<Vec<String>>),
}

impl Response {
    /// Shape the data lines for a single- or multi-line request
    ///
    /// More than one line for a single-line request is a protocol mismatch.
    pub fn into_reply(self, multiline: bool) -> Result<Reply> {
        if multiline {
            return Ok(Reply::Lines(self.lines));
        }

        let Response { raw, mut lines } = self;
        match lines.len() {
            0 => Ok(Reply::Empty),
            1 => Ok(Reply::Line(lines.remove(0))),
            n => Err(LogicError::invalid_response(
                format!("expected 1 line, got {}", n),
                raw,
            )),
        }
    }
}

impl Reply {
    /// Every data line
    pub fn into_lines(self) -> Vec<Vec<String>> {
        match self {
            Reply::Empty => Vec::new(),
            Reply::Line(line) => vec![line],
            Reply::Lines(lines) => lines,
        }
    }
}
