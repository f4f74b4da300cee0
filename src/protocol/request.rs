//! Request definitions
//!
//! A request is a command name followed by positional arguments, each
//! rendered with `Display`.

use std::fmt;

use crate::error::{LogicError, Result};
use super::{FIELD_SEPARATOR, REQUEST_TERMINATOR};

/// One outbound command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    name: String,
    args: Vec<String>,
}

impl Request {
    /// Start a request for the given command name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append one positional argument
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Append several positional arguments in order
    pub fn args<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        self.args.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    /// Command name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stringified arguments
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Request text without the NUL terminator (for logging)
    pub fn text(&self) -> String {
        let mut text = self.name.clone();
        for arg in &self.args {
            text.push(FIELD_SEPARATOR);
            text.push_str(arg);
        }
        text
    }

    /// Encode to wire bytes: fields joined by `,` plus one trailing NUL
    pub fn encode(&self) -> Result<Vec<u8>> {
        check_field(&self.name)?;
        for arg in &self.args {
            check_field(arg)?;
        }

        let mut bytes = self.text().into_bytes();
        bytes.push(REQUEST_TERMINATOR);
        Ok(bytes)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A field must be ASCII and free of the separator and terminator
fn check_field(field: &str) -> Result<()> {
    if !field.is_ascii() {
        return Err(LogicError::Encoding(format!(
            "field {:?} is not representable in ASCII",
            field
        )));
    }
    if field.contains(FIELD_SEPARATOR) {
        return Err(LogicError::Encoding(format!(
            "field {:?} contains the field separator",
            field
        )));
    }
    if field.bytes().any(|b| b == REQUEST_TERMINATOR) {
        return Err(LogicError::Encoding(format!(
            "field {:?} contains an embedded NUL",
            field
        )));
    }
    Ok(())
}
