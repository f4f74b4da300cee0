//! Typed command arguments and results
//!
//! Validation for arguments lives in the `FromStr`/`TryFrom` impls so it
//! runs before anything touches the socket.

use std::fmt;
use std::str::FromStr;

use crate::error::{LogicError, Result};

/// Per-channel trigger condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// Channel does not participate (sent as an empty field)
    #[default]
    Ignore,
    High,
    Low,
    NegEdge,
    PosEdge,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerMode::Ignore => "",
            TriggerMode::High => "high",
            TriggerMode::Low => "low",
            TriggerMode::NegEdge => "negedge",
            TriggerMode::PosEdge => "posedge",
        }
    }
}

impl FromStr for TriggerMode {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(TriggerMode::Ignore),
            "high" => Ok(TriggerMode::High),
            "low" => Ok(TriggerMode::Low),
            "negedge" => Ok(TriggerMode::NegEdge),
            "posedge" => Ok(TriggerMode::PosEdge),
            _ => Err(LogicError::argument("trigger mode", s)),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance level, as a percentage of USB bandwidth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceOption {
    Twenty,
    TwentyFive,
    ThirtyThree,
    Fifty,
    OneHundred,
}

impl PerformanceOption {
    pub const ALL: [PerformanceOption; 5] = [
        PerformanceOption::Twenty,
        PerformanceOption::TwentyFive,
        PerformanceOption::ThirtyThree,
        PerformanceOption::Fifty,
        PerformanceOption::OneHundred,
    ];

    pub fn percent(&self) -> u32 {
        match self {
            PerformanceOption::Twenty => 20,
            PerformanceOption::TwentyFive => 25,
            PerformanceOption::ThirtyThree => 33,
            PerformanceOption::Fifty => 50,
            PerformanceOption::OneHundred => 100,
        }
    }
}

impl TryFrom<u32> for PerformanceOption {
    type Error = LogicError;

    fn try_from(value: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.percent() == value)
            .ok_or_else(|| LogicError::argument("performance option", value))
    }
}

/// Capture history kept before the trigger fires, in samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PretriggerBufferSize {
    OneMillion,
    TenMillion,
    HundredMillion,
    OneBillion,
}

impl PretriggerBufferSize {
    pub const ALL: [PretriggerBufferSize; 4] = [
        PretriggerBufferSize::OneMillion,
        PretriggerBufferSize::TenMillion,
        PretriggerBufferSize::HundredMillion,
        PretriggerBufferSize::OneBillion,
    ];

    pub fn samples(&self) -> u64 {
        match self {
            PretriggerBufferSize::OneMillion => 1_000_000,
            PretriggerBufferSize::TenMillion => 10_000_000,
            PretriggerBufferSize::HundredMillion => 100_000_000,
            PretriggerBufferSize::OneBillion => 1_000_000_000,
        }
    }
}

impl TryFrom<u64> for PretriggerBufferSize {
    type Error = LogicError;

    fn try_from(value: u64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.samples() == value)
            .ok_or_else(|| LogicError::argument("pretrigger buffer size", value))
    }
}

/// One digital/analog sample rate combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRate {
    pub digital: u64,
    pub analog: u64,
}

impl SampleRate {
    pub(crate) fn from_fields(fields: &[String], raw: &str) -> Result<Self> {
        match fields {
            [digital, analog] => Ok(Self {
                digital: parse_field(digital, "digital sample rate", raw)?,
                analog: parse_field(analog, "analog sample rate", raw)?,
            }),
            _ => Err(LogicError::invalid_response(
                format!("expected 2 sample rate fields, got {}", fields.len()),
                raw,
            )),
        }
    }
}

/// Active channel sets, in the order the server lists them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveChannels {
    pub digital: Vec<u32>,
    pub analog: Vec<u32>,
}

pub(crate) const DIGITAL_MARKER: &str = "digital_channels";
pub(crate) const ANALOG_MARKER: &str = "analog_channels";

impl ActiveChannels {
    /// Split a token line on the `digital_channels`/`analog_channels` markers
    pub(crate) fn from_fields(fields: &[String], raw: &str) -> Result<Self> {
        let mut channels = ActiveChannels::default();
        let mut current: Option<&mut Vec<u32>> = None;

        for field in fields {
            match field.as_str() {
                DIGITAL_MARKER => current = Some(&mut channels.digital),
                ANALOG_MARKER => current = Some(&mut channels.analog),
                token => {
                    let channel = parse_field(token, "channel", raw)?;
                    match current.as_deref_mut() {
                        Some(group) => group.push(channel),
                        None => {
                            return Err(LogicError::invalid_response(
                                "channel listed before a channel group marker",
                                raw,
                            ))
                        }
                    }
                }
            }
        }

        Ok(channels)
    }
}

/// A device entry from the connected-devices listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Raw fields as sent by the server
    pub fields: Vec<String>,

    /// Whether this is the device selected for capture
    pub active: bool,
}

const ACTIVE_MARKER: &str = "ACTIVE";

impl Device {
    pub(crate) fn from_fields(fields: Vec<String>) -> Self {
        let active = fields.last().map(|f| f == ACTIVE_MARKER).unwrap_or(false);
        Self { fields, active }
    }

    /// 1-based index accepted by `select_active_device`
    pub fn index(&self) -> Option<u32> {
        self.fields.first().and_then(|f| f.trim().parse().ok())
    }

    /// Device name, when the server lists one
    pub fn name(&self) -> Option<&str> {
        self.fields.get(1).map(String::as_str)
    }
}

/// An analyzer attached to the current capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analyzer {
    pub label: String,
    pub index: u32,
}

impl Analyzer {
    /// The last field is the index; everything before it is the label
    pub(crate) fn from_fields(fields: &[String], raw: &str) -> Result<Self> {
        match fields.split_last() {
            Some((index, label)) if !label.is_empty() => Ok(Self {
                label: label.join(", "),
                index: parse_field(index, "analyzer index", raw)?,
            }),
            _ => Err(LogicError::invalid_response(
                format!("expected label and index, got {} fields", fields.len()),
                raw,
            )),
        }
    }
}

/// Parse one response field, reporting the raw response on failure
pub(crate) fn parse_field<T: FromStr>(field: &str, what: &str, raw: &str) -> Result<T> {
    field.trim().parse().map_err(|_| {
        LogicError::invalid_response(
            format!("{} {:?} is not an integer", what, field),
            raw,
        )
    })
}

/// Parse a boolean-like status token
pub(crate) fn parse_flag(field: &str, raw: &str) -> Result<bool> {
    match field.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(LogicError::invalid_response(
            format!("{:?} is not a boolean", field),
            raw,
        )),
    }
}
