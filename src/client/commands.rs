//! Command layer
//!
//! One method per scripting-socket command. Each validates its arguments,
//! sends the request, and decodes the reply into a typed value.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{LogicError, Result};
use crate::protocol::Request;
use super::types::{
    parse_field, parse_flag, ActiveChannels, Analyzer, Device, PerformanceOption,
    PretriggerBufferSize, SampleRate, TriggerMode, ANALOG_MARKER, DIGITAL_MARKER,
};
use super::Client;

/// Third argument to `export_analyzers` that pipes results back over the socket
const PIPE_RESULT_FLAG: &str = "extra_parameter";

impl<S: Read + Write> Client<S> {
    // =========================================================================
    // Trigger
    // =========================================================================

    /// Configure the trigger from per-channel mode strings
    ///
    /// Accepted modes: empty, `high`, `low`, `negedge`, `posedge`.
    pub fn set_trigger<T: AsRef<str>>(&mut self, channels: &[T]) -> Result<()> {
        let modes = channels
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                let mode = mode.as_ref();
                mode.parse::<TriggerMode>().map_err(|_| {
                    LogicError::argument(format!("trigger mode for channel {}", i), mode)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.set_trigger_modes(&modes)
    }

    /// Configure the trigger, one mode per channel
    pub fn set_trigger_modes(&mut self, modes: &[TriggerMode]) -> Result<()> {
        if let Some(count) = self.config().channel_count {
            if modes.len() != count {
                return Err(LogicError::argument(
                    format!("trigger channel count (device has {})", count),
                    modes.len(),
                ));
            }
        }

        self.execute(Request::new("set_trigger").args(modes))
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Set the number of samples to capture
    pub fn set_number_of_samples(&mut self, samples: u64) -> Result<()> {
        self.execute(Request::new("set_num_samples").arg(samples))
    }

    /// Set the digital and analog sample rates
    ///
    /// The pair must be one the software lists; see
    /// [`get_available_sample_rates`](Self::get_available_sample_rates).
    pub fn set_sample_rate(&mut self, digital: u64, analog: u64) -> Result<()> {
        self.execute(Request::new("set_sample_rate").arg(digital).arg(analog))
    }

    /// All sample rate combinations for the current performance level and
    /// channel selection
    pub fn get_available_sample_rates(&mut self) -> Result<Vec<SampleRate>> {
        let (lines, raw) = self.query_lines(Request::new("get_all_sample_rates"))?;
        lines
            .iter()
            .map(|line| SampleRate::from_fields(line, &raw))
            .collect()
    }

    pub fn get_performance_option(&mut self) -> Result<u32> {
        let (line, raw) = self.query_line(Request::new("get_performance_option"))?;
        parse_first(&line, "performance option", &raw)
    }

    /// Set the performance level (20, 25, 33, 50 or 100)
    ///
    /// Changes the selected sample rate as a side effect.
    pub fn set_performance_option(&mut self, value: u32) -> Result<()> {
        let option = PerformanceOption::try_from(value)?;
        self.execute(Request::new("set_performance_option").arg(option.percent()))
    }

    pub fn get_capture_pretrigger_buffer_size(&mut self) -> Result<u64> {
        let (line, raw) = self.query_line(Request::new("get_capture_pretrigger_buffer_size"))?;
        parse_first(&line, "pretrigger buffer size", &raw)
    }

    /// Set the pretrigger buffer size (1e6, 1e7, 1e8 or 1e9 samples)
    pub fn set_capture_pretrigger_buffer_size(&mut self, value: u64) -> Result<()> {
        let size = PretriggerBufferSize::try_from(value)?;
        self.execute(Request::new("set_capture_pretrigger_buffer_size").arg(size.samples()))
    }

    // =========================================================================
    // Devices and channels
    // =========================================================================

    /// Devices connected to the computer; the selected one is marked active
    pub fn get_connected_devices(&mut self) -> Result<Vec<Device>> {
        let (lines, _) = self.query_lines(Request::new("get_connected_devices"))?;
        Ok(lines.into_iter().map(Device::from_fields).collect())
    }

    /// Select the capture device by its 1-based index
    pub fn select_active_device(&mut self, device_number: u32) -> Result<()> {
        if device_number == 0 {
            return Err(LogicError::argument("device number (1-based)", device_number));
        }
        self.execute(Request::new("select_active_device").arg(device_number))
    }

    pub fn get_active_channels(&mut self) -> Result<ActiveChannels> {
        let (line, raw) = self.query_line(Request::new("get_active_channels"))?;
        ActiveChannels::from_fields(&line, &raw)
    }

    /// Set the active channels
    ///
    /// Only some devices support this; others answer NAK.
    pub fn set_active_channels(&mut self, digital: &[u32], analog: &[u32]) -> Result<()> {
        let request = Request::new("set_active_channels")
            .arg(DIGITAL_MARKER)
            .args(digital)
            .arg(ANALOG_MARKER)
            .args(analog);
        self.execute(request)
    }

    /// Make every channel of the device active
    pub fn reset_active_channels(&mut self) -> Result<()> {
        self.execute(Request::new("reset_active_channels"))
    }

    // =========================================================================
    // Capture
    // =========================================================================

    pub fn capture(&mut self) -> Result<()> {
        self.execute(Request::new("capture"))
    }

    /// Capture, then save the results to `path`
    ///
    /// The analyzer application needs write permission to `path`; a failed
    /// save comes back as NAK.
    pub fn capture_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path_arg(path.as_ref())?;
        self.execute(Request::new("capture_to_file").arg(path))
    }

    /// Disabled by the server; always fails.
    pub fn get_inputs(&mut self) -> Result<()> {
        Err(LogicError::Unsupported("get_inputs"))
    }

    /// Whether post-capture processing has finished
    ///
    /// Saving and exporting NAK until this returns true.
    pub fn is_processing_complete(&mut self) -> Result<bool> {
        let (line, raw) = self.query_line(Request::new("is_processing_complete"))?;
        match line.first() {
            Some(token) => parse_flag(token, &raw),
            None => Err(LogicError::invalid_response("missing processing flag", raw)),
        }
    }

    // =========================================================================
    // Files
    // =========================================================================

    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path_arg(path.as_ref())?;
        self.execute(Request::new("save_to_file").arg(path))
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path_arg(path.as_ref())?;
        self.execute(Request::new("load_from_file").arg(path))
    }

    /// Export the current capture's data to `path`
    pub fn export_data(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path_arg(path.as_ref())?;
        self.execute(Request::new("export_data").arg(path))
    }

    // =========================================================================
    // Analyzers
    // =========================================================================

    /// Analyzers attached to the capture, with the indexes used to export them
    pub fn get_analyzers(&mut self) -> Result<Vec<Analyzer>> {
        let (lines, raw) = self.query_lines(Request::new("get_analyzers"))?;
        lines
            .iter()
            .map(|line| Analyzer::from_fields(line, &raw))
            .collect()
    }

    /// Export one analyzer's results to `path`
    ///
    /// With `pipe_result`, the results are also sent back over the socket and
    /// returned line by line.
    pub fn export_analyzers(
        &mut self,
        index: u32,
        path: impl AsRef<Path>,
        pipe_result: bool,
    ) -> Result<Option<Vec<Vec<String>>>> {
        let path = path_arg(path.as_ref())?;
        let mut request = Request::new("export_analyzers").arg(index).arg(path);
        if pipe_result {
            request = request.arg(PIPE_RESULT_FLAG);
        }

        let (lines, _) = self.query_lines(request)?;
        Ok(pipe_result.then_some(lines))
    }
}

fn parse_first<T: std::str::FromStr>(line: &[String], what: &str, raw: &str) -> Result<T> {
    match line.first() {
        Some(field) => parse_field(field, what, raw),
        None => Err(LogicError::invalid_response(format!("missing {}", what), raw)),
    }
}

fn path_arg(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        LogicError::Encoding(format!("path {} is not valid text", path.display()))
    })
}
