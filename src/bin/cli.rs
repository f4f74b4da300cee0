//! logicwire CLI Client
//!
//! Command-line interface for driving the analyzer application over its
//! scripting socket.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logicwire::{Client, Config, Framing};
use tracing_subscriber::{fmt, EnvFilter};

/// logicwire CLI
#[derive(Parser, Debug)]
#[command(name = "logicwire-cli")]
#[command(about = "CLI for the logic analyzer scripting socket")]
#[command(version)]
struct Args {
    /// Analyzer application host
    #[arg(long, default_value = logicwire::config::DEFAULT_HOST)]
    host: String,

    /// Scripting socket port
    #[arg(short, long, default_value_t = logicwire::config::DEFAULT_PORT)]
    port: u16,

    /// Read/write timeout in milliseconds (0 waits forever)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    /// Read until an ACK/NAK line instead of until a short read
    #[arg(long)]
    status_framing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configure the trigger, one mode per channel (high, low, negedge, posedge, or "")
    SetTrigger {
        modes: Vec<String>,
    },

    /// Set the number of samples to capture
    SetNumSamples {
        samples: u64,
    },

    /// Set the digital and analog sample rates
    SetSampleRate {
        digital: u64,
        analog: u64,
    },

    /// List available digital/analog sample rate pairs
    SampleRates,

    /// Show the performance option
    GetPerformance,

    /// Set the performance option (20, 25, 33, 50, 100)
    SetPerformance {
        value: u32,
    },

    /// Show the pretrigger buffer size
    GetPretrigger,

    /// Set the pretrigger buffer size (1000000, 10000000, 100000000, 1000000000)
    SetPretrigger {
        value: u64,
    },

    /// List connected devices
    Devices,

    /// Select the capture device (1-based index)
    SelectDevice {
        index: u32,
    },

    /// Show the active channels
    GetChannels,

    /// Set the active channels
    SetChannels {
        /// Digital channel numbers
        #[arg(short, long, value_delimiter = ',')]
        digital: Vec<u32>,

        /// Analog channel numbers
        #[arg(short, long, value_delimiter = ',')]
        analog: Vec<u32>,
    },

    /// Make every channel active
    ResetChannels,

    /// Start a capture, optionally saving it to a file
    Capture {
        path: Option<PathBuf>,
    },

    /// Report whether processing has finished
    ProcessingComplete,

    /// Save the current capture
    Save {
        path: PathBuf,
    },

    /// Load a capture
    Load {
        path: PathBuf,
    },

    /// Export capture data
    Export {
        path: PathBuf,
    },

    /// List analyzers
    Analyzers,

    /// Export analyzer results
    ExportAnalyzer {
        index: u32,
        path: PathBuf,

        /// Also print the results piped back over the socket
        #[arg(long)]
        pipe: bool,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let framing = if args.status_framing {
        Framing::StatusLine
    } else {
        Framing::default()
    };
    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .framing(framing)
        .build();

    let mut client = match Client::with_config(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to connect to {}:{}: {}", args.host, args.port, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut client, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(client: &mut Client, command: Commands) -> logicwire::Result<()> {
    match command {
        Commands::SetTrigger { modes } => client.set_trigger(modes.as_slice())?,
        Commands::SetNumSamples { samples } => client.set_number_of_samples(samples)?,
        Commands::SetSampleRate { digital, analog } => client.set_sample_rate(digital, analog)?,
        Commands::SampleRates => {
            for rate in client.get_available_sample_rates()? {
                println!("{}\t{}", rate.digital, rate.analog);
            }
        }
        Commands::GetPerformance => println!("{}", client.get_performance_option()?),
        Commands::SetPerformance { value } => client.set_performance_option(value)?,
        Commands::GetPretrigger => println!("{}", client.get_capture_pretrigger_buffer_size()?),
        Commands::SetPretrigger { value } => client.set_capture_pretrigger_buffer_size(value)?,
        Commands::Devices => {
            for device in client.get_connected_devices()? {
                let marker = if device.active { "*" } else { " " };
                println!("{} {}", marker, device.fields.join(", "));
            }
        }
        Commands::SelectDevice { index } => client.select_active_device(index)?,
        Commands::GetChannels => {
            let channels = client.get_active_channels()?;
            println!("digital: {:?}", channels.digital);
            println!("analog: {:?}", channels.analog);
        }
        Commands::SetChannels { digital, analog } => {
            client.set_active_channels(&digital, &analog)?
        }
        Commands::ResetChannels => client.reset_active_channels()?,
        Commands::Capture { path: Some(path) } => client.capture_to_file(path)?,
        Commands::Capture { path: None } => client.capture()?,
        Commands::ProcessingComplete => println!("{}", client.is_processing_complete()?),
        Commands::Save { path } => client.save_to_file(path)?,
        Commands::Load { path } => client.load_from_file(path)?,
        Commands::Export { path } => client.export_data(path)?,
        Commands::Analyzers => {
            for analyzer in client.get_analyzers()? {
                println!("{}\t{}", analyzer.index, analyzer.label);
            }
        }
        Commands::ExportAnalyzer { index, path, pipe } => {
            if let Some(lines) = client.export_analyzers(index, path, pipe)? {
                for line in lines {
                    println!("{}", line.join(", "));
                }
            }
        }
    }

    tracing::debug!("Command acknowledged");
    Ok(())
}
