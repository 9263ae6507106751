use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "spikelab",
    version,
    about = "Spike-train alignment and synchrony analysis command-line tool",
    long_about = "Align neural spikes to stimulus onsets, group them into per-unit\n\
                  trains, and detect synchronous spikes across trains.\n\
                  Sessions are read from --data-dir or $SPIKELAB_DATA_DIR."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run alignment and synchrony analysis on one session
    Run(RunArgs),
    /// List available sessions
    Sessions(SessionsArgs),
    /// List the brain areas recorded in a session
    Areas(AreasArgs),
    /// Validate a session's data files
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Session id (e.g. 778240327)
    #[arg(long)]
    pub session: String,

    /// Stimulus protocol (flash or gabor)
    #[arg(long, default_value = "flash")]
    pub stim: String,

    /// Restrict analysis to one brain area (case-insensitive)
    #[arg(long)]
    pub area: Option<String>,

    /// Window start relative to stimulus onset, in seconds
    #[arg(long, default_value_t = -0.1, allow_hyphen_values = true)]
    pub tmin: f64,

    /// Window end relative to stimulus onset, in seconds
    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    pub tmax: f64,

    /// Truncate the selection this many seconds after its first spike
    #[arg(long)]
    pub max_dur: Option<f64>,

    /// Keep only units with strictly more than this many spikes
    #[arg(long, default_value_t = 0)]
    pub min_spikes: usize,

    /// Data directory containing ses-* folders
    #[arg(long, env = "SPIKELAB_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct SessionsArgs {
    /// Data directory containing ses-* folders
    #[arg(long, env = "SPIKELAB_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct AreasArgs {
    /// Session id
    #[arg(long)]
    pub session: String,

    /// Stimulus protocol (flash or gabor)
    #[arg(long, default_value = "flash")]
    pub stim: String,

    /// Data directory containing ses-* folders
    #[arg(long, env = "SPIKELAB_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Session id
    #[arg(long)]
    pub session: String,

    /// Stimulus protocol (flash or gabor)
    #[arg(long, default_value = "flash")]
    pub stim: String,

    /// Data directory containing ses-* folders
    #[arg(long, env = "SPIKELAB_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
