//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the final plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every stage, selection and collaborator answer
    Full,
    /// Selections and confirmation only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for huddle_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => huddle_domain::OutputFormat::Full,
            OutputFormat::Summary => huddle_domain::OutputFormat::Summary,
            OutputFormat::Json => huddle_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for huddle
#[derive(Parser, Debug)]
#[command(name = "huddle")]
#[command(author, version, about = "Plan a group outing over a shared chat channel")]
#[command(long_about = r#"
Huddle asks a group a sequence of questions over a shared channel and turns
the replies into a plan.

The session has two parts:
1. Connection: members authorize the app; the session starts once enough
   of the roster has connected or the wait times out
2. Stages: preferences, budget, location, restaurant and a final yes/no
   confirmation, each waiting for the whole group or its timeout

The console driver reads stdin. Lines of the form `name: text` are replies
from a group member; `/auth <name> <code>` completes that member's
authorization.

Configuration files are loaded from (in priority order):
1. HUDDLE_* environment variables
2. --config <path>     Explicit config file
3. ./huddle.toml       Project-level config
4. ~/.config/huddle/config.toml   Global config

Example:
  huddle --city Lisbon --roster alice,bob,carol
  huddle --roster alice,bob --no-auth -o json
"#)]
pub struct Cli {
    /// City to plan in
    #[arg(long, value_name = "CITY")]
    pub city: Option<String>,

    /// Expected participants, comma separated
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub roster: Vec<String>,

    /// Channel to run the session in
    #[arg(long, value_name = "CHANNEL")]
    pub channel: Option<String>,

    /// Skip the connection quorum wait
    #[arg(long)]
    pub no_auth: bool,

    /// Per-stage reply timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub stage_timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the JSONL session transcript to this file
    #[arg(long, value_name = "PATH")]
    pub session_log: Option<PathBuf>,
}
