use clap::{Args, Parser, Subcommand, ValueEnum};
use logscan_config::{LogKind, LogscanConfig, DEFAULT_WINDOW_SECS};
use logscan_core::{HarvestResult, TimeWindow};
use std::path::PathBuf;

/// Command-line arguments for logscan
#[derive(Parser, Debug, Clone)]
#[command(
    name = "logscan",
    version,
    about = "Harvest an account's program logs for a time window",
    long_about = "logscan locates the block closest to the end of a time window, walks an account's \
                  transaction history backward until the window start is crossed, and writes the \
                  selected log lines in timestamp order. The decode subcommand turns harvested \
                  `Program data:` payloads into readable events."
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log every harvested line and per-fetch progress
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Diagnostic output format on stderr
    #[arg(long = "log-format", value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Harvest log lines for an account and time window
    Harvest(HarvestArgs),
    /// Decode harvested event payloads with an IDL
    Decode(DecodeArgs),
}

/// Arguments of `logscan harvest`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct HarvestArgs {
    /// Account whose history is scanned
    #[arg(short = 'a', long = "account", value_name = "ADDRESS")]
    pub account: String,

    /// RPC endpoint [default: https://api.mainnet-beta.solana.com]
    #[arg(short = 'u', long = "url", value_name = "URL", env = "LOGSCAN_RPC_URL")]
    pub url: Option<String>,

    /// Window start, unix seconds [default: end time minus ten minutes]
    #[arg(short = 's', long = "start-time", value_name = "SECONDS", allow_negative_numbers = true)]
    pub start_time: Option<i64>,

    /// Window end, unix seconds [default: now]
    #[arg(short = 'e', long = "end-time", value_name = "SECONDS", allow_negative_numbers = true)]
    pub end_time: Option<i64>,

    /// Keep only lines containing this text
    #[arg(short = 'f', long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Write the report here instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Signatures requested per page [default: 1000]
    #[arg(short = 'l', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Which log lines to keep [default: any]
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: Option<KindArg>,

    /// Transaction fetches allowed at once [default: 64]
    #[arg(long = "max-concurrency", value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Drop records outside the window
    #[arg(long = "clip-to-window")]
    pub clip_to_window: bool,
}

/// Arguments of `logscan decode`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DecodeArgs {
    /// Anchor-style IDL describing the program's events
    #[arg(long = "idl", value_name = "FILE")]
    pub idl: PathBuf,

    /// Event to keep
    #[arg(short = 'n', long = "event-name", value_name = "NAME")]
    pub event_name: String,

    /// Harvested report to read
    #[arg(short = 'i', long = "input", value_name = "FILE", default_value = "output.txt")]
    pub input: PathBuf,

    /// Event report to write
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = "events.txt")]
    pub output: PathBuf,

    /// Field holding the `{ mantissa, scale }` value
    #[arg(long = "value-field", value_name = "FIELD", default_value = "value")]
    pub value_field: String,

    /// Field holding the event's unix timestamp
    #[arg(long = "timestamp-field", value_name = "FIELD", default_value = "timestamp")]
    pub timestamp_field: String,
}

/// Log line selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// Every line, unchanged
    Any,
    /// `Program log:` lines, prefix removed
    Log,
    /// `Program data:` lines, prefix removed
    Data,
}

impl From<KindArg> for LogKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Any => LogKind::Any,
            KindArg::Log => LogKind::Log,
            KindArg::Data => LogKind::Data,
        }
    }
}

/// Diagnostic output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl HarvestArgs {
    /// Applies flag overrides on top of file or default configuration.
    pub fn apply_to(&self, config: &mut LogscanConfig) {
        if let Some(url) = &self.url {
            config.rpc.url = url.clone();
        }
        if let Some(limit) = self.limit {
            config.harvest.page_limit = limit;
        }
        if let Some(kind) = self.kind {
            config.harvest.log_kind = kind.into();
        }
        if let Some(max) = self.max_concurrency {
            config.harvest.max_concurrency = max;
        }
        if self.clip_to_window {
            config.harvest.clip_to_window = true;
        }
    }

    /// Resolves the time window relative to `now`.
    pub fn window(&self, now: i64) -> HarvestResult<TimeWindow> {
        let end = self.end_time.unwrap_or(now);
        let start = self
            .start_time
            .unwrap_or_else(|| end.saturating_sub(DEFAULT_WINDOW_SECS));
        TimeWindow::new(start, end)
    }

    /// Substring filter; empty keeps every line.
    pub fn needle(&self) -> &str {
        self.filter.as_deref().unwrap_or_default()
    }
}
