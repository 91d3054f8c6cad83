//! CLI argument parsing with clap.
//!
//! Selector tokens are plain positionals rather than a clap `ValueEnum` so
//! that an unknown token surfaces as a normal validation error (exit 1)
//! instead of a clap usage error.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cdnsync")]
#[command(version, about = "Sync published CDN IP ranges to local files and reload dependent services")]
pub struct Cli {
    /// What to do: all (default), cloudflare, gcore, reload, help
    pub selectors: Vec<String>,

    /// Target directory for range files
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output filename for the Cloudflare list
    #[arg(long, value_name = "NAME")]
    pub cloudflare_file: Option<String>,

    /// Output filename for the Gcore list
    #[arg(long, value_name = "NAME")]
    pub gcore_file: Option<String>,

    /// Comma-separated list of services to reload
    #[arg(long, value_name = "SVC,SVC", value_delimiter = ',')]
    pub services: Option<Vec<String>>,

    /// Config file path (default: /etc/cdnsync/config.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only, for cron/systemd timer)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}
