//! # cdnsync - CDN IP range sync for proxies and firewalls
//!
//! Downloads the published IP ranges of Cloudflare and Gcore, writes them
//! one entry per line into a managed directory, and gracefully reloads the
//! services that consume them. One invocation is one run: fetch → extract →
//! persist → reload, fully sequential, fail-fast on fetch/parse/write
//! errors, per-service tolerant on reload errors.
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`cmd`] - Command execution abstraction (systemctl seam)
//! - [`config`] - Configuration parsing, defaults and validation
//! - [`error`] - Error taxonomy
//! - [`extractor`] - Structured and pattern-based address extraction
//! - [`fetcher`] - HTTP client for provider endpoints
//! - [`logging`] - Console + syslog sinks
//! - [`orchestrator`] - Selector parsing and run sequencing
//! - [`providers`] - Static provider descriptors
//! - [`reloader`] - Graceful service reloads
//! - [`writer`] - Atomic range-file persistence

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod orchestrator;
pub mod providers;
pub mod reloader;
pub mod writer;

pub use cli::Cli;
pub use config::Config;
pub use error::SyncError;
