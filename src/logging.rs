//! Logging setup: console plus the host syslog facility.
//!
//! Every event goes to stderr through `tracing_subscriber::fmt` and is
//! mirrored to syslog tagged `cdnsync`. Syslog being unavailable (e.g. in a
//! container without /dev/log) degrades silently to console-only.

use std::fmt::Write as _;
use std::sync::Mutex;

use syslog::{Facility, Formatter3164, Logger, LoggerBackend};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Tag used for every syslog line
const SYSLOG_TAG: &str = "cdnsync";

/// Initialize the global subscriber. Call once, before any logging.
pub fn init(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::from_level(level));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(SyslogLayer::connect().map(|l| l.with_filter(LevelFilter::from_level(level))))
        .init();
}

/// Forwards tracing events to the local syslog daemon.
pub struct SyslogLayer {
    logger: Mutex<Logger<LoggerBackend, Formatter3164>>,
}

impl SyslogLayer {
    /// Connect to the local syslog socket. None when unavailable.
    pub fn connect() -> Option<Self> {
        let formatter = Formatter3164 {
            facility: Facility::LOG_DAEMON,
            hostname: None,
            process: SYSLOG_TAG.to_string(),
            pid: std::process::id(),
        };
        syslog::unix(formatter).ok().map(|logger| Self {
            logger: Mutex::new(logger),
        })
    }
}

impl<S: Subscriber> Layer<S> for SyslogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        if message.is_empty() {
            return;
        }

        let Ok(mut logger) = self.logger.lock() else {
            return;
        };
        // Syslog write failures are deliberately ignored: the console sink
        // already carries the line.
        let _ = match *event.metadata().level() {
            Level::ERROR => logger.err(&message),
            Level::WARN => logger.warning(&message),
            Level::INFO => logger.info(&message),
            _ => logger.debug(&message),
        };
    }
}

/// Collects the `message` field of an event into a plain string
struct MessageVisitor<'a>(&'a mut String);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }
}
