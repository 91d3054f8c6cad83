//! Run sequencing: selector parsing and the fetch → extract → write →
//! reload pipeline.

use anyhow::{Context as _, Result};
use clap::CommandFactory;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::cmd::RealCommandExecutor;
use crate::config::Config;
use crate::error::SyncError;
use crate::extractor;
use crate::fetcher::Fetcher;
use crate::providers::{Provider, CLOUDFLARE, GCORE};
use crate::reloader::Reloader;
use crate::writer;

/// Independent intents derived from the selector tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intents {
    pub cloudflare: bool,
    pub gcore: bool,
    pub reload: bool,
    pub help: bool,
}

impl Intents {
    fn all() -> Self {
        Self {
            cloudflare: true,
            gcore: true,
            reload: true,
            help: false,
        }
    }

    fn none() -> Self {
        Self {
            cloudflare: false,
            gcore: false,
            reload: false,
            help: false,
        }
    }

    /// Map selector tokens to intents. An empty token list means `all`;
    /// any unknown token is an error, raised before any network call.
    pub fn from_tokens(tokens: &[String]) -> Result<Self, SyncError> {
        if tokens.is_empty() {
            return Ok(Self::all());
        }

        let mut intents = Self::none();
        for token in tokens {
            match token.as_str() {
                "all" => {
                    intents.cloudflare = true;
                    intents.gcore = true;
                    intents.reload = true;
                }
                "cloudflare" => intents.cloudflare = true,
                "gcore" => intents.gcore = true,
                "reload" => intents.reload = true,
                "help" => intents.help = true,
                other => return Err(SyncError::Selector(other.to_string())),
            }
        }
        Ok(intents)
    }

    fn any_fetch(&self) -> bool {
        self.cloudflare || self.gcore
    }
}

/// Execute one full run. Fetch/extract/write failures abort the run;
/// reload failures are per-service and do not affect the exit code.
pub async fn run(cli: &Cli) -> Result<()> {
    let intents = Intents::from_tokens(&cli.selectors)?;

    if intents.help {
        Cli::command().print_long_help()?;
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli);
    config.validate()?;

    if intents.any_fetch() {
        writer::ensure_dir(&config.dir)?;
        let fetcher = Fetcher::new()?;

        if intents.cloudflare {
            sync_provider(&fetcher, &CLOUDFLARE, &config.dir, &config.cloudflare_file).await?;
        }
        if intents.gcore {
            sync_provider(&fetcher, &GCORE, &config.dir, &config.gcore_file).await?;
        }
    }

    if intents.reload {
        let executor = RealCommandExecutor::new();
        let failures = Reloader::new(&executor).reload_all(&config.services);
        if failures > 0 {
            warn!("{failures} service reload(s) failed");
        }
    }

    Ok(())
}

/// Fetch every source URL of a provider, extract the addresses, and write
/// the combined list. Source order is preserved.
async fn sync_provider(
    fetcher: &Fetcher,
    provider: &Provider,
    dir: &Path,
    filename: &str,
) -> Result<()> {
    info!("Fetching {} ranges...", provider.name);

    let mut entries = Vec::new();
    for url in provider.urls {
        let body = fetcher
            .fetch(url)
            .await
            .with_context(|| format!("Failed to fetch {} list", provider.name))?;
        entries.extend(extractor::extract(provider.name, &body, provider.strategy)?);
    }

    let written = writer::write_list(dir, filename, &entries)?;
    info!(
        "Wrote {written} {} entries to {}",
        provider.name,
        dir.join(filename).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_tokens_default_to_all() {
        let intents = Intents::from_tokens(&[]).unwrap();
        assert_eq!(intents, Intents::all());
    }

    #[test]
    fn test_single_selectors_set_only_their_intent() {
        let cf = Intents::from_tokens(&tokens(&["cloudflare"])).unwrap();
        assert!(cf.cloudflare && !cf.gcore && !cf.reload);

        let gc = Intents::from_tokens(&tokens(&["gcore"])).unwrap();
        assert!(!gc.cloudflare && gc.gcore && !gc.reload);

        let rl = Intents::from_tokens(&tokens(&["reload"])).unwrap();
        assert!(!rl.cloudflare && !rl.gcore && rl.reload);
        assert!(!rl.any_fetch());
    }

    #[test]
    fn test_selectors_combine() {
        let intents = Intents::from_tokens(&tokens(&["cloudflare", "reload"])).unwrap();
        assert!(intents.cloudflare && !intents.gcore && intents.reload);
    }

    #[test]
    fn test_explicit_all_token() {
        let intents = Intents::from_tokens(&tokens(&["all"])).unwrap();
        assert_eq!(intents, Intents::all());
    }

    #[test]
    fn test_single_non_all_selector_does_not_default() {
        // `all` semantics only apply to an empty argument list
        let intents = Intents::from_tokens(&tokens(&["gcore"])).unwrap();
        assert_ne!(intents, Intents::all());
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let result = Intents::from_tokens(&tokens(&["cloudfront"]));
        match result {
            Err(SyncError::Selector(token)) => assert_eq!(token, "cloudfront"),
            other => panic!("Expected Selector error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_token_rejected_even_among_valid_ones() {
        assert!(Intents::from_tokens(&tokens(&["cloudflare", "bogus"])).is_err());
    }

    #[test]
    fn test_help_token() {
        let intents = Intents::from_tokens(&tokens(&["help"])).unwrap();
        assert!(intents.help);
        assert!(!intents.any_fetch());
        assert!(!intents.reload);
    }

    #[test]
    fn test_duplicate_tokens_are_idempotent() {
        let intents = Intents::from_tokens(&tokens(&["reload", "reload"])).unwrap();
        assert!(intents.reload && !intents.any_fetch());
    }
}
