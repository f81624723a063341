use clap::{Args, Parser, Subcommand};
use linkshort_core::ExpiryOption;
use linkshort_redirect::RedirectPolicy;
use std::time::Duration;
use url::Url;

pub const BASE_URL_ENV: &str = "LINKSHORT_BASE_URL";
pub const TIMEOUT_SECS_ENV: &str = "LINKSHORT_TIMEOUT_SECS";
pub const COUNTDOWN_SECS_ENV: &str = "LINKSHORT_COUNTDOWN_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: &str = "10";
pub const DEFAULT_COUNTDOWN_SECS: &str = "5";

#[derive(Debug, Parser)]
#[command(name = "linkshort", version, about = "Shorten links and follow short links")]
pub struct CLI {
    /// Server root; `/api/v1` is appended.
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    #[arg(long, global = true, env = TIMEOUT_SECS_ENV, default_value = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: CommandArg,
}

impl CLI {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Subcommand)]
pub enum CommandArg {
    /// Resolve a short code and redirect to its destination.
    Open(OpenArgs),
    /// Create a short link.
    Shorten(ShortenArgs),
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Short code, or a full short URL.
    pub code: String,

    #[arg(long, env = COUNTDOWN_SECS_ENV, default_value = DEFAULT_COUNTDOWN_SECS)]
    pub countdown_secs: u32,

    /// Redirect after a short fixed delay without a cancellable countdown.
    #[arg(long)]
    pub no_cancel: bool,
}

impl OpenArgs {
    pub fn policy(&self) -> RedirectPolicy {
        if self.no_cancel {
            RedirectPolicy::immediate()
        } else {
            RedirectPolicy::builder()
                .countdown_seconds(self.countdown_secs)
                .build()
        }
    }
}

#[derive(Debug, Args)]
pub struct ShortenArgs {
    pub url: Url,

    /// One of never, 10m, 1h, 3h, 1d, 3d, 1w, 2w, 1mo.
    #[arg(long, default_value_t = ExpiryOption::Never)]
    pub expiry: ExpiryOption,
}
