pub mod command;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;

pub use command::Command;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SUGGEST_URL: &str = "http://localhost:5000";
pub const SESSION_COOKIE: &str = "JSESSIONID";

#[derive(Debug, Clone, Parser, Default)]
#[command(name = "mini-twitter", about = "A terminal client for Mini Twitter")]
pub struct Config {
    /// Origin of the Mini Twitter backend
    #[arg(long, env = "API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Origin of the hashtag suggestion service
    #[arg(long, env = "SUGGEST_URL", default_value = DEFAULT_SUGGEST_URL)]
    suggest_url: String,
    /// Your `JSESSIONID` cookie, reused instead of logging in
    #[arg(long, env = "SESSION")]
    session: Option<String>,
    /// Log in with this username before running a command
    #[arg(short, long, env = "MINI_TWITTER_USERNAME")]
    username: Option<String>,
    /// Password used together with `--username`
    #[arg(short, long, env = "MINI_TWITTER_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Limit request concurrency
    #[arg(long, default_value = "5")]
    limit: usize,
    /// Retry transient failures this many times
    #[arg(long, default_value = "0")]
    retries: u32,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
    #[command(subcommand)]
    command: Option<Command>,
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Configuration pointing at `base_url` with every other option at its default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            suggest_url: DEFAULT_SUGGEST_URL.to_string(),
            limit: 5,
            ..Default::default()
        }
    }
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
    pub fn with_suggest_url(mut self, suggest_url: impl Into<String>) -> Self {
        self.suggest_url = suggest_url.into();
        self
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
    pub fn suggest_url(&self) -> &str {
        &self.suggest_url
    }
    /// Get the session cookie
    pub fn session(&self) -> Option<String> {
        let session = self.session.as_deref()?.trim();
        if session.is_empty() {
            None
        } else if session.starts_with(&format!("{SESSION_COOKIE}=")) {
            Some(session.to_string())
        } else {
            Some(format!("{SESSION_COOKIE}={session}"))
        }
    }
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }
    pub const fn limit(&self) -> usize {
        self.limit
    }
    pub const fn retries(&self) -> u32 {
        self.retries
    }
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }
}
