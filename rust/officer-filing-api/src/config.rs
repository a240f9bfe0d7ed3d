use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Process configuration, read from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "officer-filing-api")]
#[command(bin_name = "officer-filing-api")]
#[command(about = "Officer filing API", long_about = None)]
pub struct ApiConfig {
    /// Address to listen on.
    #[arg(long, env = "OFFICER_FILING_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Base URL of the transaction service.
    #[arg(long, env = "API_URL", default_value = "http://localhost:18201")]
    pub transactions_url: Url,

    /// JSON file of `{ "key": "message" }` overriding built-in messages.
    #[arg(long, env = "OFFICER_FILING_MESSAGES")]
    pub messages: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `officer_filing_admission=debug`.
    #[arg(long, env = "OFFICER_FILING_LOG", default_value = "info")]
    pub log_level: String,

    /// Timeout for outbound requests, in seconds.
    #[arg(long, env = "OFFICER_FILING_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}
