//! コマンドライン引数とログ設定

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Credentials, Pagination};
use crate::error::ExporterError;
use crate::service::ExportRequest;

/// Simple exporter for listchallenges.com
#[derive(Parser, Debug)]
#[command(name = "exporter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL of the list on listchallenges.com
    #[arg(long)]
    pub list_url: String,

    /// Username to login to listchallenges.com
    #[arg(long, requires = "password")]
    pub username: Option<String>,

    /// Password to login to listchallenges.com
    #[arg(long, requires = "username")]
    pub password: Option<String>,

    /// Enable debug mode (logs to stderr)
    #[arg(long)]
    pub debug: bool,

    /// How to find the last page
    #[arg(long, value_enum, default_value = "count")]
    pub pagination: PaginationArg,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Chrome/Chromium executable
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Seconds to wait for the browser to start
    #[arg(long, default_value = "10")]
    pub launch_timeout_secs: u64,

    /// Seconds to wait for the redirect after login
    #[arg(long, default_value = "10")]
    pub login_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PaginationArg {
    /// Count pager controls
    Count,
    /// Walk until the site redirects back to page 1
    Redirect,
}

impl From<PaginationArg> for Pagination {
    fn from(arg: PaginationArg) -> Self {
        match arg {
            PaginationArg::Count => Pagination::Count,
            PaginationArg::Redirect => Pagination::Redirect,
        }
    }
}

impl Cli {
    pub fn into_request(self) -> Result<ExportRequest, ExporterError> {
        let credentials = Credentials::from_pair(self.username, self.password)?;

        Ok(ExportRequest::new(self.list_url)
            .with_credentials(credentials)
            .with_pagination(self.pagination.into())
            .with_headless(!self.headful)
            .with_debug(self.debug)
            .with_chrome_path(self.chrome_path)
            .with_launch_timeout(Duration::from_secs(self.launch_timeout_secs))
            .with_login_timeout(Duration::from_secs(self.login_timeout_secs)))
    }
}

/// `RUST_LOG` が優先。なければ debug 時のみログを出す
pub fn log_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_directives(debug)))
}

/// ライブラリ (`listchallenges_exporter`) とバイナリ (`exporter`) の両方
fn default_log_directives(debug: bool) -> &'static str {
    if debug {
        "listchallenges_exporter=debug,exporter=debug"
    } else {
        "off"
    }
}
