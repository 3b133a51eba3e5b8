use std::path::PathBuf;
use std::time::Duration;

use crate::error::ExporterError;

/// ページ送りの方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// ページャーの要素数からページ数を求めて順に巡回する
    #[default]
    Count,
    /// 最終ページを越えて1ページ目にリダイレクトされるまで巡回する
    Redirect,
}

/// ログイン情報（ユーザー名とパスワードは常にペア）
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// 片方だけ指定された場合はエラー、両方なければ匿名モード
    pub fn from_pair(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Option<Self>, ExporterError> {
        match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok(Some(Self::new(u, p))),
            (None, None) => Ok(None),
            (Some(u), Some(p)) if u.is_empty() && p.is_empty() => Ok(None),
            _ => Err(ExporterError::Config(
                "username と password は両方指定してください".into(),
            )),
        }
    }
}

// パスワードをログに出さない
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub list_url: String,
    pub credentials: Option<Credentials>,
    pub pagination: Pagination,
    pub headless: bool,
    pub debug: bool,
    pub chrome_path: Option<PathBuf>,
    pub launch_timeout: Duration,
    pub login_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            list_url: String::new(),
            credentials: None,
            pagination: Pagination::default(),
            headless: true,
            debug: false,
            chrome_path: None,
            launch_timeout: Duration::from_secs(10),
            login_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl ExporterConfig {
    pub fn new(list_url: impl Into<String>) -> Self {
        Self {
            list_url: list_url.into(),
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_chrome_path(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_path = path;
        self
    }

    pub fn with_launch_timeout(mut self, timeout: Duration) -> Self {
        self.launch_timeout = timeout;
        self
    }

    pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// 末尾の `/` を除いたリストURL
    pub fn base_url(&self) -> &str {
        self.list_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ExporterError> {
        let url = self.base_url();
        if url.is_empty() {
            return Err(ExporterError::Config("list-url が指定されていません".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ExporterError::Config(format!(
                "list-url は http(s) のURLである必要があります: {}",
                url
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(ExporterError::Config("poll_interval は0より大きくしてください".into()));
        }
        Ok(())
    }
}
