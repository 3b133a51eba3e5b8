use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tower::Service;
use tracing::info;

use crate::config::{Credentials, ExporterConfig, Pagination};
use crate::error::ExporterError;
use crate::listchallenges::{ListChallenge, ListChallengesExporter};
use crate::traits::Exporter;

/// エクスポートリクエスト
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub list_url: String,
    pub credentials: Option<Credentials>,
    pub pagination: Pagination,
    pub headless: bool,
    pub debug: bool,
    pub chrome_path: Option<PathBuf>,
    pub launch_timeout: Duration,
    pub login_timeout: Duration,
}

impl ExportRequest {
    pub fn new(list_url: impl Into<String>) -> Self {
        Self {
            list_url: list_url.into(),
            credentials: None,
            pagination: Pagination::default(),
            headless: true,
            debug: false,
            chrome_path: None,
            launch_timeout: Duration::from_secs(10),
            login_timeout: Duration::from_secs(10),
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
}

impl From<ExportRequest> for ExporterConfig {
    fn from(req: ExportRequest) -> Self {
        ExporterConfig::new(req.list_url)
            .with_credentials(req.credentials)
            .with_pagination(req.pagination)
            .with_headless(req.headless)
            .with_debug(req.debug)
            .with_chrome_path(req.chrome_path)
            .with_launch_timeout(req.launch_timeout)
            .with_login_timeout(req.login_timeout)
    }
}

/// tower::Serviceを実装したエクスポートサービス
#[derive(Debug, Clone, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ExportRequest> for ExportService {
    type Response = ListChallenge;
    type Error = ExporterError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ExportRequest) -> Self::Future {
        info!("Export request received: list_url={}", req.list_url);

        Box::pin(async move {
            let config: ExporterConfig = req.into();
            let mut exporter = ListChallengesExporter::new(config);

            let challenge = exporter.execute().await?;

            info!(
                "Export finished: name={:?}, items={}",
                challenge.name,
                challenge.items.len()
            );
            Ok(challenge)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_request_builder() {
        let req = ExportRequest::new("https://www.listchallenges.com/x")
            .with_credentials(Some(Credentials::new("user", "pass")))
            .with_pagination(Pagination::Redirect)
            .with_headless(false)
            .with_debug(true)
            .with_chrome_path(Some(PathBuf::from("/usr/bin/chromium")));

        assert_eq!(req.list_url, "https://www.listchallenges.com/x");
        assert_eq!(req.credentials, Some(Credentials::new("user", "pass")));
        assert_eq!(req.pagination, Pagination::Redirect);
        assert!(!req.headless);
        assert!(req.debug);
    }

    #[test]
    fn test_export_request_to_config() {
        let req = ExportRequest::new("https://www.listchallenges.com/x")
            .with_launch_timeout(Duration::from_secs(30))
            .with_login_timeout(Duration::from_secs(3));
        let config: ExporterConfig = req.into();

        assert_eq!(config.list_url, "https://www.listchallenges.com/x");
        assert!(config.credentials.is_none());
        assert!(config.headless);
        assert_eq!(config.login_timeout, Duration::from_secs(3));
        assert_eq!(config.launch_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_service_rejects_invalid_request() {
        let mut service = ExportService::new();
        let result = service.call(ExportRequest::new("")).await;
        assert!(matches!(result, Err(ExporterError::Config(_))));
    }
}
