use async_trait::async_trait;
use tracing::{info, warn};

use super::{read_list_name, walk, ListChallenge, SessionState};
use crate::browser::{BrowserSession, ChromePage};
use crate::config::ExporterConfig;
use crate::error::ExporterError;
use crate::traits::{Exporter, PageDriver};

pub struct ListChallengesExporter {
    config: ExporterConfig,
    browser: Option<BrowserSession>,
}

impl ListChallengesExporter {
    pub fn new(config: ExporterConfig) -> Self {
        Self {
            config,
            browser: None,
        }
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    fn get_page(&self) -> Result<&ChromePage, ExporterError> {
        self.browser
            .as_ref()
            .map(BrowserSession::page)
            .ok_or_else(|| ExporterError::BrowserInit("ブラウザが初期化されていません".into()))
    }
}

/// リスト名を読み、全ページを巡回して `ListChallenge` を組み立てる
///
/// 途中で失敗した場合は収集済みのアイテムも捨ててエラーを返す。
pub async fn export_list<D>(
    driver: &D,
    config: &ExporterConfig,
    session: SessionState,
) -> Result<ListChallenge, ExporterError>
where
    D: PageDriver + ?Sized,
{
    let url = config.base_url();

    let name = read_list_name(driver, url).await?;
    info!("Crawling list \"{}\" on {}", name, url);

    let items = walk(driver, url, config.pagination, session).await?;

    Ok(ListChallenge {
        name,
        url: url.to_string(),
        items,
    })
}

#[async_trait]
impl Exporter for ListChallengesExporter {
    async fn initialize(&mut self) -> Result<(), ExporterError> {
        self.config.validate()?;
        self.browser = Some(BrowserSession::launch(&self.config).await?);
        Ok(())
    }

    async fn login(&mut self) -> SessionState {
        match self.get_page() {
            Ok(page) => super::login(page, &self.config).await,
            Err(e) => {
                warn!("Skipping login: {}", e);
                SessionState::Anonymous
            }
        }
    }

    async fn export(&mut self, session: SessionState) -> Result<ListChallenge, ExporterError> {
        let page = self.get_page()?;
        export_list(page, &self.config, session).await
    }

    async fn close(&mut self) -> Result<(), ExporterError> {
        match self.browser.take() {
            Some(browser) => browser.close().await,
            None => Ok(()),
        }
    }
}
