//! chromiumoxide によるブラウザ起動・終了と `PageDriver` 実装

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::ExporterConfig;
use crate::error::ExporterError;
use crate::listchallenges::ItemElement;
use crate::traits::PageDriver;

/// 起動中のブラウザとそのページ
///
/// `close` せずに drop された場合（Ctrl-C など）も、chromiumoxide の `Browser` が
/// 子プロセスを kill し、その後 `TempDir` がプロファイルを削除する。
/// フィールドは宣言順に drop されるので `browser` を `user_data_dir` より前に置く。
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: ChromePage,
    user_data_dir: TempDir,
}

impl BrowserSession {
    pub async fn launch(config: &ExporterConfig) -> Result<Self, ExporterError> {
        info!("Starting browser...");

        let user_data_dir = profile_dir()?;

        let mut builder = BrowserConfig::builder()
            .user_data_dir(user_data_dir.path())
            .window_size(1280, 800)
            .launch_timeout(config.launch_timeout)
            .request_timeout(Duration::from_secs(60))
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if let Some(path) = &config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        if !config.headless {
            builder = builder.with_head();
        }

        if config.debug {
            builder = builder.arg("--enable-logging=stderr").arg("--v=1");
        }

        let browser_config = builder
            .build()
            .map_err(|e| ExporterError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ExporterError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // 起動済みのプロセスを残さない
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(ExporterError::BrowserInit(e.to_string()));
            }
        };

        info!("Browser started");
        Ok(Self {
            browser,
            handler,
            page: ChromePage::new(page),
            user_data_dir,
        })
    }

    pub fn page(&self) -> &ChromePage {
        &self.page
    }

    /// ブラウザを終了する
    pub async fn close(self) -> Result<(), ExporterError> {
        info!("Stopping browser...");

        let Self {
            mut browser,
            handler,
            page,
            user_data_dir,
        } = self;
        drop(page);

        let closed = browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ExporterError::BrowserClose(e.to_string()));

        if let Err(e) = browser.wait().await {
            debug!("Failed to wait for browser exit: {}", e);
        }
        handler.abort();

        let path = user_data_dir.path().to_path_buf();
        if let Err(e) = user_data_dir.close() {
            debug!("Failed to remove {:?}: {}", path, e);
        }

        if closed.is_ok() {
            info!("Browser stopped");
        }
        closed
    }
}

/// 同時実行でプロファイルがロックされないよう、実行ごとに一時ディレクトリを作る
fn profile_dir() -> Result<TempDir, ExporterError> {
    tempfile::Builder::new()
        .prefix("listchallenges-")
        .tempdir()
        .map_err(|e| ExporterError::BrowserInit(format!("プロファイルディレクトリ作成: {}", e)))
}

/// chromiumoxide のページ
#[derive(Clone)]
pub struct ChromePage {
    page: Arc<Page>,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self {
            page: Arc::new(page),
        }
    }
}

#[async_trait]
impl PageDriver for ChromePage {
    async fn navigate(&self, url: &str) -> Result<(), ExporterError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ExporterError::Navigation(format!("{}: {}", url, e)))?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, ExporterError> {
        self.page
            .url()
            .await
            .map_err(|e| ExporterError::Navigation(e.to_string()))?
            .ok_or_else(|| ExporterError::Navigation("URLを取得できません".into()))
    }

    async fn count(&self, selector: &str) -> Result<usize, ExporterError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| ExporterError::ElementNotFound(format!("{}: {}", selector, e)))?;
        Ok(elements.len())
    }

    async fn text(&self, selector: &str) -> Result<String, ExporterError> {
        let text = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| ExporterError::ElementNotFound(format!("{}: {}", selector, e)))?
            .inner_text()
            .await
            .map_err(|e| ExporterError::ElementNotFound(format!("{}: {}", selector, e)))?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), ExporterError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| ExporterError::ElementNotFound(format!("{}: {}", selector, e)))?
            .click()
            .await
            .map_err(|e| ExporterError::Navigation(format!("{}: {}", selector, e)))?
            .type_str(value)
            .await
            .map_err(|e| ExporterError::Navigation(format!("{}: {}", selector, e)))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), ExporterError> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| ExporterError::ElementNotFound(format!("{}: {}", selector, e)))?
            .click()
            .await
            .map_err(|e| ExporterError::Navigation(format!("{}: {}", selector, e)))?;
        Ok(())
    }

    async fn items(
        &self,
        selector: &str,
        name_selector: &str,
    ) -> Result<Vec<ItemElement>, ExporterError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| ExporterError::ElementNotFound(format!("{}: {}", selector, e)))?;

        let mut items = Vec::with_capacity(elements.len());
        for element in &elements {
            let class = element
                .attribute("class")
                .await
                .map_err(|e| ExporterError::ElementNotFound(format!("{}[class]: {}", selector, e)))?
                .unwrap_or_default();

            // セレクタが名前要素そのものを指す場合は子要素がない
            let name = match element.find_element(name_selector).await {
                Ok(child) => child.inner_text().await,
                Err(_) => element.inner_text().await,
            }
            .map_err(|e| ExporterError::ElementNotFound(format!("{}: {}", name_selector, e)))?
            .unwrap_or_default();

            items.push(ItemElement {
                name: name.trim().to_string(),
                class,
            });
        }
        Ok(items)
    }

    async fn screenshot(&self) -> Result<Vec<u8>, ExporterError> {
        self.page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| ExporterError::Navigation(format!("スクリーンショット: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_dir_removed_on_drop() {
        let dir = profile_dir().unwrap();
        let path = dir.path().to_path_buf();

        assert!(path.is_dir());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("listchallenges-"));

        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn test_profile_dirs_are_unique() {
        let a = profile_dir().unwrap();
        let b = profile_dir().unwrap();
        assert_ne!(a.path(), b.path());
    }
}
