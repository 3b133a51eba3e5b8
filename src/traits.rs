use async_trait::async_trait;
use tracing::warn;

use crate::error::ExporterError;
use crate::listchallenges::{ItemElement, ListChallenge, SessionState};

/// ブラウザ操作の抽象化
///
/// 実ブラウザ（chromiumoxide）とテスト用のフェイクの両方がこれを実装する。
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// URLへ移動し、ロード完了を待つ
    async fn navigate(&self, url: &str) -> Result<(), ExporterError>;

    /// 現在のURL
    async fn current_url(&self) -> Result<String, ExporterError>;

    /// セレクタに一致する要素数
    async fn count(&self, selector: &str) -> Result<usize, ExporterError>;

    /// セレクタに一致する最初の要素のテキスト
    async fn text(&self, selector: &str) -> Result<String, ExporterError>;

    /// 入力欄に値を入力
    async fn fill(&self, selector: &str, value: &str) -> Result<(), ExporterError>;

    /// 要素をクリック
    async fn click(&self, selector: &str) -> Result<(), ExporterError>;

    /// `selector` に一致する全要素を DOM 順で取得する。
    /// 名前は子要素 `name_selector` のテキスト（なければ要素自身のテキスト）。
    async fn items(
        &self,
        selector: &str,
        name_selector: &str,
    ) -> Result<Vec<ItemElement>, ExporterError>;

    /// PNG スクリーンショット
    async fn screenshot(&self) -> Result<Vec<u8>, ExporterError>;
}

#[async_trait]
pub trait Exporter: Send + Sync {
    /// ブラウザ初期化
    async fn initialize(&mut self) -> Result<(), ExporterError>;

    /// ログイン（失敗しても匿名モードで続行）
    async fn login(&mut self) -> SessionState;

    /// リストを巡回してアイテムを収集
    async fn export(&mut self, session: SessionState) -> Result<ListChallenge, ExporterError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ExporterError>;

    /// 一括実行（initialize → login → export → close）
    ///
    /// initialize 成功後は export の成否に関わらず必ず close する。
    async fn execute(&mut self) -> Result<ListChallenge, ExporterError> {
        self.initialize().await?;

        let session = self.login().await;
        let result = self.export(session).await;

        if let Err(e) = self.close().await {
            warn!("Failed to stop browser: {}", e);
        }
        result
    }
}
