use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ブラウザ終了エラー: {0}")]
    BrowserClose(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("ログインエラー: {0}")]
    Login(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("要素が見つかりません: {0}")]
    ElementNotFound(String),

    #[error("ページ数を取得できません: {0}")]
    PageCount(String),

    #[error("アイテム数を取得できません: {0}")]
    ItemCount(String),

    #[error("中断されました")]
    Interrupted,

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("JSONエラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),
}
