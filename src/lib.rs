//! listchallenges.com エクスポーター
//!
//! - ヘッドレスChromeでリストの全ページを巡回してアイテムを収集
//! - ログインすると各アイテムのチェック状態も取得
//!
//! # 使用例
//!
//! ```rust,ignore
//! use listchallenges_exporter::{ExportRequest, ExportService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ExportService::new();
//!
//!     let request = ExportRequest::new("https://www.listchallenges.com/reddit-top-250-movies")
//!         .with_headless(false);
//!
//!     let challenge = service.call(request).await.unwrap();
//!     println!("{}: {} items", challenge.name, challenge.items.len());
//! }
//! ```
//!
//! # 直接使う場合
//!
//! ```rust,ignore
//! use listchallenges_exporter::{Credentials, Exporter, ExporterConfig, ListChallengesExporter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ExporterConfig::new("https://www.listchallenges.com/reddit-top-250-movies")
//!         .with_credentials(Some(Credentials::new("me@example.com", "password")));
//!
//!     let mut exporter = ListChallengesExporter::new(config);
//!     let challenge = exporter.execute().await.unwrap();
//!     println!("{}", serde_json::to_string(&challenge).unwrap());
//! }
//! ```

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod listchallenges;
pub mod service;
pub mod traits;

// 主要な型をリエクスポート
pub use browser::{BrowserSession, ChromePage};
pub use config::{Credentials, ExporterConfig, Pagination};
pub use error::ExporterError;
pub use listchallenges::{ListChallenge, ListChallengesExporter, ListItem, SessionState};
pub use service::{ExportRequest, ExportService};
pub use traits::{Exporter, PageDriver};
