//! listchallenges.com エクスポーターモジュール
//!
//! ログイン（任意）→ リスト名取得 → 全ページ巡回 → アイテム収集

mod collector;
mod pagination;
mod scraper;
mod session;
mod types;

#[cfg(test)]
mod fake;

pub use collector::collect_items;
pub use pagination::{page_count_from_pager, page_url, walk};
pub use scraper::{export_list, ListChallengesExporter};
pub use session::{login, read_list_name};
pub use types::{ItemElement, ListChallenge, ListItem, SessionState};

pub(crate) const LOGIN_URL: &str = "https://www.listchallenges.com/login-email";
/// ログイン成功時のリダイレクト先
pub(crate) const PROFILE_URL_PREFIX: &str = "https://www.listchallenges.com/profile";

pub(crate) const LOGIN_EMAIL_INPUT: &str = "#MainContent_textBoxEmailLogIn";
pub(crate) const LOGIN_PASSWORD_INPUT: &str = "#MainContent_textBoxPasswordLogIn";
pub(crate) const LOGIN_BUTTON: &str = "#MainContent_buttonLogIn";

pub(crate) const LIST_NAME: &str = "#MainContent_panelListName h2";
/// ページ番号 + 「Prev」「Next」
pub(crate) const PAGER_CONTROLS: &str = "#pagerChecklist li";
pub(crate) const LIST_ITEMS: &str = "#repeaterListItems .list-item";
pub(crate) const ITEM_NAME: &str = ".item-name";
pub(crate) const CHECKED_CLASS: &str = "checked";
