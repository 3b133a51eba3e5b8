//! listchallenges 関連の型定義

use serde::{Deserialize, Serialize};

/// リストチャレンジ（エクスポート結果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListChallenge {
    pub name: String,
    pub url: String,
    pub items: Vec<ListItem>,
}

/// リストの1アイテム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub name: String,
    /// アイテムがあったページのURL
    pub url: String,
    /// ログイン中のユーザーがチェック済みか（匿名時は常に false）
    #[serde(default)]
    pub checked: bool,
}

/// ログイン状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    LoggedIn,
}

impl SessionState {
    pub fn is_logged_in(self) -> bool {
        matches!(self, SessionState::LoggedIn)
    }
}

/// ブラウザから読み取ったアイテム要素の生データ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemElement {
    pub name: String,
    /// class 属性（なければ空文字）
    pub class: String,
}

impl ItemElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}
