//! テスト用のインメモリ listchallenges サイト

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    ItemElement, CHECKED_CLASS, ITEM_NAME, LIST_ITEMS, LIST_NAME, LOGIN_BUTTON,
    LOGIN_EMAIL_INPUT, LOGIN_PASSWORD_INPUT, LOGIN_URL, PAGER_CONTROLS, PROFILE_URL_PREFIX,
};
use crate::error::ExporterError;
use crate::traits::PageDriver;

#[derive(Debug, Clone)]
pub struct FakeItem {
    pub name: String,
    pub checked: bool,
}

/// `pages[i]` が `{base}/checklist/{i + 1}` に表示される
pub struct FakeSite {
    base_url: String,
    /// このプレフィックスへのアクセスは `base_url` に書き換えられる
    alias: Option<String>,
    list_name: Option<String>,
    pages: Vec<Vec<FakeItem>>,
    /// None ならページャーの取得に失敗する
    pager_controls: Option<usize>,
    valid_login: Option<(String, String)>,
    fail_items: bool,
    fail_login_click: bool,
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    current_url: String,
    fields: HashMap<String, String>,
    visits: Vec<String>,
}

impl FakeSite {
    pub fn new(base_url: &str, list_name: &str, pages: Vec<Vec<FakeItem>>) -> Self {
        // 実サイトと同じく「Prev」「Next」を含む数
        let pager_controls = Some(pages.len() + 2);
        Self {
            base_url: base_url.to_string(),
            alias: None,
            list_name: Some(list_name.to_string()),
            pages,
            pager_controls,
            valid_login: None,
            fail_items: false,
            fail_login_click: false,
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_pager_controls(mut self, controls: Option<usize>) -> Self {
        self.pager_controls = controls;
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn with_account(mut self, username: &str, password: &str) -> Self {
        self.valid_login = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn without_list_name(mut self) -> Self {
        self.list_name = None;
        self
    }

    pub fn failing_items(mut self) -> Self {
        self.fail_items = true;
        self
    }

    pub fn failing_login_click(mut self) -> Self {
        self.fail_login_click = true;
        self
    }

    pub fn visits(&self) -> Vec<String> {
        self.state.lock().unwrap().visits.clone()
    }

    /// `{base}/checklist/{n}` のページ番号。一覧トップは1ページ目扱い
    fn page_index(&self, url: &str) -> Option<usize> {
        if url == self.base_url {
            return Some(1);
        }
        url.strip_prefix(&format!("{}/checklist/", self.base_url))?
            .parse()
            .ok()
    }
}

pub fn items(prefix: &str, count: usize) -> Vec<FakeItem> {
    (1..=count)
        .map(|i| FakeItem {
            name: format!("{} {}", prefix, i),
            checked: false,
        })
        .collect()
}

#[async_trait]
impl PageDriver for FakeSite {
    async fn navigate(&self, url: &str) -> Result<(), ExporterError> {
        let mut state = self.state.lock().unwrap();
        state.visits.push(url.to_string());

        let rewritten = match &self.alias {
            Some(alias) if url.starts_with(alias.as_str()) => {
                format!("{}{}", self.base_url, &url[alias.len()..])
            }
            _ => url.to_string(),
        };
        let url = rewritten.as_str();

        if url == LOGIN_URL {
            state.current_url = url.to_string();
            return Ok(());
        }

        match self.page_index(url) {
            Some(n) if n >= 1 && n <= self.pages.len().max(1) => {
                state.current_url = url.to_string();
                Ok(())
            }
            // 範囲外のページは1ページ目にリダイレクト
            Some(_) => {
                state.current_url = format!("{}/checklist/1", self.base_url);
                Ok(())
            }
            None => Err(ExporterError::Navigation(format!("unknown url: {}", url))),
        }
    }

    async fn current_url(&self) -> Result<String, ExporterError> {
        Ok(self.state.lock().unwrap().current_url.clone())
    }

    async fn count(&self, selector: &str) -> Result<usize, ExporterError> {
        if selector != PAGER_CONTROLS {
            return Err(ExporterError::ElementNotFound(selector.to_string()));
        }
        self.pager_controls
            .ok_or_else(|| ExporterError::ElementNotFound(selector.to_string()))
    }

    async fn text(&self, selector: &str) -> Result<String, ExporterError> {
        match (selector, &self.list_name) {
            (LIST_NAME, Some(name)) => Ok(name.clone()),
            _ => Err(ExporterError::ElementNotFound(selector.to_string())),
        }
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), ExporterError> {
        let mut state = self.state.lock().unwrap();
        if state.current_url != LOGIN_URL {
            return Err(ExporterError::ElementNotFound(selector.to_string()));
        }
        state.fields.insert(selector.to_string(), value.to_string());
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), ExporterError> {
        if selector != LOGIN_BUTTON || self.fail_login_click {
            return Err(ExporterError::ElementNotFound(selector.to_string()));
        }

        let mut state = self.state.lock().unwrap();
        let entered = (
            state.fields.get(LOGIN_EMAIL_INPUT).cloned().unwrap_or_default(),
            state.fields.get(LOGIN_PASSWORD_INPUT).cloned().unwrap_or_default(),
        );
        if self.valid_login.as_ref() == Some(&entered) {
            state.current_url = format!("{}/{}", PROFILE_URL_PREFIX, entered.0);
        } else {
            state.current_url = format!("{}?error=1", LOGIN_URL);
        }
        Ok(())
    }

    async fn items(
        &self,
        selector: &str,
        name_selector: &str,
    ) -> Result<Vec<ItemElement>, ExporterError> {
        if self.fail_items || selector != LIST_ITEMS || name_selector != ITEM_NAME {
            return Err(ExporterError::ElementNotFound(selector.to_string()));
        }

        let state = self.state.lock().unwrap();
        let index = self.page_index(&state.current_url).unwrap_or(1);
        let page = match self.pages.get(index.saturating_sub(1)) {
            Some(page) => page,
            None => return Ok(Vec::new()),
        };

        // チェック済みマーカーはログイン状態に関わらず出す（収集側で判定する）
        Ok(page
            .iter()
            .map(|item| ItemElement {
                name: item.name.clone(),
                class: if item.checked {
                    format!("list-item {}", CHECKED_CLASS)
                } else {
                    "list-item".to_string()
                },
            })
            .collect())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, ExporterError> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}
