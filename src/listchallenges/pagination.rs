//! ページ巡回
//!
//! - `Count`: ページャー要素数 - 2（Prev/Next）でページ数を決め、1..=N を巡回
//! - `Redirect`: 存在しないページは1ページ目にリダイレクトされるので、
//!   既に訪れたページ（実際のURL）に戻された時点で終了

use std::collections::HashSet;

use tracing::{debug, info};

use super::{collect_items, ListItem, SessionState, PAGER_CONTROLS};
use crate::config::Pagination;
use crate::error::ExporterError;
use crate::traits::PageDriver;

/// Redirect 方式で巡回するページ数の上限
const MAX_REDIRECT_PAGES: u32 = 10_000;

/// `{list_url}/checklist/{index}`
pub fn page_url(list_url: &str, index: u32) -> String {
    format!("{}/checklist/{}", list_url.trim_end_matches('/'), index)
}

/// ページャー要素数からページ数を求める。単一ページのリストでも最低1
pub fn page_count_from_pager(controls: usize) -> u32 {
    let pages = controls.saturating_sub(2).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// 全ページを巡回してアイテムをページ順に連結する
///
/// `Count` 方式ではリストページ（ページャーのあるページ）を表示済みであること。
pub async fn walk<D>(
    driver: &D,
    list_url: &str,
    pagination: Pagination,
    session: SessionState,
) -> Result<Vec<ListItem>, ExporterError>
where
    D: PageDriver + ?Sized,
{
    let items = match pagination {
        Pagination::Count => walk_counted(driver, list_url, session).await?,
        Pagination::Redirect => walk_until_redirect(driver, list_url, session).await?,
    };
    info!("Collected {} item(s)", items.len());
    Ok(items)
}

async fn walk_counted<D>(
    driver: &D,
    list_url: &str,
    session: SessionState,
) -> Result<Vec<ListItem>, ExporterError>
where
    D: PageDriver + ?Sized,
{
    let controls = driver
        .count(PAGER_CONTROLS)
        .await
        .map_err(|e| ExporterError::PageCount(e.to_string()))?;
    let page_count = page_count_from_pager(controls);
    info!("Discovered {} page(s) in list", page_count);

    let mut all_items = Vec::new();
    for index in 1..=page_count {
        let url = page_url(list_url, index);
        info!("Crawling {}", url);
        driver.navigate(&url).await?;

        let items = collect_items(driver, session).await?;
        all_items.extend(items);
    }
    Ok(all_items)
}

async fn walk_until_redirect<D>(
    driver: &D,
    list_url: &str,
    session: SessionState,
) -> Result<Vec<ListItem>, ExporterError>
where
    D: PageDriver + ?Sized,
{
    let mut all_items = Vec::new();
    // サイト側でホスト名などが書き換えられることがあるので、要求URLではなく実際のURLで比較する
    let mut seen: HashSet<String> = HashSet::new();

    for index in 1..=MAX_REDIRECT_PAGES {
        let url = page_url(list_url, index);
        info!("Crawling {}", url);
        driver.navigate(&url).await?;

        let actual = driver.current_url().await?;
        if !seen.insert(normalize_url(&actual)) {
            debug!("Redirected back to {}, {} page(s) in list", actual, index - 1);
            return Ok(all_items);
        }

        let items = collect_items(driver, session).await?;
        all_items.extend(items);
    }

    Err(ExporterError::PageCount(format!(
        "{}ページを超えてもリダイレクトされませんでした",
        MAX_REDIRECT_PAGES
    )))
}

fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
