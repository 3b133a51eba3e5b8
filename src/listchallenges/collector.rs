use tracing::debug;

use super::{ListItem, SessionState, CHECKED_CLASS, ITEM_NAME, LIST_ITEMS};
use crate::error::ExporterError;
use crate::traits::PageDriver;

/// 表示中のページからアイテムを DOM 順で収集する
///
/// チェック状態はログイン中のみ意味を持つ。匿名セッションでは常に `false`。
pub async fn collect_items<D>(
    driver: &D,
    session: SessionState,
) -> Result<Vec<ListItem>, ExporterError>
where
    D: PageDriver + ?Sized,
{
    let page_url = driver.current_url().await?;

    let elements = driver
        .items(LIST_ITEMS, ITEM_NAME)
        .await
        .map_err(|e| ExporterError::ItemCount(format!("{}: {}", page_url, e)))?;
    debug!("Found {} item(s) on {}", elements.len(), page_url);

    let items = elements
        .into_iter()
        .map(|element| ListItem {
            checked: session.is_logged_in() && element.has_class(CHECKED_CLASS),
            name: element.name.trim().to_string(),
            url: page_url.clone(),
        })
        .collect();

    Ok(items)
}
