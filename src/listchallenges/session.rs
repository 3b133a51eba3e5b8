//! ログインとリスト名の取得

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::{
    SessionState, LIST_NAME, LOGIN_BUTTON, LOGIN_EMAIL_INPUT, LOGIN_PASSWORD_INPUT, LOGIN_URL,
    PROFILE_URL_PREFIX,
};
use crate::config::{Credentials, ExporterConfig};
use crate::error::ExporterError;
use crate::traits::PageDriver;

/// 認証情報があればログインする。
///
/// 失敗してもエラーにはせず、匿名モードで続行する。
pub async fn login<D>(driver: &D, config: &ExporterConfig) -> SessionState
where
    D: PageDriver + ?Sized,
{
    let Some(credentials) = config.credentials.as_ref() else {
        debug!("No credentials given, continuing anonymously");
        return SessionState::Anonymous;
    };

    info!("Logging in as {}...", credentials.username);
    match try_login(driver, credentials, config).await {
        Ok(url) => {
            info!("Login successful ({})", url);
            SessionState::LoggedIn
        }
        Err(e) => {
            warn!("Login failed, continuing anonymously: {}", e);
            if config.debug {
                log_screenshot(driver).await;
            }
            SessionState::Anonymous
        }
    }
}

async fn try_login<D>(
    driver: &D,
    credentials: &Credentials,
    config: &ExporterConfig,
) -> Result<String, ExporterError>
where
    D: PageDriver + ?Sized,
{
    driver.navigate(LOGIN_URL).await?;

    driver
        .fill(LOGIN_EMAIL_INPUT, &credentials.username)
        .await
        .map_err(|e| ExporterError::Login(format!("メールアドレス入力: {}", e)))?;
    driver
        .fill(LOGIN_PASSWORD_INPUT, &credentials.password)
        .await
        .map_err(|e| ExporterError::Login(format!("パスワード入力: {}", e)))?;
    driver
        .click(LOGIN_BUTTON)
        .await
        .map_err(|e| ExporterError::Login(format!("ログインボタンクリック: {}", e)))?;

    debug!("Waiting for redirect to profile page...");
    wait_for_url_prefix(
        driver,
        PROFILE_URL_PREFIX,
        config.login_timeout,
        config.poll_interval,
    )
    .await
}

/// 現在のURLが `prefix` で始まるまでポーリングする
async fn wait_for_url_prefix<D>(
    driver: &D,
    prefix: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<String, ExporterError>
where
    D: PageDriver + ?Sized,
{
    let start = Instant::now();
    let mut last_url = String::new();

    loop {
        match driver.current_url().await {
            Ok(url) if url.starts_with(prefix) => return Ok(url),
            Ok(url) => last_url = url,
            Err(e) => debug!("URL check error: {}", e),
        }

        if start.elapsed() >= timeout {
            return Err(ExporterError::Timeout(format!(
                "{:?}以内に {} へ遷移しませんでした (現在: {})",
                timeout, prefix, last_url
            )));
        }

        sleep(poll_interval).await;
    }
}

async fn log_screenshot<D>(driver: &D)
where
    D: PageDriver + ?Sized,
{
    match driver.screenshot().await {
        Ok(png) => {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&png);
            debug!("Login screenshot: data:image/png;base64,{}", encoded);
        }
        Err(e) => debug!("Failed to take screenshot: {}", e),
    }
}

/// リストページを開いて表示名を読む。名前が見つからなければ空文字
pub async fn read_list_name<D>(driver: &D, list_url: &str) -> Result<String, ExporterError>
where
    D: PageDriver + ?Sized,
{
    driver.navigate(list_url).await?;

    match driver.text(LIST_NAME).await {
        Ok(name) => Ok(name.trim().to_string()),
        Err(e) => {
            warn!("List name not found on {}: {}", list_url, e);
            Ok(String::new())
        }
    }
}
