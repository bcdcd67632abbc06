use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

pub(crate) const FONTS_READY_SCRIPT: &str = "document.fonts.ready.then(() => true)";

/// Resolves once no new resource has been fetched for 500ms, or after 5s at most.
pub(crate) const NETWORK_SETTLE_SCRIPT: &str = r#"new Promise((resolve) => {
  const started = Date.now();
  let last = performance.getEntriesByType('resource').length;
  let quietMs = 0;
  const timer = setInterval(() => {
    const count = performance.getEntriesByType('resource').length;
    quietMs = count === last ? quietMs + 100 : 0;
    last = count;
    if (quietMs >= 500 || Date.now() - started >= 5000) {
      clearInterval(timer);
      resolve(true);
    }
  }, 100);
})"#;

/// A loaded page that can run a script in its context and hand back the JSON result.
#[async_trait]
pub trait PageEvaluator: Send + Sync {
    async fn evaluate_script(&self, script: &str) -> Result<Value>;
}

#[async_trait]
impl PageEvaluator for Page {
    async fn evaluate_script(&self, script: &str) -> Result<Value> {
        let result = self
            .evaluate_expression(script)
            .await
            .context("script evaluation failed in page")?;
        result
            .into_value::<Value>()
            .context("script evaluation returned no JSON value")
    }
}

pub async fn evaluate_as<T, E>(page: &E, script: &str) -> Result<T>
where
    T: DeserializeOwned,
    E: PageEvaluator + ?Sized,
{
    let value = page.evaluate_script(script).await?;
    serde_json::from_value(value).context("page returned an unexpected result shape")
}

/// Waits for late network activity to quiet down, then for web fonts.
pub async fn wait_until_settled<E>(page: &E, timeout: Duration) -> Result<()>
where
    E: PageEvaluator + ?Sized,
{
    for (script, stage) in [
        (NETWORK_SETTLE_SCRIPT, "network to settle"),
        (FONTS_READY_SCRIPT, "web fonts"),
    ] {
        match tokio::time::timeout(timeout, page.evaluate_script(script)).await {
            Ok(ready) => {
                ready.with_context(|| format!("failed waiting for {stage}"))?;
            }
            Err(_) => bail!("timed out after {timeout:?} waiting for {stage}"),
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub chrome_path: Option<PathBuf>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub timeout: Duration,
}

/// Headless browser plus the task driving its CDP event stream.
pub struct BrowserSession {
    browser: Browser,
    events: JoinHandle<()>,
}

impl BrowserSession {
    pub async fn launch(settings: &LaunchSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.viewport_width, settings.viewport_height)
            .viewport(Viewport {
                width: settings.viewport_width,
                height: settings.viewport_height,
                ..Viewport::default()
            })
            .request_timeout(settings.timeout)
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if let Some(path) = &settings.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|err| anyhow!("invalid browser configuration: {err}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch headless browser")?;
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!(error = %err, "browser event stream ended");
                    break;
                }
            }
        });

        Ok(Self { browser, events })
    }

    /// Opens `url` in a fresh tab and waits for navigation, network quiet and web fonts.
    pub async fn open(&self, url: &str, timeout: Duration) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to open browser tab")?;

        match tokio::time::timeout(timeout, page.goto(url)).await {
            Ok(loaded) => {
                loaded.with_context(|| format!("failed to load {url}"))?;
            }
            Err(_) => bail!("timed out after {}s loading {url}", timeout.as_secs()),
        }

        wait_until_settled(&page, timeout).await?;
        Ok(page)
    }

    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .context("failed to close headless browser")?;
        self.events
            .await
            .context("browser event task did not shut down cleanly")?;
        Ok(())
    }
}
