use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::BookingBrowser;
use crate::config::BrowserSettings;
use crate::error::{ReservationError, Result};

/// Chrome driven over CDP. The handler task is aborted on close or drop.
pub struct ChromeBrowser {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    element_timeout: Duration,
}

impl ChromeBrowser {
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1920, 1080)
            .request_timeout(Duration::from_secs(30))
            .arg("--start-maximized")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", settings.user_agent));

        if settings.headless {
            builder = builder.with_head().arg("--headless=new");
        } else {
            builder = builder.with_head();
        }

        if let Some(path) = find_chrome_executable(settings) {
            builder = builder.chrome_executable(path);
        }

        let config = builder.build().map_err(ReservationError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ReservationError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler event error: {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        info!("Browser launched");

        Ok(Self {
            browser,
            page,
            handler,
            element_timeout: settings.element_timeout(),
        })
    }

    /// Polls for the element with a growing interval until the timeout runs out.
    async fn wait_for_element(&self, selector: &str) -> Result<Element> {
        let start = Instant::now();
        let mut poll_interval = Duration::from_millis(100);
        let max_interval = Duration::from_secs(1);

        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }

            if start.elapsed() >= self.element_timeout {
                return Err(ReservationError::ElementNotFound {
                    selector: selector.to_string(),
                });
            }

            tokio::time::sleep(poll_interval).await;
            poll_interval = (poll_interval * 2).min(max_interval);
        }
    }

    async fn run_script(&self, script: String) -> Result<bool> {
        let result = self.page.evaluate(script).await?;
        Ok(result.into_value::<bool>()?)
    }
}

#[async_trait]
impl BookingBrowser for ChromeBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| ReservationError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self.wait_for_element(selector).await?;
        element.click().await?;
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        self.wait_for_element(selector).await?;
        // Station names are Hangul, which CDP key events cannot type, so the
        // value is set directly and the input events are fired by hand.
        let script = format!(
            r#"
            (function() {{
                const el = document.querySelector({selector});
                if (!el) return false;
                el.focus();
                el.value = {value};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
            value = serde_json::to_string(text)?,
        );
        if self.run_script(script).await? {
            Ok(())
        } else {
            Err(ReservationError::ElementNotFound {
                selector: selector.to_string(),
            })
        }
    }

    async fn select_option_containing(&self, selector: &str, text: &str) -> Result<bool> {
        self.wait_for_element(selector).await?;
        let script = format!(
            r#"
            (function() {{
                const select = document.querySelector({selector});
                if (!select) return false;
                const option = Array.from(select.options).find(o => o.text.includes({text}));
                if (!option) return false;
                select.value = option.value;
                option.selected = true;
                select.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
            text = serde_json::to_string(text)?,
        );
        self.run_script(script).await
    }

    async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn reload(&self) -> Result<()> {
        self.page.reload().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        info!("Closing browser");
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!("Browser process did not exit cleanly: {}", e);
        }
        self.handler.abort();
        closed?;
        Ok(())
    }
}

impl Drop for ChromeBrowser {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Configured path first, then `CHROMIUM_PATH`, then the usual install
/// locations. `None` lets chromiumoxide run its own detection.
fn find_chrome_executable(settings: &BrowserSettings) -> Option<PathBuf> {
    if let Some(path) = &settings.chrome_path {
        if path.exists() {
            return Some(path.clone());
        }
        warn!("Configured chrome_path does not exist: {}", path.display());
    }

    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Some(path);
        }
        warn!("CHROMIUM_PATH points to a missing file: {}", path.display());
    }

    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ]
    };

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}
