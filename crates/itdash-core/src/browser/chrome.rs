use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::Browser as CdpBrowser;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::browser::Driver;
use crate::error::ItdashError;

#[derive(Debug, Clone)]
pub struct ChromeOptions {
    pub headless: bool,
    /// Where the browser saves downloads. Created if missing.
    pub download_dir: PathBuf,
    /// Chrome binary; falls back to `CHROME_PATH`, then auto-detection.
    pub chrome_path: Option<PathBuf>,
}

/// Browser backend driving Chrome over the DevTools protocol.
///
/// XPath queries run in the page through `document.evaluate`, so each
/// `Driver` call is one round trip regardless of how many nodes match.
pub struct ChromeDriver {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
}

impl ChromeDriver {
    pub fn launch(options: &ChromeOptions) -> Result<Self, ItdashError> {
        std::fs::create_dir_all(&options.download_dir)?;
        let download_dir = std::fs::canonicalize(&options.download_dir)?;

        let is_container = std::env::var("ITDASH_CONTAINER").is_ok()
            || Path::new("/.dockerenv").exists();
        let chrome_path = options
            .chrome_path
            .clone()
            .or_else(|| std::env::var("CHROME_PATH").ok().map(PathBuf::from));

        let launch = LaunchOptions::default_builder()
            .headless(options.headless)
            .sandbox(!is_container)
            .path(chrome_path)
            .window_size(Some((1920, 1080)))
            .idle_browser_timeout(Duration::from_secs(600))
            .build()
            .map_err(|e| ItdashError::Browser(format!("invalid Chrome launch options: {e}")))?;

        let browser = Browser::new(launch)
            .map_err(|e| ItdashError::Browser(format!("failed to launch Chrome: {e}")))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ItdashError::Browser(format!("failed to open tab: {e}")))?;

        tab.call_method(CdpBrowser::SetDownloadBehavior {
            behavior: CdpBrowser::SetDownloadBehaviorBehaviorOption::Allow,
            browser_context_id: None,
            download_path: Some(download_dir.to_string_lossy().into_owned()),
            events_enabled: None,
        })
        .map_err(|e| ItdashError::Browser(format!("failed to set download directory: {e}")))?;

        info!(
            headless = options.headless,
            download_dir = %download_dir.display(),
            "launched Chrome"
        );

        Ok(ChromeDriver {
            browser: Some(browser),
            tab: Some(tab),
        })
    }

    fn tab(&self) -> Result<&Arc<Tab>, ItdashError> {
        self.tab
            .as_ref()
            .ok_or_else(|| ItdashError::Browser("browser already closed".into()))
    }

    fn eval(&self, script: &str) -> Result<Value, ItdashError> {
        let result = self
            .tab()?
            .evaluate(script, false)
            .map_err(|e| ItdashError::Browser(format!("script failed: {e}")))?;
        Ok(result.value.unwrap_or(Value::Null))
    }

    /// Scripts hand structured results back as a JSON string.
    fn eval_json<T: DeserializeOwned>(&self, script: &str) -> Result<T, ItdashError> {
        match self.eval(script)? {
            Value::String(json) => Ok(serde_json::from_str(&json)?),
            other => Err(ItdashError::Browser(format!(
                "unexpected script result: {other}"
            ))),
        }
    }

    fn eval_bool(&self, script: &str) -> Result<bool, ItdashError> {
        match self.eval(script)? {
            Value::Bool(b) => Ok(b),
            other => Err(ItdashError::Browser(format!(
                "unexpected script result: {other}"
            ))),
        }
    }
}

impl Driver for ChromeDriver {
    fn navigate(&self, url: &str) -> Result<(), ItdashError> {
        debug!(url, "navigating");
        self.tab()?
            .navigate_to(url)
            .map_err(|e| ItdashError::Browser(format!("navigation to {url} failed: {e}")))?
            .wait_until_navigated()
            .map_err(|e| ItdashError::Browser(format!("page load of {url} failed: {e}")))?;
        Ok(())
    }

    fn current_url(&self) -> Result<String, ItdashError> {
        Ok(self.tab()?.get_url())
    }

    fn texts(&self, xpath: &str) -> Result<Vec<String>, ItdashError> {
        let body = format!(
            "return JSON.stringify(nodes({}, document).map(text));",
            js_string(xpath)
        );
        self.eval_json(&script(&body))
    }

    fn grouped_texts(
        &self,
        container_xpath: &str,
        child_xpath: &str,
    ) -> Result<Vec<Vec<String>>, ItdashError> {
        let body = format!(
            "return JSON.stringify(nodes({}, document).map(c => nodes({}, c).map(text)));",
            js_string(container_xpath),
            js_string(child_xpath)
        );
        self.eval_json(&script(&body))
    }

    fn click(&self, xpath: &str, index: usize) -> Result<(), ItdashError> {
        let body = format!(
            r#"const n = nodes({}, document)[{}];
  if (!n) return false;
  n.scrollIntoView({{ block: "center" }});
  if (n.tagName === "OPTION") {{
    const select = n.closest("select");
    select.value = n.value;
    select.dispatchEvent(new Event("change", {{ bubbles: true }}));
  }} else {{
    n.click();
  }}
  return true;"#,
            js_string(xpath),
            index
        );
        if self.eval_bool(&script(&body))? {
            Ok(())
        } else {
            Err(ItdashError::ElementNotFound {
                xpath: xpath.to_string(),
            })
        }
    }

    fn is_visible(&self, xpath: &str) -> Result<bool, ItdashError> {
        let body = format!(
            r#"const n = nodes({}, document)[0];
  if (!n) return false;
  const style = getComputedStyle(n);
  const rect = n.getBoundingClientRect();
  return style.display !== "none" && style.visibility !== "hidden" && rect.width > 0 && rect.height > 0;"#,
            js_string(xpath)
        );
        self.eval_bool(&script(&body))
    }

    fn quit(&mut self) -> Result<(), ItdashError> {
        if let Some(tab) = self.tab.take() {
            // Chrome is killed with the Browser below either way.
            let _ = tab.close(false);
        }
        if self.browser.take().is_some() {
            info!("closed Chrome");
        }
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "chrome"
    }
}

/// Wrap `body` in an IIFE that has the XPath helpers in scope.
fn script(body: &str) -> String {
    format!(
        r#"(() => {{
  const nodes = (q, ctx) => {{
    const r = document.evaluate(q, ctx, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
    const out = [];
    for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i));
    return out;
  }};
  const text = (n) => (n.innerText ?? n.textContent ?? "").trim();
  {body}
}})()"#
    )
}

fn js_string(s: &str) -> String {
    // A JSON string literal is a valid JS string literal.
    Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(
            js_string(r#"//div[@id="business-case-pdf"]/a"#),
            r#""//div[@id=\"business-case-pdf\"]/a""#
        );
    }

    #[test]
    fn test_script_embeds_body() {
        let s = script("return 1;");
        assert!(s.starts_with("(() => {"));
        assert!(s.contains("XPathResult.ORDERED_NODE_SNAPSHOT_TYPE"));
        assert!(s.trim_end().ends_with("return 1;\n})()"));
    }
}
