//! In-memory browser for tests: serves canned HTML and records every action.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::BookingBrowser;
use crate::error::{ReservationError, Result};

#[derive(Clone, Default)]
pub struct ScriptedBrowser {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Pages per URL, served in order by `content()` after a `goto` of that
    /// URL. The last page repeats once the list is exhausted.
    pages: Mutex<HashMap<String, Vec<String>>>,
    served: Mutex<HashMap<String, usize>>,
    current: Mutex<String>,
    missing: Mutex<HashSet<String>>,
    absent_options: Mutex<HashSet<String>>,
    actions: Mutex<Vec<String>>,
    closed: Mutex<bool>,
}

impl ScriptedBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(self, url: &str, pages: Vec<String>) -> Self {
        self.inner.pages.lock().unwrap().insert(url.to_string(), pages);
        self
    }

    /// Makes every interaction with `selector` fail as if it were absent.
    pub fn without(self, selector: &str) -> Self {
        self.inner.missing.lock().unwrap().insert(selector.to_string());
        self
    }

    /// Makes `select_option_containing` find no option for `text`.
    pub fn without_option(self, text: &str) -> Self {
        self.inner.absent_options.lock().unwrap().insert(text.to_string());
        self
    }

    pub fn actions(&self) -> Vec<String> {
        self.inner.actions.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.actions().iter().filter(|a| a.starts_with(prefix)).count()
    }

    pub fn is_closed(&self) -> bool {
        *self.inner.closed.lock().unwrap()
    }

    fn record(&self, action: String) {
        self.inner.actions.lock().unwrap().push(action);
    }

    fn check(&self, selector: &str) -> Result<()> {
        if self.inner.missing.lock().unwrap().contains(selector) {
            return Err(ReservationError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BookingBrowser for ScriptedBrowser {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(format!("goto {}", url));
        *self.inner.current.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.check(selector)?;
        self.record(format!("click {}", selector));
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<()> {
        self.check(selector)?;
        self.record(format!("type {} {}", selector, text));
        Ok(())
    }

    async fn select_option_containing(&self, selector: &str, text: &str) -> Result<bool> {
        self.check(selector)?;
        if self.inner.absent_options.lock().unwrap().contains(text) {
            return Ok(false);
        }
        self.record(format!("select {} {}", selector, text));
        Ok(true)
    }

    async fn content(&self) -> Result<String> {
        let url = self.inner.current.lock().unwrap().clone();
        let pages = self.inner.pages.lock().unwrap();
        let mut served = self.inner.served.lock().unwrap();
        let index = served.entry(url.clone()).or_insert(0);
        let page = pages
            .get(&url)
            .and_then(|list| list.get(*index).or_else(|| list.last()))
            .cloned()
            .unwrap_or_default();
        *index += 1;
        Ok(page)
    }

    async fn reload(&self) -> Result<()> {
        self.record("reload".to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        *self.inner.closed.lock().unwrap() = true;
        Ok(())
    }
}
