use async_trait::async_trait;

use crate::error::Result;

mod chrome;
#[cfg(test)]
pub mod scripted;

pub use chrome::ChromeBrowser;

/// The handful of page interactions the booking flow needs. Selectors are
/// CSS selectors.
#[async_trait]
pub trait BookingBrowser: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;
    async fn click(&self, selector: &str) -> Result<()>;
    /// Replaces the current value of an input.
    async fn type_text(&self, selector: &str, text: &str) -> Result<()>;
    /// Selects the first `<option>` of a `<select>` whose label contains `text`.
    /// `Ok(false)` when no option matches; the current selection is kept.
    async fn select_option_containing(&self, selector: &str, text: &str) -> Result<bool>;
    async fn content(&self) -> Result<String>;
    async fn reload(&self) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
}
