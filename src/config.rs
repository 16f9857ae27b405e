//! Browser configuration
//!
//! Holds the settings shared by the directory client and the renderer.

use crate::render::SummaryMarkup;
use std::time::Duration;

/// Default TVMaze API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Default bounded wait for a single directory request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Poster shown for shows without artwork
pub const MISSING_IMAGE_URL: &str = "https://tinyurl.com/tv-missing";

/// Settings for a browser session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Base URL of the show directory API
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// Image URL used when a show has no usable poster
    pub placeholder_image: String,
    /// How show summaries are inserted into the rendered cards
    ///
    /// Defaults to `Escaped`. `Trusted` writes the directory's markup
    /// unchanged, as a plain pass-through renderer would.
    pub summary_markup: SummaryMarkup,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            placeholder_image: MISSING_IMAGE_URL.to_string(),
            summary_markup: SummaryMarkup::default(),
        }
    }
}
