//! TVMaze Browser - search TV shows and browse their episodes
//!
//! This library provides the client for the TVMaze show directory, the
//! normalized show and episode records, the renderer for the result and
//! episode regions, and the page that wires user events to them.

mod config;
mod lookup;
mod page;
mod render;
mod show_directory;
mod templates;

pub use config::{BrowserConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, MISSING_IMAGE_URL};
pub use lookup::{LookupOutcome, Notifier, get_episodes, search_shows, unreachable_message};
pub use page::{Dispatch, Page, RequestSequence, Ticket};
pub use render::{
    EpisodeItem, EpisodesArea, ShowCard, ShowsList, SummaryMarkup, episode_label, populate_episodes,
    populate_shows, resolve_image, summary_text,
};
pub use show_directory::{
    DirectoryError, Episode, ShowDirectory, ShowImage, ShowSummary, TvMazeDirectory,
};

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for browser operations
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Error while setting up the directory client
    #[error("Show directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Failed to render the page template
    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),

    /// Failed to write the rendered page
    #[error("Failed to write page to {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },
}

/// Opens a page backed by the TVMaze API
///
/// # Arguments
///
/// * `config` - Base URL, timeout and rendering settings
/// * `notifier` - Receives user-visible notifications when a request fails
///
/// # Examples
///
/// ```no_run
/// use tvmaze_browser::{open_page, BrowserConfig, Dispatch};
///
/// let page = open_page(&BrowserConfig::default(), |message: &str| {
///     eprintln!("Notice: {}", message);
/// })
/// .unwrap();
///
/// if let Dispatch::Rendered(count) = page.submit_search("Better Call Saul") {
///     println!("{} show(s) found", count);
///     page.click_episodes_on(0);
/// }
/// ```
pub fn open_page<N>(
    config: &BrowserConfig,
    notifier: N,
) -> Result<Page<TvMazeDirectory, N>, BrowserError>
where
    N: Notifier,
{
    let directory = TvMazeDirectory::from_config(config)?;
    Ok(Page::new(directory, notifier, config))
}

/// Writes the page's HTML document to `path`
pub fn write_page<D, N>(page: &Page<D, N>, path: &Path) -> Result<(), BrowserError>
where
    D: ShowDirectory,
    N: Notifier,
{
    let html = page.to_html()?;
    std::fs::write(path, html).map_err(|e| BrowserError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
