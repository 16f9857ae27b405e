/// Data structures and traits for querying a TV show directory.
///
/// This module provides the normalized show and episode records the rest of
/// the crate works with, as well as the trait implemented by directory
/// backends.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeDirectory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to a show directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Request to the directory failed before a response arrived
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The directory did not answer within the configured timeout
    #[error("Request timed out after {0} ms")]
    Timeout(u128),

    /// The directory answered with a non-success status
    #[error("HTTP {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Failed to parse the directory's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

/// Image links attached to a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowImage {
    /// URL of the medium sized poster, if the directory provides one
    pub medium: Option<String>,
}

/// A show as returned by a search, reduced to the fields we display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowSummary {
    /// Stable directory identifier, used to look up the episodes
    pub id: u64,
    /// The show's title
    pub name: String,
    /// Summary text; may contain HTML markup from the directory
    pub summary: String,
    /// Poster links, absent for shows without artwork
    pub image: Option<ShowImage>,
}

impl ShowSummary {
    /// Returns the medium poster URL when the image is present and usable.
    pub fn medium_image(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|image| image.medium.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Stable directory identifier of the episode
    pub id: u64,
    /// The episode title
    pub name: String,
    /// The season this episode belongs to
    pub season: u32,
    /// The episode number within the season (specials have none)
    pub number: Option<u32>,
}

/// Trait for show directories that can be searched and browsed.
///
/// Implementors fetch shows and episodes from sources such as the TVMaze
/// API. Results are returned in the order the directory delivers them.
pub trait ShowDirectory {
    /// Searches the directory for shows matching a free-text query.
    ///
    /// # Arguments
    ///
    /// * `query` - The search text, passed to the directory unchanged
    ///
    /// # Returns
    ///
    /// The matching shows in directory order, or a DirectoryError
    fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, DirectoryError>;

    /// Fetches every episode of a show.
    ///
    /// # Arguments
    ///
    /// * `show_id` - The identifier from a previously returned ShowSummary
    ///
    /// # Returns
    ///
    /// The show's episodes in directory order, or a DirectoryError
    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, DirectoryError>;
}

impl<D: ShowDirectory + ?Sized> ShowDirectory for &D {
    fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, DirectoryError> {
        (**self).search_shows(query)
    }

    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, DirectoryError> {
        (**self).fetch_episodes(show_id)
    }
}
