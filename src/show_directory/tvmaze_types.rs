/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Fields we never display are left out and ignored by serde.
use serde::Deserialize;

/// One hit from the TVMaze search endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show
    pub show: TvMazeShow,
}

/// A show object as embedded in search results.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    /// The TVMaze show id
    pub id: u64,
    /// The name of the TV show
    pub name: String,
    /// Show summary in HTML format (may be null)
    pub summary: Option<String>,
    /// Poster links (null for shows without artwork)
    pub image: Option<TvMazeImage>,
}

/// Image links of a show.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    /// Medium sized poster URL
    pub medium: Option<String>,
}

/// A single episode from the TVMaze API.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    /// The TVMaze episode id
    pub id: u64,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    /// Season number
    pub season: u32,
    /// Episode number within the season (null for specials)
    pub number: Option<u32>,
}
