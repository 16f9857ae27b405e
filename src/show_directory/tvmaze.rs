/// TVMaze show directory implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult, TvMazeShow};
use super::{DirectoryError, Episode, ShowDirectory, ShowImage, ShowSummary};
use crate::config::BrowserConfig;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Show directory backed by the TVMaze API.
///
/// This directory queries https://api.tvmaze.com (or a configured base URL)
/// using the show search and per-show episode endpoints.
pub struct TvMazeDirectory {
    client: reqwest::blocking::Client,
    base_url: String,
    timeout: Duration,
}

impl TvMazeDirectory {
    /// Creates a new TVMaze directory with the default configuration.
    pub fn new() -> Result<Self, DirectoryError> {
        Self::from_config(&BrowserConfig::default())
    }

    /// Creates a TVMaze directory using the base URL and timeout of `config`.
    pub fn from_config(config: &BrowserConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::RequestError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Converts a TVMaze show to our ShowSummary, keeping only the displayed fields.
    fn convert_show(tvmaze_show: TvMazeShow) -> ShowSummary {
        ShowSummary {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            summary: tvmaze_show.summary.unwrap_or_default(),
            image: tvmaze_show.image.map(|image| ShowImage {
                medium: image.medium,
            }),
        }
    }

    /// Converts a TVMaze episode to our internal Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            id: tvmaze_episode.id,
            name: tvmaze_episode.name.unwrap_or_default(),
            season: tvmaze_episode.season,
            number: tvmaze_episode.number,
        }
    }

    /// Maps a reqwest failure onto our error type.
    fn request_error(&self, error: reqwest::Error) -> DirectoryError {
        if error.is_timeout() {
            DirectoryError::Timeout(self.timeout.as_millis())
        } else if error.is_decode() {
            DirectoryError::ParseError(error.to_string())
        } else {
            DirectoryError::RequestError(error.to_string())
        }
    }

    /// Issues a GET request and decodes the JSON body.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DirectoryError> {
        debug!(url, ?query, "requesting TVMaze");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| self.request_error(e))?;

        // Ensure request was successful
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        // Read the body first so a slow body still counts as a timeout
        let body = response.bytes().map_err(|e| self.request_error(e))?;

        serde_json::from_slice(&body).map_err(|e| DirectoryError::ParseError(e.to_string()))
    }
}

impl ShowDirectory for TvMazeDirectory {
    fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, DirectoryError> {
        let url = format!("{}/search/shows", self.base_url);
        let results: Vec<TvMazeSearchResult> = self.get_json(&url, &[("q", query)])?;

        let shows: Vec<ShowSummary> = results
            .into_iter()
            .map(|result| Self::convert_show(result.show))
            .collect();

        debug!(query, count = shows.len(), "search returned shows");
        Ok(shows)
    }

    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<Episode>, DirectoryError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        let episodes: Vec<TvMazeEpisode> = self.get_json(&url, &[])?;

        let episodes: Vec<Episode> = episodes.into_iter().map(Self::convert_episode).collect();

        debug!(show_id, count = episodes.len(), "fetched episodes");
        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FIXTURE: &str = r#"[
        {
            "score": 0.91,
            "show": {
                "id": 1,
                "url": "https://www.tvmaze.com/shows/1/better-call-saul",
                "name": "Better Call Saul",
                "language": "English",
                "genres": ["Drama", "Crime"],
                "summary": "<p>The trials of <b>Jimmy McGill</b>.</p>",
                "image": {
                    "medium": "http://x/img.jpg",
                    "original": "http://x/img_full.jpg"
                }
            }
        },
        {
            "score": 0.42,
            "show": {
                "id": 2,
                "name": "Saul of the Mole Men",
                "summary": null,
                "image": null
            }
        }
    ]"#;

    const EPISODES_FIXTURE: &str = r#"[
        {"id": 10, "name": "Pilot", "season": 1, "number": 1, "airdate": "2015-02-08"},
        {"id": 12, "name": "Mijo", "season": 1, "number": 2},
        {"id": 11, "name": null, "season": 1, "number": null, "type": "insignificant_special"}
    ]"#;

    fn parse_shows(json: &str) -> Vec<ShowSummary> {
        let results: Vec<TvMazeSearchResult> = serde_json::from_str(json).unwrap();
        results
            .into_iter()
            .map(|result| TvMazeDirectory::convert_show(result.show))
            .collect()
    }

    #[test]
    fn test_convert_search_results() {
        let shows = parse_shows(SEARCH_FIXTURE);

        assert_eq!(shows.len(), 2);
        assert_eq!(
            shows[0],
            ShowSummary {
                id: 1,
                name: "Better Call Saul".to_string(),
                summary: "<p>The trials of <b>Jimmy McGill</b>.</p>".to_string(),
                image: Some(ShowImage {
                    medium: Some("http://x/img.jpg".to_string())
                }),
            }
        );
        assert_eq!(shows[1].id, 2);
        assert_eq!(shows[1].summary, "");
        assert_eq!(shows[1].image, None);
    }

    #[test]
    fn test_convert_episodes_keeps_order_and_specials() {
        let raw: Vec<TvMazeEpisode> = serde_json::from_str(EPISODES_FIXTURE).unwrap();
        let episodes: Vec<Episode> = raw
            .into_iter()
            .map(TvMazeDirectory::convert_episode)
            .collect();

        let ids: Vec<u64> = episodes.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 12, 11]);
        assert_eq!(episodes[0].name, "Pilot");
        assert_eq!(episodes[0].number, Some(1));
        assert_eq!(episodes[2].name, "");
        assert_eq!(episodes[2].number, None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = BrowserConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            ..BrowserConfig::default()
        };
        let directory = TvMazeDirectory::from_config(&config).unwrap();
        assert_eq!(directory.base_url(), "http://127.0.0.1:9");
    }
}
