//! HTML templates for the page and its regions.
//!
//! Output is HTML-escaped by default; only a trusted show summary is
//! written with `|safe`.

use crate::render::{EpisodeItem, EpisodesArea, ShowCard, ShowsList};
use askama::Template;

/// Template for a single show card.
#[derive(Template)]
#[template(path = "partials/show_card.html")]
pub(crate) struct ShowCardTemplate<'a> {
    pub card: &'a ShowCard,
}

/// Template for the search results region.
#[derive(Template)]
#[template(path = "partials/shows_list.html")]
pub(crate) struct ShowsListTemplate<'a> {
    pub shows: &'a ShowsList,
}

/// Template for a single episode line.
#[derive(Template)]
#[template(path = "partials/episode_item.html")]
pub(crate) struct EpisodeItemTemplate<'a> {
    pub item: &'a EpisodeItem,
}

/// Template for the episodes region.
#[derive(Template)]
#[template(path = "partials/episodes_area.html")]
pub(crate) struct EpisodesAreaTemplate<'a> {
    pub area: &'a EpisodesArea,
}

/// Template for the whole page: search form plus both regions.
#[derive(Template)]
#[template(path = "page.html")]
pub(crate) struct PageTemplate<'a> {
    pub query: &'a str,
    pub shows: &'a ShowsList,
    pub area: &'a EpisodesArea,
}
