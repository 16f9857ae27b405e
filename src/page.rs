//! Page state and event handlers
//!
//! A `Page` owns the two display regions and wires user events to the
//! directory lookups and the renderer. Handlers take `&self`, so a second
//! search may be submitted while an earlier one is still waiting for the
//! directory. Each handler takes a ticket before its request goes out; a
//! response whose ticket is no longer the latest for its region is dropped.

use crate::config::BrowserConfig;
use crate::lookup::{self, LookupOutcome, Notifier};
use crate::render::{self, EpisodesArea, ShowsList, SummaryMarkup};
use crate::show_directory::ShowDirectory;
use crate::templates::PageTemplate;
use askama::Template;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Monotonic counter of issued requests for one region
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

/// Sequence number handed to one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestSequence {
    /// Creates a sequence with no ticket issued yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if no newer ticket has been issued since `ticket`
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// What a handler did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The event was ignored (empty query, unknown card)
    Ignored,
    /// A newer request for the same region was issued meanwhile; nothing rendered
    Stale,
    /// The region now shows this many records
    Rendered(usize),
    /// The directory failed; the region was cleared and the user notified
    Failed(String),
}

/// The display regions and the last submitted query
#[derive(Debug, Clone)]
struct Regions {
    query: String,
    shows: ShowsList,
    episodes: EpisodesArea,
}

/// A browser page bound to a show directory and a notifier
pub struct Page<D, N> {
    directory: D,
    notifier: N,
    summary_markup: SummaryMarkup,
    regions: Mutex<Regions>,
    searches: RequestSequence,
    lookups: RequestSequence,
}

impl<D, N> Page<D, N>
where
    D: ShowDirectory,
    N: Notifier,
{
    /// Creates a page with empty results and a hidden episodes area
    pub fn new(directory: D, notifier: N, config: &BrowserConfig) -> Self {
        Self {
            directory,
            notifier,
            summary_markup: config.summary_markup,
            regions: Mutex::new(Regions {
                query: String::new(),
                shows: ShowsList::new(config.placeholder_image.clone()),
                episodes: EpisodesArea::new(),
            }),
            searches: RequestSequence::new(),
            lookups: RequestSequence::new(),
        }
    }

    fn regions(&self) -> MutexGuard<'_, Regions> {
        self.regions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles a search form submission
    ///
    /// An empty query is ignored without touching the directory or the
    /// episodes area. Otherwise the episodes area is hidden, the directory is
    /// searched and the results replace the shows list. Any episode lookup
    /// still in flight is superseded by the new search.
    pub fn submit_search(&self, query: &str) -> Dispatch {
        if query.is_empty() {
            return Dispatch::Ignored;
        }

        let ticket = self.searches.issue();
        self.lookups.issue();
        {
            let mut regions = self.regions();
            regions.query = query.to_string();
            regions.episodes.hide();
        }

        let outcome = lookup::search_shows(&self.directory, &self.notifier, query);

        let mut regions = self.regions();
        if !self.searches.is_latest(ticket) {
            warn!(query, "discarding results of a superseded search");
            return Dispatch::Stale;
        }

        render::populate_shows(&mut regions.shows, outcome.records(), self.summary_markup);
        debug!(query, count = regions.shows.len(), "rendered shows");
        Self::dispatch(outcome, regions.shows.len())
    }

    /// Handles a click on the Episodes trigger of the card at `card_index`
    ///
    /// The show identifier is recovered from the rendered card.
    pub fn click_episodes_on(&self, card_index: usize) -> Dispatch {
        let show_id = self.regions().shows.show_id_at(card_index);
        match show_id {
            Some(show_id) => self.click_episodes(show_id),
            None => Dispatch::Ignored,
        }
    }

    /// Fetches the episodes of `show_id` and renders them into the episodes area
    pub fn click_episodes(&self, show_id: u64) -> Dispatch {
        let ticket = self.lookups.issue();

        let outcome = lookup::get_episodes(&self.directory, &self.notifier, show_id);

        let mut regions = self.regions();
        if !self.lookups.is_latest(ticket) {
            warn!(show_id, "discarding episodes of a superseded lookup");
            return Dispatch::Stale;
        }

        render::populate_episodes(&mut regions.episodes, outcome.records());
        debug!(show_id, count = regions.episodes.items().len(), "rendered episodes");
        Self::dispatch(outcome, regions.episodes.items().len())
    }

    fn dispatch<T>(outcome: LookupOutcome<T>, rendered: usize) -> Dispatch {
        match outcome {
            LookupOutcome::Found(_) => Dispatch::Rendered(rendered),
            LookupOutcome::Failed(reason) => Dispatch::Failed(reason),
        }
    }

    /// Returns a copy of the current shows region
    pub fn shows(&self) -> ShowsList {
        self.regions().shows.clone()
    }

    /// Returns a copy of the current episodes region
    pub fn episodes(&self) -> EpisodesArea {
        self.regions().episodes.clone()
    }

    /// Renders the whole page as an HTML document
    pub fn to_html(&self) -> Result<String, askama::Error> {
        let regions = self.regions();
        PageTemplate {
            query: &regions.query,
            shows: &regions.shows,
            area: &regions.episodes,
        }
        .render()
    }
}
