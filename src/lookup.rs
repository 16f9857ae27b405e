//! Client-call boundary
//!
//! Wraps directory requests so that failures never reach the renderer or the
//! event handlers: each failure becomes one user-visible notification and a
//! tagged `Failed` outcome that degrades to an empty list.

use crate::show_directory::{DirectoryError, Episode, ShowDirectory, ShowSummary};
use tracing::warn;

/// Receives user-visible notifications
///
/// Any `Fn(&str)` closure is a notifier, which keeps silent or capturing
/// notifiers cheap to write.
pub trait Notifier {
    /// Shows a message to the user
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Result of a directory lookup at the client boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    /// The directory answered; the list may be empty
    Found(Vec<T>),
    /// The directory was unreachable or erroring; the user has been notified
    Failed(String),
}

impl<T> LookupOutcome<T> {
    /// Returns the records, treating a failure as "no results"
    pub fn into_records(self) -> Vec<T> {
        match self {
            LookupOutcome::Found(records) => records,
            LookupOutcome::Failed(_) => Vec::new(),
        }
    }

    /// Borrows the records, empty on failure
    pub fn records(&self) -> &[T] {
        match self {
            LookupOutcome::Found(records) => records,
            LookupOutcome::Failed(_) => &[],
        }
    }

    /// Returns true if the directory could not be reached
    pub fn is_failed(&self) -> bool {
        matches!(self, LookupOutcome::Failed(_))
    }
}

/// Formats the notification shown when the directory cannot be reached
pub fn unreachable_message(error: &DirectoryError) -> String {
    format!("Could not reach TV Maze API at this time. Error: {}", error)
}

fn settle<T, N>(result: Result<Vec<T>, DirectoryError>, notifier: &N) -> LookupOutcome<T>
where
    N: Notifier + ?Sized,
{
    match result {
        Ok(records) => LookupOutcome::Found(records),
        Err(error) => {
            warn!(%error, "directory request failed");
            notifier.notify(&unreachable_message(&error));
            LookupOutcome::Failed(error.to_string())
        }
    }
}

/// Searches for shows matching `query`
///
/// # Arguments
///
/// * `directory` - The show directory to query
/// * `notifier` - Receives one message if the request fails
/// * `query` - The free-text search, expected to be non-empty
///
/// # Returns
///
/// The matching shows in directory order, or `Failed` after notifying the user
pub fn search_shows<D, N>(directory: &D, notifier: &N, query: &str) -> LookupOutcome<ShowSummary>
where
    D: ShowDirectory + ?Sized,
    N: Notifier + ?Sized,
{
    settle(directory.search_shows(query), notifier)
}

/// Fetches the episodes of the show identified by `show_id`
///
/// Every call goes to the directory; nothing is cached between calls.
pub fn get_episodes<D, N>(directory: &D, notifier: &N, show_id: u64) -> LookupOutcome<Episode>
where
    D: ShowDirectory + ?Sized,
    N: Notifier + ?Sized,
{
    settle(directory.fetch_episodes(show_id), notifier)
}
