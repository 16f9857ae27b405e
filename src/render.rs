//! Rendering of shows and episodes into display regions
//!
//! The two regions are plain values owned by the caller. Populating a region
//! always clears it first, so a region only ever holds the records of the
//! latest call. HTML output goes through the askama templates in
//! `templates/`.

use crate::config::MISSING_IMAGE_URL;
use crate::show_directory::{Episode, ShowSummary};
use crate::templates::{
    EpisodeItemTemplate, EpisodesAreaTemplate, ShowCardTemplate, ShowsListTemplate,
};
use askama::Template;

/// How show summaries are inserted into cards
///
/// Summaries come from the directory as HTML. Only `Trusted` inserts them
/// verbatim; the other variants never let directory markup through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryMarkup {
    /// Escape HTML special characters, showing the markup as text
    #[default]
    Escaped,
    /// Strip the markup and keep the readable text
    PlainText,
    /// Insert the directory's markup as-is
    Trusted,
}

impl SummaryMarkup {
    /// Prepares a directory summary for a card; escaping happens in the template
    pub fn apply(self, summary: &str) -> String {
        match self {
            SummaryMarkup::PlainText => summary_text(summary),
            SummaryMarkup::Escaped | SummaryMarkup::Trusted => summary.to_string(),
        }
    }
}

/// Converts a directory summary to readable plain text
pub fn summary_text(summary: &str) -> String {
    nanohtml2text::html2text(summary).trim().to_string()
}

/// One rendered show block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCard {
    /// Identifier carried as `data-show-id`, used by the Episodes trigger
    pub show_id: u64,
    /// The show's name as text
    pub name: String,
    /// Resolved poster URL (never empty)
    pub image_src: String,
    /// Summary after the configured markup policy was applied
    pub summary: String,
    /// Policy the summary was prepared with
    pub summary_markup: SummaryMarkup,
}

impl ShowCard {
    /// Returns true if the summary is written without escaping
    pub fn trusted_summary(&self) -> bool {
        self.summary_markup == SummaryMarkup::Trusted
    }

    /// Renders the card as an HTML fragment
    pub fn to_html(&self) -> Result<String, askama::Error> {
        ShowCardTemplate { card: self }.render()
    }
}

/// The search results region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowsList {
    cards: Vec<ShowCard>,
    placeholder_image: String,
}

impl ShowsList {
    /// Creates an empty region that falls back to `placeholder_image`
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        Self {
            cards: Vec::new(),
            placeholder_image: placeholder_image.into(),
        }
    }

    /// The rendered cards in display order
    pub fn cards(&self) -> &[ShowCard] {
        &self.cards
    }

    /// Returns true if no show is displayed
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of displayed cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Recovers the show identifier of the card at `index`
    pub fn show_id_at(&self, index: usize) -> Option<u64> {
        self.cards.get(index).map(|card| card.show_id)
    }

    /// Removes every card
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Renders the region as the `#shows-list` container
    pub fn to_html(&self) -> Result<String, askama::Error> {
        ShowsListTemplate { shows: self }.render()
    }
}

impl Default for ShowsList {
    fn default() -> Self {
        Self::new(MISSING_IMAGE_URL)
    }
}

/// One rendered episode line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeItem {
    /// Identifier carried as `data-episode-id`
    pub episode_id: u64,
    /// Display text, e.g. `S1.E1 - "Pilot"`
    pub text: String,
}

impl EpisodeItem {
    /// Renders the item as an `<li>` element
    pub fn to_html(&self) -> Result<String, askama::Error> {
        EpisodeItemTemplate { item: self }.render()
    }
}

/// The episode list region, hidden until first populated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodesArea {
    items: Vec<EpisodeItem>,
    visible: bool,
}

impl EpisodesArea {
    /// Creates an empty, hidden region
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered items in display order
    pub fn items(&self) -> &[EpisodeItem] {
        &self.items
    }

    /// Returns true once the region has been revealed
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reveals the region
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the region, keeping its items
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Renders the region as the `#episodes-area` section
    pub fn to_html(&self) -> Result<String, askama::Error> {
        EpisodesAreaTemplate { area: self }.render()
    }
}

/// Picks the poster for a show, falling back to `placeholder`
pub fn resolve_image<'a>(show: &'a ShowSummary, placeholder: &'a str) -> &'a str {
    show.medium_image().unwrap_or(placeholder)
}

/// Formats the display line of an episode
///
/// Specials without an episode number render an empty number.
pub fn episode_label(episode: &Episode) -> String {
    let number = episode.number.map(|n| n.to_string()).unwrap_or_default();
    format!("S{}.E{} - \"{}\"", episode.season, number, episode.name)
}

/// Replaces the contents of `list` with one card per show, in input order
pub fn populate_shows(list: &mut ShowsList, shows: &[ShowSummary], markup: SummaryMarkup) {
    list.cards.clear();

    for show in shows {
        let card = ShowCard {
            show_id: show.id,
            name: show.name.clone(),
            image_src: resolve_image(show, &list.placeholder_image).to_string(),
            summary: markup.apply(&show.summary),
            summary_markup: markup,
        };
        list.cards.push(card);
    }
}

/// Reveals `area` and replaces its contents with one item per episode
///
/// Episodes are listed in input order; nothing is sorted.
pub fn populate_episodes(area: &mut EpisodesArea, episodes: &[Episode]) {
    area.items.clear();
    area.show();

    area.items.extend(episodes.iter().map(|episode| EpisodeItem {
        episode_id: episode.id,
        text: episode_label(episode),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::show_directory::ShowImage;

    fn sample_show(id: u64, image: Option<ShowImage>) -> ShowSummary {
        ShowSummary {
            id,
            name: "Ice Guys".to_string(),
            summary: "<p>Lorem <b>ipsum</b> dolor</p>".to_string(),
            image,
        }
    }

    fn sample_episode(id: u64, season: u32, number: Option<u32>, name: &str) -> Episode {
        Episode {
            id,
            name: name.to_string(),
            season,
            number,
        }
    }

    fn rendered_card(show: ShowSummary, markup: SummaryMarkup) -> String {
        let mut list = ShowsList::default();
        populate_shows(&mut list, &[show], markup);
        list.cards()[0].to_html().unwrap()
    }

    #[test]
    fn test_image_fallback_to_placeholder() {
        let mut list = ShowsList::default();
        populate_shows(
            &mut list,
            &[
                sample_show(1, None),
                sample_show(2, Some(ShowImage { medium: None })),
            ],
            SummaryMarkup::Escaped,
        );

        assert_eq!(list.cards()[0].image_src, "https://tinyurl.com/tv-missing");
        assert_eq!(list.cards()[1].image_src, "https://tinyurl.com/tv-missing");
    }

    #[test]
    fn test_image_uses_medium_url_exactly() {
        let mut list = ShowsList::new("http://placeholder/none.png");
        let image = ShowImage {
            medium: Some("http://x/img.jpg".to_string()),
        };
        populate_shows(&mut list, &[sample_show(1, Some(image))], SummaryMarkup::Escaped);

        assert_eq!(list.cards()[0].image_src, "http://x/img.jpg");
        assert!(list.cards()[0].to_html().unwrap().contains(r#"src="http://x/img.jpg""#));
    }

    #[test]
    fn test_custom_placeholder() {
        let mut list = ShowsList::new("http://placeholder/none.png");
        populate_shows(&mut list, &[sample_show(1, None)], SummaryMarkup::Escaped);
        assert_eq!(list.cards()[0].image_src, "http://placeholder/none.png");
    }

    #[test]
    fn test_populate_shows_replaces_previous_cards() {
        let mut list = ShowsList::default();
        populate_shows(
            &mut list,
            &[sample_show(1, None), sample_show(2, None), sample_show(3, None)],
            SummaryMarkup::Escaped,
        );
        populate_shows(&mut list, &[sample_show(9, None)], SummaryMarkup::Escaped);

        assert_eq!(list.len(), 1);
        assert_eq!(list.show_id_at(0), Some(9));
        assert_eq!(list.show_id_at(1), None);

        let html = list.to_html().unwrap();
        assert_eq!(html.matches("<button>Episodes</button>").count(), 1);
        assert!(html.contains(r#"data-show-id="9""#));
        assert!(!html.contains(r#"data-show-id="1""#));
    }

    #[test]
    fn test_card_carries_show_id_and_trigger() {
        let mut list = ShowsList::default();
        populate_shows(&mut list, &[sample_show(42, None)], SummaryMarkup::Escaped);
        let html = list.to_html().unwrap();

        assert!(html.contains(r#"<div id="shows-list" class="row">"#));
        assert!(html.contains(r#"<div class="col-md-6 col-lg-3 Show" data-show-id="42">"#));
        assert!(html.contains(r#"<div class="card" data-show-id="42">"#));
        assert!(html.contains("<button>Episodes</button>"));
    }

    #[test]
    fn test_escaped_summary_keeps_markup_out() {
        let html = rendered_card(sample_show(1, None), SummaryMarkup::Escaped);
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<p>Lorem"));
        assert!(html.contains("Lorem"));
    }

    #[test]
    fn test_trusted_summary_passes_markup_through() {
        let html = rendered_card(sample_show(1, None), SummaryMarkup::Trusted);
        assert!(html.contains("<p>Lorem <b>ipsum</b> dolor</p>"));
    }

    #[test]
    fn test_plain_summary_strips_markup() {
        let summary = SummaryMarkup::PlainText.apply("<p>Lorem <b>ipsum</b> dolor</p>");
        assert!(!summary.contains('<'));
        assert!(summary.contains("Lorem"));
        assert!(summary.contains("ipsum"));

        let html = rendered_card(sample_show(1, None), SummaryMarkup::PlainText);
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_show_name_is_escaped_even_when_trusted() {
        let mut show = sample_show(1, None);
        show.name = "<script>alert(1)</script>".to_string();

        let html = rendered_card(show, SummaryMarkup::Trusted);
        assert!(!html.contains("<script>"));
        assert!(html.contains("alert(1)"));
    }

    #[test]
    fn test_image_attribute_is_escaped() {
        let image = ShowImage {
            medium: Some(r#"http://x/a.jpg" onerror="x"#.to_string()),
        };
        let html = rendered_card(sample_show(1, Some(image)), SummaryMarkup::Escaped);
        assert!(!html.contains(r#"" onerror=""#));
    }

    #[test]
    fn test_populate_episodes_reveals_and_formats() {
        let mut area = EpisodesArea::new();
        assert!(!area.is_visible());

        populate_episodes(&mut area, &[sample_episode(10, 1, Some(1), "Pilot")]);

        assert!(area.is_visible());
        assert_eq!(area.items().len(), 1);
        assert_eq!(area.items()[0].episode_id, 10);
        assert_eq!(area.items()[0].text, r#"S1.E1 - "Pilot""#);

        let html = area.to_html().unwrap();
        assert!(html.contains(r#"<section id="episodes-area">"#));
        assert_eq!(html.matches(r#"<li data-episode-id="10">"#).count(), 1);
        assert!(html.contains("S1.E1 - "));
        assert!(html.contains("Pilot"));
    }

    #[test]
    fn test_populate_episodes_keeps_input_order() {
        let mut area = EpisodesArea::new();
        populate_episodes(
            &mut area,
            &[
                sample_episode(3, 2, Some(1), "Later"),
                sample_episode(1, 1, Some(1), "Earlier"),
                sample_episode(2, 1, None, "Special"),
            ],
        );

        let ids: Vec<u64> = area.items().iter().map(|item| item.episode_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(area.items()[2].text, r#"S1.E - "Special""#);
    }

    #[test]
    fn test_populate_episodes_replaces_previous_items() {
        let mut area = EpisodesArea::new();
        populate_episodes(
            &mut area,
            &[
                sample_episode(1, 1, Some(1), "One"),
                sample_episode(2, 1, Some(2), "Two"),
            ],
        );
        populate_episodes(&mut area, &[sample_episode(5, 3, Some(7), "Five")]);

        assert_eq!(area.items().len(), 1);
        assert_eq!(area.items()[0].text, r#"S3.E7 - "Five""#);
        assert_eq!(area.to_html().unwrap().matches("<li ").count(), 1);
    }

    #[test]
    fn test_episode_item_html() {
        let item = EpisodeItem {
            episode_id: 7,
            text: "S2.E3 - <Gone>".to_string(),
        };
        let html = item.to_html().unwrap();
        assert!(html.starts_with(r#"<li data-episode-id="7">"#));
        assert!(!html.contains("<Gone>"));
    }

    #[test]
    fn test_hidden_area_html() {
        let area = EpisodesArea::new();
        assert!(
            area.to_html()
                .unwrap()
                .contains(r#"<section id="episodes-area" style="display: none">"#)
        );
    }
}
