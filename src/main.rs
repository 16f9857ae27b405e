use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing_subscriber::prelude::*;
use tvmaze_browser::{
    BrowserConfig, BrowserError, DEFAULT_BASE_URL, Dispatch, Notifier, Page, ShowDirectory,
    SummaryMarkup, open_page, summary_text, write_page,
};

/// Search the TVMaze show directory and browse the episodes of a show
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the TVMaze API
    #[arg(long, env = "TVMAZE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Seconds to wait for each API request
    #[arg(long, env = "TVMAZE_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// How show summaries are written into the HTML page
    #[arg(long, value_enum, default_value_t = SummaryArg::Plain)]
    summaries: SummaryArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for shows and list the results
    Search {
        /// The search text
        query: String,

        /// Write the rendered page to this HTML file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the episodes of a show
    Episodes {
        /// The TVMaze show id
        show_id: u64,

        /// Write the rendered page to this HTML file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Search and pick shows interactively
    Browse {
        /// Write the rendered page to this HTML file after every step
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SummaryArg {
    /// Show the markup as text
    Escaped,
    /// Strip the markup
    Plain,
    /// Insert the markup unchanged
    Trusted,
}

impl From<SummaryArg> for SummaryMarkup {
    fn from(arg: SummaryArg) -> Self {
        match arg {
            SummaryArg::Escaped => SummaryMarkup::Escaped,
            SummaryArg::Plain => SummaryMarkup::PlainText,
            SummaryArg::Trusted => SummaryMarkup::Trusted,
        }
    }
}

/// Prints a notification for the user to stderr
fn notify_user(message: &str) {
    eprintln!("Notice: {}", message);
}

/// Prints the current shows region
fn print_shows<D: ShowDirectory, N: Notifier>(page: &Page<D, N>) {
    let shows = page.shows();
    if shows.is_empty() {
        println!("No shows found.");
        return;
    }

    for (index, card) in shows.cards().iter().enumerate() {
        println!("[{}] {} (id {})", index + 1, card.name, card.show_id);
        println!("    Image: {}", card.image_src);
        let summary = summary_text(&card.summary);
        if !summary.is_empty() {
            println!("    {}", summary);
        }
    }
}

/// Prints the current episodes region
fn print_episodes<D: ShowDirectory, N: Notifier>(page: &Page<D, N>) {
    let episodes = page.episodes();
    if episodes.items().is_empty() {
        println!("No episodes found.");
        return;
    }

    println!("\n=== Episodes ===");
    for item in episodes.items() {
        println!("  {}", item.text);
    }
}

fn save<D: ShowDirectory, N: Notifier>(
    page: &Page<D, N>,
    output: Option<&Path>,
) -> Result<(), BrowserError> {
    if let Some(path) = output {
        write_page(page, path)?;
        println!("Page written to {}", path.display());
    }
    Ok(())
}

/// Runs the interactive search/pick loop until an empty query is entered
fn browse<D: ShowDirectory, N: Notifier>(
    page: &Page<D, N>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let query: String = Input::new()
            .with_prompt("Search shows (empty to quit)")
            .allow_empty(true)
            .interact_text()?;

        if page.submit_search(&query) == Dispatch::Ignored {
            return Ok(());
        }
        print_shows(page);
        save(page, output)?;

        let shows = page.shows();
        if shows.is_empty() {
            continue;
        }

        let names: Vec<String> = shows
            .cards()
            .iter()
            .map(|card| format!("{} (id {})", card.name, card.show_id))
            .collect();

        let picked = Select::new()
            .with_prompt("Show episodes for")
            .items(&names)
            .default(0)
            .interact_opt()?;

        if let Some(index) = picked {
            page.click_episodes_on(index);
            print_episodes(page);
            save(page, output)?;
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = BrowserConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
        summary_markup: cli.summaries.into(),
        ..BrowserConfig::default()
    };

    let page = open_page(&config, notify_user)?;

    match cli.command {
        Command::Search { query, output } => {
            page.submit_search(&query);
            print_shows(&page);
            save(&page, output.as_deref())?;
        }
        Command::Episodes { show_id, output } => {
            page.click_episodes(show_id);
            print_episodes(&page);
            save(&page, output.as_deref())?;
        }
        Command::Browse { output } => browse(&page, output.as_deref())?,
    }

    Ok(())
}

fn main() {
    // initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
