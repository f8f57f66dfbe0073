use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podcastr::episode::truncate_title;
use podcastr::{
    ApiConfig, DEFAULT_API_URL, EpisodeDetail, HomePage, PlayerEvent, PlayerObserver,
    PlayerStore, ReqwestClient, Session, format_header_date, load_episode_page, load_featured,
    load_home, logging, parse_episode_number, strip_html,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SPARKLES: Emoji<'_, '_> = Emoji("✨ ", "[*] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");

/// Browse podcast episodes and play them from the terminal
#[derive(Parser, Debug)]
#[command(name = "podcastr")]
#[command(about = "Browse podcast episodes and play them from the terminal")]
#[command(version)]
struct Args {
    /// Base URL of the episode API
    #[arg(long, env = "PODCASTR_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Number of episodes to load for the home page
    #[arg(short, long, env = "PODCASTR_LIMIT", default_value = "12", global = true)]
    limit: usize,

    /// Number of episodes shown as latest releases
    #[arg(long, default_value = "2", global = true)]
    latest: usize,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the latest releases and all other episodes
    List,

    /// Show the detail page of one episode
    Show {
        /// Episode id
        id: String,
    },

    /// Print the ids of the most recent episodes
    Featured,

    /// Start an interactive player session
    Play {
        /// Play only this episode instead of the home page list
        id: Option<String>,

        /// Position in the home page list to start at (1-based)
        #[arg(short, long, default_value = "1", value_parser = parse_start)]
        start: usize,

        /// Start with shuffle mode on
        #[arg(long)]
        shuffle: bool,

        /// Start with loop mode on
        #[arg(long = "loop")]
        looping: bool,
    },
}

/// Parse `--start` into a queue index, rejecting 0
fn parse_start(value: &str) -> Result<usize, String> {
    parse_episode_number(value)
        .ok_or_else(|| format!("'{}' is not an episode number (1 or higher)", value))
}

/// What the media element does in response to a store event, if anything
fn media_action(event: &PlayerEvent) -> Option<String> {
    match event {
        PlayerEvent::EpisodeChanged { index, episode_id } => {
            Some(format!("media: loading #{} ({})", index + 1, episode_id))
        }
        PlayerEvent::PlayingChanged(true) => Some("media: play".to_string()),
        PlayerEvent::PlayingChanged(false) => Some("media: pause".to_string()),
        _ => None,
    }
}

/// Stands in for the media element: follows the store and reports what it would do
struct TerminalMedia;

impl PlayerObserver for TerminalMedia {
    fn notify(&self, event: PlayerEvent) {
        match media_action(&event) {
            Some(action) => println!("{}", action.dimmed()),
            None => tracing::debug!(event = ?event, "media: ignored"),
        }
    }
}

async fn with_spinner<T>(message: String, task: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = task.await;
    spinner.finish_and_clear();
    result
}

fn print_header() {
    println!(
        "\n{}{} {}  {}{}\n",
        MICROPHONE,
        "podcastr".bold().magenta(),
        "- The best for you to listen to".dimmed(),
        CALENDAR,
        format_header_date(Local::now().date_naive()).cyan()
    );
}

fn print_home(page: &HomePage) {
    if page.is_empty() {
        println!("{}", "No episodes found".yellow());
        return;
    }

    println!("{}{}", SPARKLES, "Latest releases".bold().green());
    for (index, detail) in page.latest.iter().enumerate() {
        println!(
            "  {:>2}. {}",
            (index + 1).to_string().cyan(),
            detail.episode.title.bold()
        );
        println!("      {}", detail.episode.members.dimmed());
        println!(
            "      {} · {}   {}",
            detail.published_string(),
            detail.duration_string(),
            detail.episode.id.dimmed()
        );
    }

    if page.all.is_empty() {
        return;
    }

    println!("\n{}{}", HEADPHONES, "All episodes".bold().green());
    println!(
        "  {:>3}  {:<50} {:<30} {:<10} {:>8}",
        "#",
        "Podcast",
        "Members",
        "Date",
        "Duration"
    );
    for (offset, detail) in page.all.iter().enumerate() {
        let number = page.latest.len() + offset + 1;
        println!(
            "  {:>3}  {:<50} {:<30} {:<10} {:>8}",
            number.to_string().cyan(),
            truncate_title(&detail.episode.title, 50),
            truncate_title(&detail.episode.members, 30).dimmed(),
            detail.published_string(),
            detail.duration_string()
        );
    }
}

fn print_episode(detail: &EpisodeDetail) {
    println!("{}", detail.episode.title.bold().magenta());
    println!("{}", detail.episode.members.dimmed());
    println!(
        "{} · {}\n",
        detail.published_string().cyan(),
        detail.duration_string().cyan()
    );

    let description = strip_html(&detail.description);
    if !description.is_empty() {
        println!("{}\n", description);
    }

    println!(
        "{} podcastr play {}\n",
        "Play with:".dimmed(),
        detail.episode.id
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config =
        ApiConfig::new(&args.api_url, args.limit, args.latest).context("Invalid configuration")?;
    let client = ReqwestClient::new();

    match args.command {
        Commands::List => {
            print_header();
            let page = with_spinner(
                format!("Fetching episodes from {}", config.base_url.as_str().cyan()),
                load_home(&client, &config),
            )
            .await
            .context("Failed to load episodes")?;
            print_home(&page);
            println!();
        }

        Commands::Show { id } => {
            let detail = with_spinner(
                format!("Fetching episode {}", id.cyan()),
                load_episode_page(&client, &config, &id),
            )
            .await
            .with_context(|| format!("Failed to load episode '{}'", id))?;
            println!();
            print_episode(&detail);
        }

        Commands::Featured => {
            let ids = with_spinner(
                "Fetching featured episodes".to_string(),
                load_featured(&client, &config),
            )
            .await
            .context("Failed to load featured episodes")?;
            for id in ids {
                println!("{}", id);
            }
        }

        Commands::Play {
            id,
            start,
            shuffle,
            looping,
        } => {
            let mut store = PlayerStore::new().with_observer(Arc::new(TerminalMedia));

            let library = match id {
                Some(id) => {
                    let episode = with_spinner(
                        format!("Fetching episode {}", id.cyan()),
                        load_episode_page(&client, &config, &id),
                    )
                    .await
                    .with_context(|| format!("Failed to load episode '{}'", id))?
                    .into_episode();
                    store.play(episode.clone());
                    vec![episode]
                }
                None => {
                    let page = with_spinner(
                        "Fetching episodes".to_string(),
                        load_home(&client, &config),
                    )
                    .await
                    .context("Failed to load episodes")?;
                    let library = page.playlist();
                    store
                        .play_list(library.clone(), start)
                        .context("Invalid start position")?;
                    library
                }
            };

            if shuffle {
                store.toggle_shuffle();
            }
            if looping {
                store.toggle_loop();
            }

            println!(
                "\n{}{} {}\n",
                HEADPHONES,
                "podcastr player".bold().magenta(),
                "- type 'help' for commands".dimmed()
            );

            let mut session = Session::new(store, library);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            session
                .run(stdin.lock(), &mut stdout)
                .context("Player session failed")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_one_based() {
        assert_eq!(parse_start("1"), Ok(0));
        assert_eq!(parse_start("4"), Ok(3));
    }

    #[test]
    fn start_rejects_zero_and_garbage() {
        let err = parse_start("0").unwrap_err();
        assert!(err.contains("'0'"));
        assert!(parse_start("first").is_err());
    }

    #[test]
    fn args_reject_start_zero() {
        let result = Args::try_parse_from(["podcastr", "play", "--start", "0"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["podcastr", "play", "--start", "3"]).unwrap();
        assert!(matches!(args.command, Commands::Play { start: 2, .. }));
    }

    #[test]
    fn media_reports_loads_and_playback() {
        let load = PlayerEvent::EpisodeChanged {
            index: 2,
            episode_id: "ep-3".to_string(),
        };
        assert_eq!(
            media_action(&load).as_deref(),
            Some("media: loading #3 (ep-3)")
        );
        assert_eq!(
            media_action(&PlayerEvent::PlayingChanged(true)).as_deref(),
            Some("media: play")
        );
        assert_eq!(
            media_action(&PlayerEvent::PlayingChanged(false)).as_deref(),
            Some("media: pause")
        );
    }

    #[test]
    fn media_ignores_mode_switches() {
        assert_eq!(media_action(&PlayerEvent::LoopingChanged(true)), None);
        assert_eq!(media_action(&PlayerEvent::Cleared), None);
    }
}
