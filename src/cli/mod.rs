//! # CLI Module
//!
//! Command-line interface for the photo date game.
//!
//! ## Usage
//! ```bash
//! # Build the corpus from folders.txt and play
//! photo-guess play
//!
//! # Index once, then play from the cache
//! photo-guess index folders.txt --name family
//! photo-guess play --cache family
//!
//! # List saved caches
//! photo-guess caches
//! ```

mod prompt;

use clap::{Args, Parser, Subcommand};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_date_game::core::cache::{default_cache_dir, CorpusStore, FileCorpusStore};
use photo_date_game::core::corpus::{CorpusPool, ImageRecord};
use photo_date_game::core::game::{CommandViewer, GameEngine, ImageViewer, Player, RoundResult};
use photo_date_game::core::scanner::{read_root_list, BuildConfig, CorpusBuilder};
use photo_date_game::error::{Result, SetupError, ViewerError};
use photo_date_game::events::{Event, EventChannel, ScanEvent};
use prompt::Prompter;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Photo Date Game - When was this picture taken?
#[derive(Parser, Debug)]
#[command(name = "photo-guess")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game
    Play {
        /// File listing photo folders, one per line
        #[arg(short, long, default_value = "folders.txt")]
        folders: PathBuf,

        /// Load the corpus from this cache instead of scanning
        #[arg(short, long)]
        cache: Option<String>,

        /// Save the scanned corpus under this name without asking
        #[arg(long, conflicts_with = "cache")]
        save_cache: Option<String>,

        /// Seed for reproducible image picks
        #[arg(long)]
        seed: Option<u64>,

        /// Program used to open images (defaults to the desktop opener)
        #[arg(long, conflicts_with = "no_viewer")]
        viewer: Option<String>,

        /// Print image paths instead of opening them
        #[arg(long)]
        no_viewer: bool,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Scan folders and save the corpus for later games
    Index {
        /// File listing photo folders, one per line
        folders: PathBuf,

        /// Cache name
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// List saved caches
    Caches {
        #[command(flatten)]
        storage: StorageArgs,
    },
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Skip hidden files and folders
    #[arg(long)]
    skip_hidden: bool,

    /// Follow symbolic links while scanning
    #[arg(long)]
    follow_symlinks: bool,

    /// Maximum folder depth below each listed folder
    #[arg(long)]
    max_depth: Option<usize>,

    /// Image extension to include (repeatable, default: png, jpg, jpeg)
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,
}

impl ScanArgs {
    fn config(&self) -> BuildConfig {
        BuildConfig {
            include_hidden: !self.skip_hidden,
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            extensions: (!self.extensions.is_empty()).then(|| self.extensions.clone()),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug)]
struct StorageArgs {
    /// Directory holding corpus caches
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

impl StorageArgs {
    fn store(&self) -> FileCorpusStore {
        FileCorpusStore::new(self.cache_dir.clone().unwrap_or_else(default_cache_dir))
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            folders,
            cache,
            save_cache,
            seed,
            viewer,
            no_viewer,
            scan,
            storage,
        } => {
            let viewer: Box<dyn ImageViewer> = match (no_viewer, viewer) {
                (true, _) => Box::new(PathViewer),
                (false, Some(program)) => Box::new(CommandViewer::new(program)),
                (false, None) => Box::new(CommandViewer::system_default()),
            };
            run_play(
                &folders,
                cache,
                save_cache,
                seed,
                viewer,
                scan.config(),
                &storage.store(),
            )
        }
        Commands::Index {
            folders,
            name,
            scan,
            storage,
        } => run_index(&folders, &name, scan.config(), &storage.store()),
        Commands::Caches { storage } => run_caches(&storage.store()),
    }
}

/// Prints the image path for players to open themselves
struct PathViewer;

impl ImageViewer for PathViewer {
    fn show(&mut self, record: &ImageRecord) -> std::result::Result<(), ViewerError> {
        Term::stdout()
            .write_line(&style(record.path().display()).underlined().to_string())
            .ok();
        Ok(())
    }
}

fn run_play(
    folders: &Path,
    cache: Option<String>,
    save_cache: Option<String>,
    seed: Option<u64>,
    mut viewer: Box<dyn ImageViewer>,
    config: BuildConfig,
    store: &FileCorpusStore,
) -> Result<()> {
    let term = Term::stdout();
    let mut prompter = Prompter::new();

    print_header(&term);

    let pool = prepare_pool(&prompter, folders, cache, save_cache, config, store)?;
    if pool.is_empty() {
        return Err(SetupError::EmptyPool.into());
    }

    print_banner(&term, "Enter Info");
    let count = prompter.player_count()?;
    let names = prompter.player_names(count)?;

    let mut engine = match seed {
        Some(seed) => GameEngine::with_seed(pool, names, seed)?,
        None => GameEngine::new(pool, names)?,
    };

    loop {
        let round = engine.rounds_played() + 1;
        print_banner(&term, &format!("Round {}", round));
        term.write_line("Displaying image...").ok();

        let result = engine.play_round(viewer.as_mut(), &mut prompter)?;

        print_answer(&term, &result);
        print_round_scores(&term, &result, engine.standings());
        print_stats(&term, engine.standings());

        let question = format!("\nContinue to round {}? [Y/n]: ", round + 1);
        if !prompter.confirm(&question, true)? {
            break;
        }
    }

    let standings = engine.end();
    print_banner(&term, "Game Ends");
    print_stats(&term, standings);

    Ok(())
}

/// Get a corpus from the cache or by scanning, as the player prefers
fn prepare_pool(
    prompter: &Prompter,
    folders: &Path,
    cache: Option<String>,
    save_cache: Option<String>,
    config: BuildConfig,
    store: &FileCorpusStore,
) -> Result<CorpusPool> {
    let cache = match cache {
        Some(name) => Some(name),
        None if save_cache.is_none()
            && prompter.confirm("Do you wish to read from cache? [y/N]: ", false)? =>
        {
            Some(prompter.ask("Name of cache file: ")?)
        }
        None => None,
    };

    if let Some(name) = cache {
        return Ok(store.load(name.trim())?);
    }

    let pool = build_corpus(folders, config)?;

    let save_as = match save_cache {
        Some(name) => Some(name),
        None if prompter.confirm(
            "Do you wish to cache the paths for quick loading next time? [Y/n]: ",
            true,
        )? =>
        {
            Some(prompter.ask("Name the cache file: ")?)
        }
        None => None,
    };

    if let Some(name) = save_as {
        // Saving is optional; the game goes on without it
        if let Err(e) = store.save(name.trim(), &pool) {
            warn!(error = %e, "corpus cache not saved");
            prompter.warn(&format!("Cache not saved: {}", e));
        }
    }

    Ok(pool)
}

/// Scan the listed folders with a spinner showing progress
fn build_corpus(folders: &Path, config: BuildConfig) -> Result<CorpusPool> {
    let roots = read_root_list(folders)?;
    let term = Term::stderr();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Scanning photo folders...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let (sender, receiver) = EventChannel::new();
    let progress = spinner.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Scan(ScanEvent::Progress(p)) => {
                    progress.set_message(format!(
                        "{} files scanned in {} ({} dated)",
                        p.files_scanned,
                        p.root.display(),
                        p.images_found
                    ));
                }
                Event::Scan(ScanEvent::RootMissing { root }) => {
                    progress.println(format!(
                        "{} Folder {} not found.",
                        style("Warning:").yellow().bold(),
                        root.display()
                    ));
                }
                Event::Scan(ScanEvent::Completed { .. }) => progress.finish_and_clear(),
                _ => {}
            }
        }
    });

    let result = CorpusBuilder::new(config).build_with_events(&roots, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    term.write_line(&format!(
        "{} {} dated photos found ({} skipped without a capture date)",
        style("✓").green().bold(),
        style(result.pool.len()).cyan(),
        style(result.skipped).dim()
    ))
    .ok();

    Ok(result.pool)
}

fn run_index(
    folders: &Path,
    name: &str,
    config: BuildConfig,
    store: &FileCorpusStore,
) -> Result<()> {
    let pool = build_corpus(folders, config)?;
    if pool.is_empty() {
        return Err(SetupError::EmptyPool.into());
    }

    store.save(name, &pool)?;

    Term::stdout()
        .write_line(&format!(
            "{} Saved {} photos as '{}' in {}",
            style("✓").green().bold(),
            style(pool.len()).cyan(),
            name,
            store.root().display()
        ))
        .ok();

    Ok(())
}

fn run_caches(store: &FileCorpusStore) -> Result<()> {
    let term = Term::stdout();
    let names = store.list()?;

    if names.is_empty() {
        term.write_line(&format!(
            "No caches in {}",
            style(store.root().display()).dim()
        ))
        .ok();
        return Ok(());
    }

    for name in names {
        term.write_line(&name).ok();
    }

    Ok(())
}

fn print_header(term: &Term) {
    term.write_line(&format!(
        "{} {}",
        style("Photo Date Game").bold().cyan(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
}

fn print_banner(term: &Term, title: &str) {
    term.write_line("").ok();
    term.write_line(&style(format!("{:_^34}", title)).bold().to_string())
        .ok();
}

fn print_answer(term: &Term, result: &RoundResult) {
    print_banner(term, "Answer");
    term.write_line(&style(result.answer()).green().bold().to_string())
        .ok();
}

fn name_of(players: &[Player], id: u32) -> &str {
    players
        .iter()
        .find(|p| p.id() == id)
        .map(Player::name)
        .unwrap_or("?")
}

fn print_round_scores(term: &Term, result: &RoundResult, players: &[Player]) {
    print_banner(term, "Round Score");

    let mut line = String::from("|");
    for guess in result.ranking() {
        let entry = format!(" {} : {:.2} ", name_of(players, guess.player_id), guess.diff);
        if result.is_winner(guess.player_id) {
            line.push_str(&style(entry).green().to_string());
        } else {
            line.push_str(&entry);
        }
        line.push('|');
    }
    term.write_line(&line).ok();
}

fn print_stats(term: &Term, players: &[Player]) {
    print_banner(term, "Stats");

    let wins: String = players
        .iter()
        .map(|p| format!(" {} : {} |", p.name(), p.wins()))
        .collect();
    let scores: String = players
        .iter()
        .map(|p| format!(" {} : {:.2} |", p.name(), p.score()))
        .collect();

    term.write_line(&format!("\nWins: |{}", wins)).ok();
    term.write_line(&format!("\nScores: |{}", scores)).ok();
}
