//! movie-rating CLI
//!
//! Looks up a single release name, or every movie folder under a directory.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use movie_rating::{
    error::Result,
    models::Config,
    pipeline::{self, LookupOptions, MovieLookup},
    services::{MetadataProvider, SearchResultMatcher, TmdbClient},
    utils::http::HttpFetcher,
    utils::log::{ConsoleReporter, Reporter},
};

/// movie-rating - IMDb rating lookup for movie folders
#[derive(Parser, Debug)]
#[command(
    name = "movie-rating",
    version,
    about = "Resolve movie folder names to IMDb ratings"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml", global = true)]
    config: PathBuf,

    /// Cross-check each match against TMDB
    #[arg(long, global = true)]
    verify: bool,

    /// Download the TMDB poster into each movie folder
    #[arg(long, global = true)]
    poster: bool,

    /// Parent directory of the movie folders (for --poster; default: scan root or paths.movie_root)
    #[arg(long, global = true)]
    poster_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Hide progress lines; results, warnings and errors are still printed
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a single release name
    Lookup {
        /// Folder name, e.g. Wilson.2017.LIMITED.720p.BluRay.x264-GECKOS
        name: String,
    },

    /// Look up every movie folder in a directory
    Scan {
        /// Directory to scan (default: paths.movie_root from the config)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging depends on the config, so a load failure is reported after init.
    let loaded = Config::load(&cli.config);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    if cli.quiet {
        config.logging.show_progress = false;
    }
    init_logging(cli.verbose, &config.logging.level);
    if let Err(e) = &loaded {
        log::warn!(
            "Config load failed from {:?}: {}. Using defaults.",
            cli.config,
            e
        );
    }
    config.validate()?;

    let reporter = ConsoleReporter::new(!config.logging.show_progress);

    let (names, scan_root) = match cli.command {
        Command::Validate => {
            reporter.info(&format!("Config OK: {}", cli.config.display()));
            reporter.sub_item(&format!("Search: {}", config.search.base_url));
            reporter.sub_item(&format!("Metadata: {}", config.metadata.api_base));
            reporter.sub_item(&format!(
                "API key: {}",
                if config.api_key().is_some() { "set" } else { "not set" }
            ));
            return Ok(());
        }
        Command::Lookup { name } => (vec![name], None),
        Command::Scan { root } => {
            let root = root.unwrap_or_else(|| PathBuf::from(&config.paths.movie_root));
            reporter.header(&format!("Scanning movies in: {}", root.display()));
            (pipeline::list_movies(&root)?, Some(root))
        }
    };

    let poster_dir = if cli.poster {
        let dir = cli
            .poster_dir
            .or(scan_root)
            .unwrap_or_else(|| PathBuf::from(&config.paths.movie_root));
        Some(dir)
    } else {
        None
    };

    let fetcher = HttpFetcher::from_config(&config.http)?;
    let tmdb = config
        .api_key()
        .map(|key| TmdbClient::new(fetcher.client(), &config.metadata, key));
    let metadata = tmdb.as_ref().map(|t| t as &dyn MetadataProvider);
    let matcher = SearchResultMatcher::new(&config.matcher);

    let options = LookupOptions {
        verify: cli.verify,
        poster_dir,
    };
    let lookup = MovieLookup::new(&config, &fetcher, &matcher, metadata, &reporter, options)?;
    let (_, summary) = pipeline::run_batch(&lookup, &names);

    log::info!(
        "Done: {} rated, {} not found, {} unparsed, {} failed",
        summary.rated,
        summary.not_found,
        summary.unparsed,
        summary.failed
    );
    Ok(())
}
