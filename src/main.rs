use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use cinerec::app::{App, AppError, Suggestion};
use cinerec::config::Config;
use cinerec::poster::{PlaceholderSource, PosterResolver, PosterSource};

#[derive(Parser)]
#[command(name = "cinerec", version, about = "Movies similar to the one you pick")]
struct Cli {
    /// Config file (optional; defaults apply when absent).
    #[arg(long, global = true, default_value = "cinerec.yaml")]
    config: PathBuf,

    /// Corpus JSON, overriding `corpus_path` from the config.
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every selectable title.
    Titles,
    /// Recommend movies similar to TITLE.
    Recommend {
        title: String,
        /// How many results (default: top_k from config).
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Skip poster lookups.
        #[arg(long)]
        no_posters: bool,
        /// Print JSON instead of a list.
        #[arg(long)]
        json: bool,
    },
    /// Read titles from stdin, one per line, answering each.
    Interactive {
        #[arg(long)]
        no_posters: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(corpus) = cli.corpus {
        config.corpus_path = corpus;
    }

    match cli.command {
        Command::Titles => {
            let app = App::new(config, Box::new(PlaceholderSource::default()));
            let titles = app.titles()?;
            let mut out = std::io::stdout().lock();
            for title in titles {
                writeln!(out, "{title}")?;
            }
        }
        Command::Recommend {
            title,
            limit,
            no_posters,
            json,
        } => {
            let posters = poster_source(&config, no_posters)?;
            let app = App::new(config, posters);
            match app.suggest(&title, limit).await {
                Ok(suggestions) if json => {
                    println!("{}", serde_json::to_string_pretty(&suggestions)?);
                }
                Ok(suggestions) => print_suggestions(&title, &suggestions),
                Err(AppError::Recommend(e)) => anyhow::bail!("{e}"),
                Err(e) => return Err(e).context("building recommendations"),
            }
        }
        Command::Interactive { no_posters } => {
            let posters = poster_source(&config, no_posters)?;
            let app = App::new(config, posters);
            app.engine().context("building similarity engine")?;

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let title = line.trim();
                if title.is_empty() {
                    continue;
                }
                match app.suggest(title, None).await {
                    Ok(suggestions) => print_suggestions(title, &suggestions),
                    Err(e) => eprintln!("error: {e}"),
                }
            }
        }
    }

    Ok(())
}

fn poster_source(config: &Config, disabled: bool) -> anyhow::Result<Box<dyn PosterSource>> {
    if disabled {
        return Ok(Box::new(PlaceholderSource::default()));
    }
    let resolver = PosterResolver::from_config(&config.poster).context("building poster client")?;
    Ok(Box::new(resolver))
}

fn print_suggestions(title: &str, suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No recommendations for '{title}': it has no other movies to compare against.");
        return;
    }
    println!("Because you picked '{title}':");
    for (rank, s) in suggestions.iter().enumerate() {
        println!("{:>2}. {}  (similarity {:.3})", rank + 1, s.title, s.score);
        println!("    poster: {}", s.poster_url);
    }
}
