// src/cli.rs

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::{info, warn};
use url::Url;

use crate::config::{Config, Selection};
use crate::fetch::{get_rows, HttpFetcher, PageFetcher};
use crate::images;
use crate::normalize::{normalize, ScrapeOptions};
use crate::output::{self, OutputFormat};
use crate::prompt;

/// List all ponies, or specific categories of characters, from the My Little
/// Pony wiki.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ponylist", version)]
pub struct Cli {
    /// The category of pony to list, or "all"
    pub category: String,

    /// Display extra details while processing
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Don't display text while processing
    #[arg(short, long)]
    pub quiet: bool,

    /// Download every image on the list(s) and build a browsable contact
    /// sheet in the image directory (only downloads images)
    #[arg(short, long)]
    pub images: bool,

    /// Only keep the pony names, discard all other columns
    #[arg(short, long)]
    pub names: bool,

    /// Write the results to a file in this format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Remove labels from character names
    /// (removes "Bright Pony: " from "Bright Pony: Sunshine Smiles")
    #[arg(short, long)]
    pub strip_labels: bool,

    /// Discard any "Unnamed" names from the results
    #[arg(short, long)]
    pub known: bool,

    /// Don't ask for confirmation before scraping all categories
    #[arg(short, long)]
    pub yes: bool,

    /// YAML file replacing the built-in categories and settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for output files and images
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> ScrapeOptions {
        ScrapeOptions {
            known_only: self.known,
            strip_labels: self.strip_labels,
            names_only: self.names,
        }
    }

    /// Built-in config, or the `--config` file, with `--data-dir` applied.
    pub fn load_config(&self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        Ok(cfg)
    }
}

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The "all" confirmation was declined; nothing was scraped.
    Declined,
    /// Image mode finished.
    Images { saved: usize, sheet: PathBuf },
    /// Normal mode finished.
    Done {
        scraped: usize,
        kept: usize,
        written: Option<PathBuf>,
    },
}

/// Parse process arguments, then scrape over HTTP with a terminal prompt.
pub fn run(cli: Cli) -> Result<Outcome> {
    let cfg = cli.load_config()?;
    let fetcher = HttpFetcher::new(&cfg.user_agent)?;
    let stdout = io::stdout();
    run_with(&cli, &cfg, &fetcher, prompt::confirm_stdin, &mut stdout.lock())
}

fn write_summary<W: Write>(out: &mut W, label: &str, scraped: usize, kept: usize) -> Result<()> {
    let sep = "-".repeat(60);
    writeln!(out)?;
    writeln!(out, "{:^80}", sep)?;
    writeln!(out, "{:^80}", "SUMMARY")?;
    writeln!(out)?;
    writeln!(out, "Type selected:      {}", label)?;
    writeln!(out, "Total rows scraped: {}", scraped)?;
    writeln!(out, "Total rows kept:    {}", kept)?;
    Ok(())
}

/// Full pipeline: validate, confirm, fetch, normalize, then either download
/// images or print the summary and write the output file.
pub fn run_with<F, C, W>(
    cli: &Cli,
    cfg: &Config,
    fetcher: &F,
    confirm: C,
    out: &mut W,
) -> Result<Outcome>
where
    F: PageFetcher + ?Sized,
    C: FnOnce(&str) -> Result<bool>,
    W: Write,
{
    let selection = cfg.categories.select(&cli.category)?;
    if selection == Selection::All && !cli.yes && !confirm("scrape ALL categories")? {
        info!("declined; nothing scraped");
        return Ok(Outcome::Declined);
    }

    let urls = cfg.categories.urls(&selection);
    let rows = get_rows(fetcher, urls.as_slice())?;
    let scraped = rows.len();

    let opts = cli.options();
    let rows = normalize(rows, &opts);
    let label = selection.label();

    if cli.images {
        if opts.names_only {
            warn!("names-only mode drops image links; no images will be downloaded");
        }
        let first = urls.first().context("no URLs to scrape")?;
        let base = Url::parse(first).with_context(|| format!("parsing URL {}", first))?;
        let dir = cfg.data_dir.join(format!("images_{}", label));
        let saved = images::get_images(fetcher, &rows, &base, &dir)?;
        let sheet = images::write_contact_sheet(&dir, &saved)?;
        return Ok(Outcome::Images {
            saved: saved.len(),
            sheet,
        });
    }

    if cli.verbose > 0 {
        for r in &rows {
            writeln!(out, "{:?}", r.to_fields(&cfg.link_sentinel))?;
        }
    }

    if !cli.quiet {
        write_summary(out, label, scraped, rows.len())?;
    }

    let written = match cli.format {
        Some(format) => {
            let path = output::output_path(&cfg.data_dir, label, &opts, format);
            output::write_rows(&path, &rows, format, &cfg.link_sentinel)?;
            Some(path)
        }
        None => None,
    };

    Ok(Outcome::Done {
        scraped,
        kept: rows.len(),
        written,
    })
}
