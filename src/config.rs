// src/config.rs

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};
use tracing::debug;

/// Selector value meaning "every configured category".
pub const ALL: &str = "all";

/// The list pages scraped by default.
static DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("unicorns", "http://mlp.wikia.com/wiki/List_of_ponies/Unicorn_ponies"),
    ("pegasus", "http://mlp.wikia.com/wiki/List_of_ponies/Pegasus_ponies"),
    ("earthponies", "http://mlp.wikia.com/wiki/List_of_ponies/Earth_ponies"),
    ("crystal", "http://mlp.wikia.com/wiki/List_of_ponies/Crystal_Ponies"),
    ("elders", "http://mlp.wikia.com/wiki/List_of_ponies/Elders"),
    ("foals", "http://mlp.wikia.com/wiki/List_of_ponies/Foals"),
    ("mentioned", "http://mlp.wikia.com/wiki/List_of_ponies/Mentioned_ponies"),
    ("comic", "http://mlp.wikia.com/wiki/List_of_comic_ponies"),
    ("wonderbolts", "http://mlp.wikia.com/wiki/List_of_Wonderbolts"),
    ("alicorns", "http://mlp.wikia.com/wiki/List_of_ponies/Alicorn_ponies"),
    ("prose", "http://mlp.wikia.com/wiki/List_of_prose_ponies"),
    ("other", "http://mlp.wikia.com/wiki/List_of_non-pony_characters"),
];

/// Category label → list page URL. Built once at startup, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories(BTreeMap<String, String>);

/// What the user asked to scrape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    One(String),
}

impl Selection {
    /// Label used in the console summary and in output file names.
    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::One(name) => name,
        }
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self(
            DEFAULT_CATEGORIES
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl Categories {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Validate a category selector given on the command line.
    pub fn select(&self, selector: &str) -> Result<Selection> {
        if selector == ALL {
            return Ok(Selection::All);
        }
        if self.0.contains_key(selector) {
            return Ok(Selection::One(selector.to_string()));
        }
        let mut choices: Vec<&str> = self.names().collect();
        choices.push(ALL);
        bail!(
            "invalid category `{}` (choose from: {})",
            selector,
            choices.join(", ")
        );
    }

    /// URLs to scrape for a selection, in a stable order.
    pub fn urls(&self, selection: &Selection) -> Vec<String> {
        match selection {
            Selection::All => self.0.values().cloned().collect(),
            Selection::One(name) => self.0.get(name).cloned().into_iter().collect(),
        }
    }
}

/// Runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub categories: Categories,
    /// Where output files and image directories are written.
    pub data_dir: PathBuf,
    /// Written in place of a link when the last column has none.
    pub link_sentinel: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: Categories::default(),
            data_dir: PathBuf::from("./data/"),
            link_sentinel: "None".to_string(),
            user_agent: format!("ponylist/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Read a YAML config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let cfg = Self::from_yaml(&text).with_context(|| format!("parsing config {:?}", path))?;
        debug!(path = %path.display(), categories = cfg.categories.0.len(), "loaded config");
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.categories.0.contains_key(ALL) {
            bail!("`{}` is reserved and cannot be used as a category name", ALL);
        }
        if self.categories.0.is_empty() {
            bail!("config defines no categories");
        }
        Ok(())
    }
}
