use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::character::CharacterResource;
use crate::config::SourceConfig;
use crate::data::AssetKind;

#[derive(Parser, Debug)]
#[command(name = "ba-data")]
#[command(version, about = "Query Blue Archive game data as JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Primary (JP) data root: an http(s) URL or a local directory
    #[arg(long, env = "BA_DATA_ROOT", global = true)]
    pub root: Option<String>,

    /// Global data root, used to fill missing translations
    #[arg(long, env = "BA_DATA_GLOBAL_ROOT", global = true)]
    pub global_root: Option<String>,

    /// Custom cache directory for downloaded documents
    #[arg(long, env = "BA_DATA_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Extra attempts after a failed HTTP fetch
    #[arg(long, default_value_t = 2, global = true)]
    pub retries: u32,

    /// Re-download documents even if cached
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Never read or write the document cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List character names by id
    Characters {
        /// Only characters with a name containing this (case-insensitive)
        #[arg(long)]
        name_contains: Option<String>,

        /// Include non-playable and unreleased characters
        #[arg(long)]
        all: bool,

        /// Languages to show (jp, kr, en, th, tw)
        #[arg(short, long, value_delimiter = ',')]
        lang: Vec<String>,
    },

    /// Show a character, or one resource of it
    Character {
        id: i64,

        /// info, stats, details, profile, skills, skill_details, weapon, weapon_passive or bond
        resource: Option<CharacterResource>,

        /// Only answer if the character's details match field=value (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Languages to show (jp, kr, en, th, tw)
        #[arg(short, long, value_delimiter = ',')]
        lang: Vec<String>,
    },

    /// Look up skills, items, equipment, currencies, furnitures or recipes
    Asset {
        kind: AssetKind,

        /// Shorthand for --filter Id=<ID>
        id: Option<String>,

        /// Match field=value; repeat a field to accept several values
        #[arg(short, long)]
        filter: Vec<String>,

        /// Languages to show (jp, kr, en, th, tw)
        #[arg(short, long, value_delimiter = ',')]
        lang: Vec<String>,
    },

    /// Download every known document into the cache
    Fetch {
        /// Empty the cache first
        #[arg(long)]
        clean: bool,
    },

    /// List all known tables and their source files
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn source_config(&self) -> Result<SourceConfig> {
        let root = self
            .root
            .clone()
            .context("No primary data root given (use --root or BA_DATA_ROOT)")?;
        let global_root = self
            .global_root
            .clone()
            .context("No global data root given (use --global-root or BA_DATA_GLOBAL_ROOT)")?;

        let mut config = SourceConfig::new(root, global_root);
        config.cache_dir = self.cache_dir.clone();
        config.timeout = Duration::from_secs(self.timeout);
        config.retries = self.retries;
        config.refresh = self.refresh;
        config.use_cache = !self.no_cache;
        Ok(config)
    }
}
