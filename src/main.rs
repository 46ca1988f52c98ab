use anyhow::{Context, Result};
use ba_data::{
    cli::{Cli, Commands},
    data::GameData,
    filter::{parse_value, Filter},
    localization::Localization,
    schema::ALL_TABLES,
};
use serde::Serialize;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Characters {
            name_contains,
            all,
            lang,
        } => {
            let data = open(&cli)?;
            let names = data.list_characters(
                name_contains.as_deref().unwrap_or_default(),
                !all,
                &Localization::from_tokens(lang),
            )?;
            print_json(&names)?;
        }

        Commands::Character {
            id,
            resource,
            filter,
            lang,
        } => {
            let data = open(&cli)?;
            let filter = Filter::from_pairs(filter)?;
            let value = data
                .character_resource(*id, *resource, &filter, &Localization::from_tokens(lang))
                .with_context(|| format!("Failed to read character {}", id))?;
            print_json(&value)?;
        }

        Commands::Asset {
            kind,
            id,
            filter,
            lang,
        } => {
            let data = open(&cli)?;
            let mut filter = Filter::from_pairs(filter)?;
            if let Some(id) = id {
                filter.push("Id", parse_value(id));
            }
            let assets = data
                .asset(*kind, &filter, &Localization::from_tokens(lang))
                .with_context(|| format!("Failed to read {}", kind))?;
            print_json(&assets)?;
        }

        Commands::Fetch { clean } => {
            let start = Instant::now();
            let config = cli.source_config()?;
            if *clean {
                config.clear_cache().context("Failed to clear cache")?;
            }

            let data = GameData::new(config.build()?);
            let count = data.prefetch().context("Failed to fetch documents")?;
            println!(
                "Fetched {} documents in {:.1}s",
                count,
                start.elapsed().as_secs_f64()
            );
            if config.use_cache {
                println!("Cache: {:?}", config.cache()?.cache_dir());
            }
        }

        Commands::ListTables => {
            println!("Available tables:\n");
            for table in ALL_TABLES {
                println!("  {:<24} {}", table.name, table.source_file);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ba_data=debug" } else { "ba_data=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open(cli: &Cli) -> Result<GameData> {
    let sources = cli.source_config()?.build()?;
    Ok(GameData::new(sources))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
