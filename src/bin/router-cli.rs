use clap::{Parser, Subcommand};
use std::path::PathBuf;

use convention_router::config::{self, RouterConfig};
use convention_router::routing::{scanner, RouteCache, RouteDescriptor};

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Management CLI for the convention router", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the handler tree and print the table it would produce
    Scan,
    /// Print the cache record
    CacheShow,
    /// Remove the cache record so the next start rescans
    CacheClear,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RouterConfig::default(),
    };
    let cache = RouteCache::new(&config.cache.path);

    match cli.command {
        Commands::Scan => {
            let routes = scanner::scan(&config.handlers.root, &config.handlers.convention)?;
            print_routes(&routes)?;
        }
        Commands::CacheShow => match cache.load()? {
            Some(routes) => print_routes(&routes)?,
            None => eprintln!("No cache record at {}", cache.path().display()),
        },
        Commands::CacheClear => {
            if cache.clear()? {
                println!("Removed {}", cache.path().display());
            } else {
                eprintln!("No cache record at {}", cache.path().display());
            }
        }
    }

    Ok(())
}

fn print_routes(routes: &[RouteDescriptor]) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(routes)?);
    Ok(())
}
