//! CLI entry point for RotomDex.
//!
//! # Usage
//!
//! ```bash
//! rotomdex [OPTIONS] <COMMAND>
//!
//! # Browse both catalogs in the terminal
//! rotomdex browse
//!
//! # Gen I electric types
//! rotomdex search --generation 1 --type electric
//!
//! # One record as JSON, and an evolution chain
//! rotomdex show pikachu
//! rotomdex evolution bulbasaur
//!
//! # Run the lookup proxy
//! rotomdex serve --bind 127.0.0.1:3000
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use rd_api::{CachedClient, EvolutionChainResolver, PokeApi};
use rd_catalog::Catalog;
use rd_core::{BranchPolicy, CatalogKind, Config, EntityRef, Generation, PagerConfig, format_chain};
use rd_proxy::ProxyServer;
use rd_tui::Theme;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Browse Pokémon and items from PokeAPI.
#[derive(Parser)]
#[command(name = "rotomdex", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file.
    #[arg(short, long, global = true, env = "ROTOMDEX_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// PokeAPI base URL (overrides the configuration file).
    #[arg(long, global = true, env = "ROTOMDEX_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the catalogs in an interactive terminal UI.
    Browse {
        /// Start on the item catalog.
        #[arg(long)]
        items: bool,
    },

    /// Print the entries matching a filter.
    Search {
        /// Search the item catalog instead of Pokémon.
        #[arg(long)]
        items: bool,

        /// Case-insensitive name substring.
        #[arg(long)]
        text: Option<String>,

        /// Pokémon type (`electric`).
        #[arg(long = "type", value_name = "TYPE")]
        type_name: Option<String>,

        /// Generation, as a number or roman numeral.
        #[arg(long)]
        generation: Option<Generation>,

        /// Maximum number of entries to print.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Print one record as JSON.
    Show {
        /// Pokémon or item name.
        name: String,

        /// Look the name up in the item catalog.
        #[arg(long)]
        item: bool,
    },

    /// Print the evolution chain of a species.
    Evolution {
        /// Species name.
        species: String,

        /// Include every branch (eevee) instead of the first.
        #[arg(long)]
        all_branches: bool,
    },

    /// Serve the `/api/pokemon` lookup proxy.
    Serve {
        /// Listen address (overrides the configuration file).
        #[arg(long, env = "ROTOMDEX_BIND")]
        bind: Option<SocketAddr>,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects `RUST_LOG` if set. Otherwise uses `debug` with `--verbose`, or
/// `info`. Noisy crates are filtered to `warn`.
///
/// The browser owns the terminal, so in that mode logs go to
/// `rotomdex.log` in the temp directory instead of stderr.
fn init_tracing(verbose: bool, no_color: bool, to_file: bool) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn,mio=warn"))
    });

    let (file_layer, stderr_layer) = if to_file {
        let path = std::env::temp_dir().join("rotomdex.log");
        let file = std::fs::File::create(&path)?;
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (Some(layer), None)
    } else {
        let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();
        let layer = fmt::layer()
            .with_target(false)
            .with_ansi(use_ansi)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

/// Builds a [`Config`] from the optional file and CLI overrides.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }
    config.validate()?;
    Ok(config)
}

const fn kind_for(items: bool) -> CatalogKind {
    if items {
        CatalogKind::Item
    } else {
        CatalogKind::Pokemon
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the interactive browser.
async fn run_browse(config: Config, items: bool, no_color: bool) -> color_eyre::Result<()> {
    info!(base_url = %config.api.base_url, "Starting browser");

    let client = CachedClient::from_config(&config)?;
    let theme = if no_color {
        Theme::monochrome()
    } else {
        Theme::from_scheme(config.tui.color_scheme)
    };
    let start = kind_for(items);

    // Handle SIGTERM for graceful shutdown on Unix
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            result = rd_tui::run(config, client, theme, start) => result?,
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
        }
    }

    #[cfg(not(unix))]
    rd_tui::run(config, client, theme, start).await?;

    Ok(())
}

/// Filter options for `search`.
struct SearchArgs {
    kind: CatalogKind,
    text: Option<String>,
    type_name: Option<String>,
    generation: Option<Generation>,
    limit: usize,
}

/// Prints the first `limit` entries matching the filter.
async fn run_search(config: &Config, args: SearchArgs) -> color_eyre::Result<()> {
    if !args.kind.supports_species_filters() && (args.type_name.is_some() || args.generation.is_some())
    {
        return Err(color_eyre::eyre::eyre!(
            "--type and --generation apply to Pokémon only"
        ));
    }

    let client = CachedClient::from_config(config)?;
    let index = client
        .catalog_index(args.kind, &rd_api::CancellationToken::new())
        .await?;

    let pager = PagerConfig {
        pokemon_page_size: args.limit.max(1),
        item_page_size: args.limit.max(1),
        ..config.pager
    };
    let mut catalog = Catalog::new(args.kind, &pager);
    catalog.set_index(index);

    if let Some(text) = args.text {
        catalog.set_search(text);
    }
    if let Some(type_name) = args.type_name {
        let type_name = type_name.to_lowercase();
        catalog.set_type(Some(type_name.clone()));
        let members = client.type_members(&type_name).await?;
        catalog.set_type_members(&type_name, members);
    }
    if let Some(generation) = args.generation {
        catalog.set_generation(Some(generation));
        match client.generation_members(generation).await {
            Ok(members) => catalog.set_generation_members(generation, members),
            Err(e) => warn!(%generation, error = %e, "using the static id range"),
        }
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    for entity in catalog.visible() {
        writeln!(handle, "{}", format_entry(entity))?;
    }
    writeln!(handle)?;
    writeln!(
        handle,
        "{} of {} matching ({} total)",
        catalog.visible_len(),
        catalog.filtered_len(),
        catalog.total_len()
    )?;
    Ok(())
}

/// Formats a search result line: `#025 pikachu`.
fn format_entry(entity: &EntityRef) -> String {
    match entity.id() {
        Some(id) => format!("#{id:03} {}", entity.name),
        None => entity.name.clone(),
    }
}

/// Prints one record as pretty JSON.
async fn run_show(config: &Config, name: &str, item: bool) -> color_eyre::Result<()> {
    let client = CachedClient::from_config(config)?;
    let details = client.details(kind_for(item), name).await?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", serde_json::to_string_pretty(&details)?)?;
    Ok(())
}

/// Prints an evolution chain on one line.
async fn run_evolution(config: &Config, species: &str, all_branches: bool) -> color_eyre::Result<()> {
    let policy = if all_branches {
        BranchPolicy::AllBranches
    } else {
        config.evolution.branch_policy
    };
    let client = CachedClient::from_config(config)?;
    let stages = EvolutionChainResolver::new(&client, policy)
        .resolve(species)
        .await?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", format_chain(&stages))?;
    Ok(())
}

/// Runs the proxy until Ctrl-C.
async fn run_serve(config: &Config, bind: Option<SocketAddr>) -> color_eyre::Result<()> {
    let bind_addr = bind.unwrap_or(config.proxy.bind_address);
    let upstream = Arc::new(PokeApi::new(&config.api)?);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C, shutting down");
    };

    ProxyServer::new(bind_addr, upstream).start(shutdown).await?;
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing
    let browsing = matches!(cli.command, Commands::Browse { .. });
    init_tracing(cli.verbose, cli.no_color, browsing)?;

    // 4. Route to the command
    let config = build_config(&cli)?;
    match cli.command {
        Commands::Browse { items } => run_browse(config, items, cli.no_color).await,
        Commands::Search {
            items,
            text,
            type_name,
            generation,
            limit,
        } => {
            let args = SearchArgs {
                kind: kind_for(items),
                text,
                type_name,
                generation,
                limit,
            };
            run_search(&config, args).await
        }
        Commands::Show { name, item } => run_show(&config, &name, item).await,
        Commands::Evolution {
            species,
            all_branches,
        } => run_evolution(&config, &species, all_branches).await,
        Commands::Serve { bind } => run_serve(&config, bind).await,
    }
}
