// Copyright 2026 Portside Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use portside::cli;
use portside::manifest::CallSigns;

#[derive(Parser)]
#[command(
    name = "portside",
    about = "Portside — cargo-manifest tracker for the customs portal",
    version,
    after_help = "Run 'portside query --south <CODE>' to fetch manifests for a call sign.\nRun 'portside query' with no flags to reuse the last call signs."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch cargo manifests for one or two call signs
    Query {
        /// South call sign (vessel registration code)
        #[arg(long, short)]
        south: Option<String>,
        /// North call sign (vessel registration code)
        #[arg(long, short)]
        north: Option<String>,
        /// Show only records whose S/O number contains this keyword
        /// (case-insensitive, applied locally after the fetch)
        #[arg(long, short)]
        filter: Option<String>,
        /// Portal origin override (testing/staging)
        #[arg(long)]
        base_url: Option<String>,
        /// Rows requested per page
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show or clear the remembered call signs
    Recent {
        /// Forget the remembered call signs
        #[arg(long)]
        clear: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("PORTSIDE_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("PORTSIDE_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("PORTSIDE_VERBOSE", "1");
    }

    let default_filter = if cli.verbose {
        "portside=debug"
    } else {
        "portside=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Query {
            south,
            north,
            filter,
            base_url,
            page_size,
        } => cli::query_cmd::run(south, north, filter, base_url, page_size).await,
        Commands::Recent { clear } => run_recent(clear),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "portside", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}

fn run_recent(clear: bool) -> Result<()> {
    let Some(store) = cli::recall::RecallStore::default_store() else {
        anyhow::bail!("no config directory available on this platform");
    };

    if clear {
        store.clear();
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  remembered call signs cleared.");
        }
        return Ok(());
    }

    let signs: CallSigns = store.load();
    if cli::output::is_json() {
        cli::output::print_json(&serde_json::json!({
            "south": signs.south,
            "north": signs.north,
        }));
        return Ok(());
    }

    if signs.is_empty() {
        eprintln!("  no remembered call signs.");
    } else {
        eprintln!("  south: {}", signs.south.as_deref().unwrap_or("-"));
        eprintln!("  north: {}", signs.north.as_deref().unwrap_or("-"));
    }
    Ok(())
}
