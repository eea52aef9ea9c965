// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atrium - a plugin-composed site server.
//!
//! This is the binary entry point.

mod inspect;
mod serve;
mod site;

use std::path::PathBuf;

use atrium_config::AtriumConfig;
use clap::{Parser, Subcommand};

/// Atrium - a plugin-composed site server.
#[derive(Parser, Debug)]
#[command(name = "atrium", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Print the compiled route manifest.
    Routes {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the synthesized robots.txt.
    Robots {
        /// Origin to resolve contributions against.
        #[arg(long)]
        origin: Option<String>,
    },
    /// Print the synthesized sitemap.xml.
    Sitemap {
        /// Origin to resolve contributions against.
        #[arg(long)]
        origin: String,
    },
    /// List plugins and their load status.
    Plugins,
}

fn load_config(path: Option<&std::path::Path>) -> AtriumConfig {
    let loaded = match path {
        Some(path) => atrium_config::load_and_validate_path(path),
        None => atrium_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            atrium_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Routes { json }) => inspect::run_routes(&config, json),
        Some(Commands::Robots { origin }) => inspect::run_robots(&config, origin.as_deref()).await,
        Some(Commands::Sitemap { origin }) => inspect::run_sitemap(&config, &origin).await,
        Some(Commands::Plugins) => inspect::run_plugins(&config),
        None => {
            println!("atrium: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sitemap_requires_origin() {
        assert!(Cli::try_parse_from(["atrium", "sitemap"]).is_err());
        let cli = Cli::try_parse_from(["atrium", "sitemap", "--origin", "https://x"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Sitemap { ref origin }) if origin == "https://x"));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["atrium", "routes", "--config", "site.toml", "--json"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("site.toml")));
        assert!(matches!(cli.command, Some(Commands::Routes { json: true })));
    }
}
