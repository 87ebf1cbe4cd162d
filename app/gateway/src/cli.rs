//! Command-line interface.

use crate::{
    config::{self, MemoryBotConfig},
    serve,
    utils::mask_credential,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::signal;

/// Multi-user chat bot with entity memory.
#[derive(Parser, Debug)]
#[command(name = "memorybot", about = "Multi-user chat bot with entity memory")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web front end until ctrl-c.
    Serve {
        /// Address to bind, overriding the config (`host:port`).
        #[arg(long)]
        bind: Option<String>,
    },
    /// Write the default config file to the global config directory.
    Init,
    /// Print the effective configuration.
    Config,
}

impl Cli {
    /// Execute the parsed command.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Init => {
                let path = config::scaffold_config_dir(&config::global_config_dir()?)?;
                println!("{}", path.display());
                Ok(())
            }
            Command::Config => {
                let mut config = config::resolve_config(self.config.as_deref())?;
                config.llm.api_key = mask_credential(&config.llm.api_key);
                print!("{}", render_config(&config)?);
                Ok(())
            }
            Command::Serve { bind } => {
                let config = config::resolve_config(self.config.as_deref())?;
                let bind = bind.unwrap_or_else(|| config.bind_address());
                let handle = serve::serve(&config, &bind).await?;

                signal::ctrl_c().await?;
                tracing::info!("shutting down");
                handle.shutdown().await
            }
        }
    }
}

fn render_config(config: &MemoryBotConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to render config")
}
