//! CLI module for bizsvc.
//!
//! Subcommands:
//! - `contacts`: CRUD over the contacts store

mod contacts;

use clap::{Parser, Subcommand};
use color_eyre::eyre::bail;

use crate::cancel::CancellationSource;
use crate::config::Config;
use crate::context::Context;
use crate::di::FromRef;

pub use contacts::{ContactCommands, ContactsCommand, Report};

/// bizsvc - generic business services over a unit of work
#[derive(Parser)]
#[command(name = "bizsvc")]
#[command(about = "CRUD business services over repositories and a unit of work")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage contacts
    Contacts {
        #[command(subcommand)]
        command: ContactsCommand,
    },
}

impl App {
    /// Log filter: `debug` when verbose, otherwise the configured level.
    pub fn log_filter(&self, config: &Config) -> String {
        if self.verbose {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        }
    }

    /// Run the CLI application.
    pub async fn run(self, config: Config) -> color_eyre::Result<()> {
        let ctx = Context::open(config).await?;

        // Ctrl-C flips the signal; the running call stops before its next step.
        let source = CancellationSource::new();
        let cancel = source.token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received, cancelling");
                source.cancel();
            }
        });

        let report = match self.command {
            Command::Contacts { command } => {
                ContactCommands::from_ref(&ctx).execute(command, &cancel).await
            }
        };

        let report = match report {
            Ok(report) => report,
            Err(e) => bail!("[{}] {}", e.code(), e),
        };

        println!("{}", serde_json::to_string_pretty(&report.body)?);
        if !report.success {
            bail!("{}", report.summary);
        }
        Ok(())
    }
}
