// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unilink — desktop host adapter.
//
// Loads a link configuration and feeds URLs through the same plugin the
// mobile hosts use, printing what the script side would receive.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use tracing::warn;

use unilink_bridge::{FixedLaunchSource, deliver_launch_intent};
use unilink_core::error::Result;
use unilink_core::{LaunchIntent, LaunchUrl, LinkConfig, UniversalLinks};

#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
struct Cli {
    /// JSON link configuration (`{"hosts": [{"name": ..., "scheme": ...}]}`)
    #[arg(long, short = 'c', global = true, default_value = "links.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the host entry a URL matches
    Match { url: String },
    /// Deliver URLs to a listener as if the OS had opened them
    Deliver {
        /// URL the app is cold-started with
        #[arg(long)]
        launch: Option<String>,
        /// URLs redelivered to the running app, in order
        urls: Vec<String>,
    },
    /// List the custom URL schemes that must be registered with the OS
    Schemes,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "unilink failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Execute a command, returning the lines to print.
fn run(cli: &Cli) -> Result<Vec<String>> {
    let config = LinkConfig::load(&cli.config)?;

    match &cli.command {
        Command::Match { url } => {
            let url = LaunchUrl::parse(url)?;
            let matcher = config.into_matcher();
            Ok(vec![match matcher.find(&url) {
                Some(entry) => serde_json::to_string(entry)?,
                None => "no match".to_string(),
            }])
        }
        Command::Deliver { launch, urls } => {
            let plugin = UniversalLinks::new();
            plugin.initialize(config.hosts);

            let delivered = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&delivered);
            plugin.subscribe(move |event| match event.to_json() {
                Ok(json) => {
                    if let Ok(mut lines) = sink.lock() {
                        lines.push(json);
                    }
                }
                Err(e) => warn!(error = %e, "failed to serialize link event"),
            });

            let source = launch
                .as_ref()
                .map(|url| FixedLaunchSource::view(url.as_str()))
                .unwrap_or_default();
            if let Err(e) = deliver_launch_intent(&plugin, &source) {
                warn!(url = ?launch, error = %e, "skipping launch link");
            }

            for url in urls {
                if let Err(e) = plugin.on_new_intent(&LaunchIntent::view(url.as_str())) {
                    warn!(url = %url, error = %e, "skipping redelivered link");
                }
            }

            Ok(delivered
                .lock()
                .map(|lines| lines.clone())
                .unwrap_or_default())
        }
        Command::Schemes => Ok(config
            .custom_schemes()
            .into_iter()
            .map(str::to_string)
            .collect()),
    }
}
