use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SignalEdge workflow orchestration client with Gemini inference.
#[derive(Parser, Debug)]
#[command(name = "signaledge", version, about)]
pub struct Args {
    /// Settings file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a commented default settings file.
    InitConfig,

    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that run against an initialized client.
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Validate startup configuration and print it with secrets redacted.
    Check,

    /// Send a prompt to Gemini using the configured key.
    Infer {
        /// Prompt text.
        prompt: String,

        /// System instruction.
        #[arg(short, long)]
        system: Option<String>,

        /// Print the response as it streams in.
        #[arg(long)]
        stream: bool,
    },

    /// Publish one event.
    Send {
        /// Event name, e.g. `signal/received`.
        name: String,

        /// Event data as a JSON object.
        #[arg(short, long, default_value = "{}")]
        data: String,

        /// Idempotency id.
        #[arg(long)]
        id: Option<String>,
    },
}

pub fn parse() -> Args {
    Args::parse()
}
