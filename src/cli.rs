use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "teams-notify")]
#[command(about = "Deliver alert attachments to a Microsoft Teams webhook", version)]
#[command(after_help = "EXAMPLES:
    teams-notify send alert.json                Render and post an attachment
    cat alert.json | teams-notify send          Read the attachment from stdin
    teams-notify render alert.json              Print the Adaptive Card payload
    teams-notify init                           Create the config file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render an attachment and post it to the webhook
    #[command(after_help = "EXAMPLES:
    teams-notify send alert.json
    teams-notify send alert.json --subscription-arn arn:aws:sns:us-east-1:123456789012:alarms:abc
    teams-notify send --event-time 2024-03-01T12:00:00Z < alert.json")]
    Send(MessageArgs),
    /// Render an attachment and print the payload without posting it
    #[command(after_help = "EXAMPLES:
    teams-notify render alert.json
    HIDE_AWS_LINKS=1 teams-notify render alert.json")]
    Render(MessageArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    teams-notify completions bash > ~/.bash_completion.d/teams-notify
    teams-notify completions zsh > ~/.zfunc/_teams-notify")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    teams-notify init")]
    Init,
}

#[derive(Args)]
pub struct MessageArgs {
    /// Attachment JSON file (reads stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// SNS subscription ARN the event arrived through (adds a footer)
    #[arg(long)]
    pub subscription_arn: Option<String>,

    /// Event time used when the attachment has no ts (RFC 3339)
    #[arg(long)]
    pub event_time: Option<String>,
}
