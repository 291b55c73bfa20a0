//! CLI subcommand definitions

use clap::Subcommand;

use super::args::PrintMode;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Price the assistant messages in conversation dumps
    Cost {
        /// Conversation files or glob patterns (JSON, JSONL, agent results)
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<String>,

        /// Report failing messages as warnings instead of aborting
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Print messages for debugging
    Inspect {
        /// Conversation files or glob patterns (JSON, JSONL, agent results)
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<String>,

        /// Output layout
        #[arg(short, long, value_enum, default_value = "full")]
        mode: PrintMode,

        /// Cut content (or JSON lines in json mode) to this many characters
        #[arg(long, value_name = "N")]
        max_content_length: Option<usize>,

        /// Nesting depth rendered before values are shown as strings
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,

        /// Omit the metadata object in full mode
        #[arg(long)]
        no_metadata: bool,

        /// Omit the content field in full mode
        #[arg(long)]
        no_content: bool,
    },
    /// List the effective pricing table
    Models,
}
