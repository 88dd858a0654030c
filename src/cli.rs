use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive translation session (default)
    Interactive {
        /// Initial target language code
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Detect the language of a text
    Detect {
        /// Text to inspect
        text: String,
    },

    /// Translate a text, detecting its language unless --from is given
    Translate {
        /// Text to translate
        text: String,

        /// Target language code (see `languages`), defaults to ui.default_target
        #[arg(short, long)]
        to: Option<String>,

        /// Source language name, e.g. "English"
        #[arg(short, long)]
        from: Option<String>,
    },

    /// List selectable target languages
    Languages,

    /// Check that the configured model service is reachable
    Check,
}
