use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use varnum::NumberType;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Raise the log level, repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode the numbers of an XML document and print every conversion
    Inspect {
        /// Document to read, standard input when omitted
        filename: Option<PathBuf>,
    },

    /// Print the encoded form of a single number
    Encode {
        /// Stored representation
        #[arg(short = 't', long = "type", default_value = "f64")]
        number_type: NumberType,

        value: String,

        /// Print the binary header as hex instead of XML
        #[arg(short, long)]
        binary: bool,
    },
}

impl Cli {
    pub fn level(&self) -> Level {
        match self.verbose {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
