pub use error::{Error, Result};

mod cli;
mod encode;
mod error;
mod inspect;

use snafu::ResultExt;
use varnum::{Number, Registry};

use crate::cli::Command;

fn main() -> Result<()> {
    let cli = cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.level())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Inspect { filename } => inspect::run(filename.as_ref()),
        Command::Encode {
            number_type,
            value,
            binary,
        } => encode::run(number_type, &value, binary),
    }
}

/// Registry with the number codecs installed.
fn registry() -> Result<Registry> {
    let mut registry = Registry::new();
    Number::init_reader(&mut registry).context(error::Number)?;
    Number::init_writer(&mut registry).context(error::Number)?;

    Ok(registry)
}
