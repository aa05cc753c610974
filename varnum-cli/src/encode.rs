use std::io::{self, Write};

use snafu::ResultExt;
use varnum::{Number, NumberType};

use crate::{Result, error};

pub fn run(number_type: NumberType, value: &str, binary: bool) -> Result<()> {
    let registry = crate::registry()?;
    let number = Number::parse_as(number_type, value).context(error::Number)?;

    let mut out = io::stdout().lock();
    if binary {
        let mut record = Vec::new();
        registry
            .write_bin(&number, &mut record)
            .context(error::Codec)?;

        let hex: Vec<String> = record.iter().map(|byte| format!("{byte:02x}")).collect();
        writeln!(out, "{}", hex.join(" ")).context(error::Output)?;
    } else {
        registry
            .write_xml(&number, &mut out, 0)
            .context(error::Codec)?;
    }

    Ok(())
}
