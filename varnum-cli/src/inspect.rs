use std::{
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
};

use memmap2::Mmap;
use snafu::ResultExt;
use tracing::info;
use varnum::{Number, NumberType, Registry, XmlTokenizer};

use crate::{Result, error};

pub fn run(filename: Option<&PathBuf>) -> Result<()> {
    let registry = crate::registry()?;

    match filename {
        Some(path) => {
            let file =
                File::open(path).with_context(|_| error::OpenFile { path: path.clone() })?;
            let file =
                unsafe { Mmap::map(&file) }.with_context(|_| error::Mmap { path: path.clone() })?;
            let document = std::str::from_utf8(&file).context(error::Utf8)?;

            inspect(&registry, document)
        }
        None => {
            let mut document = String::new();
            io::stdin()
                .read_to_string(&mut document)
                .context(error::Stdin)?;

            inspect(&registry, &document)
        }
    }
}

fn inspect(registry: &Registry, document: &str) -> Result<()> {
    let mut tokenizer = XmlTokenizer::new(document);
    let mut out = io::stdout().lock();
    let mut count = 0;

    while let Some(object) = registry.read_xml(&mut tokenizer).context(error::Codec)? {
        count += 1;

        let number = Number::cast(object.as_ref()).context(error::Number)?;
        writeln!(out, "#{count} {}", number.number_type()).context(error::Output)?;
        for number_type in NumberType::ALL {
            writeln!(out, "\t{number_type:<4}{}", convert(number, number_type))
                .context(error::Output)?;
        }

        registry
            .write_xml(object.as_ref(), &mut out, 1)
            .context(error::Codec)?;
        object.release();
    }

    info!(count, "inspected document");

    Ok(())
}

fn convert(number: &Number, number_type: NumberType) -> Number {
    match number_type {
        NumberType::U8 => number.as_u8().into(),
        NumberType::I8 => number.as_i8().into(),
        NumberType::U16 => number.as_u16().into(),
        NumberType::I16 => number.as_i16().into(),
        NumberType::U32 => number.as_u32().into(),
        NumberType::I32 => number.as_i32().into(),
        NumberType::U64 => number.as_u64().into(),
        NumberType::I64 => number.as_i64().into(),
        NumberType::F32 => number.as_f32().into(),
        NumberType::F64 => number.as_f64().into(),
    }
}
