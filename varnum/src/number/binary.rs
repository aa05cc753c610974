use std::io::{Read, Write};

use snafu::ResultExt;
use tracing::warn;

use super::{Number, Result, error};
use crate::{bin, object::Object, object::ObjectKind};

/// Size class recorded in the header of every binary number.
const SIZE_CLASS: u64 = 0xf;

/// Writes the header of a binary number record.
///
/// Only the header is produced; the payload layout is not settled yet.
pub(super) fn write(object: &dyn Object, sink: &mut dyn Write) -> crate::Result<()> {
    Number::cast(object)?;
    Ok(write_header(sink)?)
}

fn write_header(sink: &mut dyn Write) -> Result<()> {
    bin::write_type_size(sink, ObjectKind::Number, SIZE_CLASS).context(error::Header)?;

    Ok(())
}

// TODO: decode the payload once the writer emits one.
pub(super) fn read(
    _source: &mut dyn Read,
    kind: ObjectKind,
    size: u64,
) -> crate::Result<Box<dyn Object>> {
    warn!(%kind, size, "binary numbers cannot be read");

    Err(super::Error::from(error::Error::NotImplemented).into())
}
