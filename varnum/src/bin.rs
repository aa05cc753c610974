//! Compact binary object headers.
//!
//! Every binary record starts with a flag byte. The high nibble holds the
//! object kind (or `0xf` when an extra kind byte follows), the low nibble holds
//! the record size when it is below `0xc`. Larger sizes are written after the
//! flag as a big-endian integer whose width is selected by the low nibble:
//!
//! | nibble | size field |
//! |--------|------------|
//! | `0xc`  | 1 byte     |
//! | `0xd`  | 2 bytes    |
//! | `0xe`  | 4 bytes    |
//! | `0xf`  | 8 bytes    |

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use snafu::{ResultExt, Snafu};

use crate::object::ObjectKind;

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

const EXTENDED_KIND: u8 = 0xf;

/// Writes an object header carrying `kind` and `size`.
pub fn write_type_size(sink: &mut dyn Write, kind: ObjectKind, size: u64) -> Result<()> {
    let kind = kind as u8;
    let nibble: u8 = match size {
        0x0..=0xb => size as u8,
        0xc..=0xff => 0xc,
        0x100..=0xffff => 0xd,
        0x1_0000..=0xffff_ffff => 0xe,
        _ => 0xf,
    };

    let flag = (kind.min(EXTENDED_KIND) << 4) | nibble;
    sink.write_u8(flag).context(error::Io)?;

    if kind >= EXTENDED_KIND {
        sink.write_u8(kind).context(error::Io)?;
    }

    match nibble {
        0xc => sink.write_u8(size as u8),
        0xd => sink.write_u16::<BigEndian>(size as u16),
        0xe => sink.write_u32::<BigEndian>(size as u32),
        0xf => sink.write_u64::<BigEndian>(size),
        _ => Ok(()),
    }
    .context(error::Io)?;

    Ok(())
}

/// Reads an object header written by [`write_type_size`].
pub fn read_type_size(source: &mut dyn Read) -> Result<(ObjectKind, u64)> {
    let flag = source.read_u8().context(error::Io)?;

    let kind = match flag >> 4 {
        EXTENDED_KIND => source.read_u8().context(error::Io)?,
        kind => kind,
    };
    let kind = ObjectKind::try_from(kind).map_err(|kind| error::Error::UnknownKind { kind })?;

    let size = match flag & 0x0f {
        0xc => source.read_u8().map(u64::from),
        0xd => source.read_u16::<BigEndian>().map(u64::from),
        0xe => source.read_u32::<BigEndian>().map(u64::from),
        0xf => source.read_u64::<BigEndian>(),
        size => Ok(u64::from(size)),
    }
    .context(error::Io)?;

    Ok((kind, size))
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("Failed to transfer object header"))]
        Io { source: std::io::Error },

        #[snafu(display("Unknown object kind {kind:#04x} in header"))]
        UnknownKind { kind: u8 },
    }
}
