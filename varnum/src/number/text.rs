use std::io::Write;

use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{digit0, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::preceded,
};
use snafu::{OptionExt, ResultExt};
use tracing::trace;

use super::{ELEMENT, Number, Result, error};
use crate::{
    object::Object,
    xml::{XmlEvent, XmlReader, write_tab},
};

/// Reads a `<number>` element the reader is positioned at.
pub(super) fn read(reader: &mut dyn XmlReader, event: XmlEvent) -> crate::Result<Box<dyn Object>> {
    Ok(Box::new(read_number(reader, event)?))
}

/// Writes `number` as one `<number>` line indented by `level` tabs.
pub(super) fn write(object: &dyn Object, sink: &mut dyn Write, level: usize) -> crate::Result<()> {
    let number = Number::cast(object)?;
    Ok(write_number(number, sink, level)?)
}

fn read_number(reader: &mut dyn XmlReader, event: XmlEvent) -> Result<Number> {
    if event == XmlEvent::ElementEmpty {
        return Ok(Number::from_u32(0));
    }

    let mut text: Option<String> = None;
    loop {
        match reader.next_event().context(error::Xml)? {
            Some(XmlEvent::Text) => {
                if let Some(chunk) = reader.text() {
                    text.get_or_insert_with(String::new).push_str(chunk);
                }
            }
            Some(XmlEvent::ElementEnd) => {
                if reader
                    .element()
                    .is_some_and(|name| name.eq_ignore_ascii_case(ELEMENT))
                {
                    break;
                }
            }
            Some(_) => {}
            None => return Err(error::Error::UnexpectedEnd.into()),
        }
    }

    let text = text.context(error::MissingText)?;
    trace!(%text, "read number text");

    parse(&text)
}

fn write_number(number: &Number, sink: &mut dyn Write, level: usize) -> Result<()> {
    write_tab(sink, level).context(error::Write)?;
    writeln!(sink, "<{ELEMENT}>{number}</{ELEMENT}>").context(error::Write)?;

    Ok(())
}

/// Infers the representation from the text and parses it.
///
/// A `.` selects `f64`, otherwise a `-` selects `i64`, otherwise `u64`.
/// Narrower representations are never produced.
fn parse(text: &str) -> Result<Number> {
    let text = text.trim();

    let (mut signed, mut float) = (false, false);
    for c in text.chars() {
        signed |= c == '-';
        float |= c == '.';
        if signed && float {
            break;
        }
    }

    let number = if float {
        all_consuming(real).parse(text).ok().map(|(_, value)| Number::from_f64(value))
    } else if signed {
        all_consuming(signed_integer)
            .parse(text)
            .ok()
            .map(|(_, value)| Number::from_i64(value))
    } else {
        all_consuming(unsigned_integer)
            .parse(text)
            .ok()
            .map(|(_, value)| Number::from_u64(value))
    };

    Ok(number.with_context(|| error::Malformed { text })?)
}

fn real(input: &str) -> IResult<&str, f64> {
    recognize(preceded(
        opt(one_of("+-")),
        (opt((digit0, tag("."))), digit1),
    ))
    .map_res(|number: &str| number.parse::<f64>())
    .parse(input)
}

fn signed_integer(input: &str) -> IResult<&str, i64> {
    recognize(preceded(opt(one_of("+-")), digit1))
        .map_res(|number: &str| number.parse::<i64>())
        .parse(input)
}

fn unsigned_integer(input: &str) -> IResult<&str, u64> {
    recognize(preceded(opt(tag("+")), digit1))
        .map_res(|number: &str| number.parse::<u64>())
        .parse(input)
}
