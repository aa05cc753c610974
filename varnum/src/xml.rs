use std::io::Write;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while1},
    character::complete::{char, multispace0},
    sequence::{delimited, preceded},
};
use smol_str::SmolStr;
use snafu::Snafu;

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Events emitted by an XML token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEvent {
    /// Opening tag, `<name>`
    ElementBegin,
    /// Self-closing tag, `<name/>`
    ElementEmpty,
    /// Closing tag, `</name>`
    ElementEnd,
    /// Character data between tags
    Text,
}

/// Pull-style XML token stream consumed by the codec readers.
///
/// After [`XmlReader::next_event`] returns an element event, [`XmlReader::element`]
/// holds the element name. After a [`XmlEvent::Text`] event, [`XmlReader::text`]
/// holds the decoded character data.
pub trait XmlReader {
    /// Advances to the next event. `Ok(None)` marks the end of the stream.
    fn next_event(&mut self) -> Result<Option<XmlEvent>>;

    fn element(&self) -> Option<&str>;

    fn text(&self) -> Option<&str>;
}

/// Minimal XML tokenizer over an in-memory document.
///
/// Skips the XML declaration, comments and whitespace-only character data.
/// Attributes are accepted but ignored. The five predefined entities are
/// decoded in character data.
#[derive(Debug)]
pub struct XmlTokenizer<'a> {
    input: &'a str,
    element: Option<SmolStr>,
    text: Option<String>,
}

enum Token<'a> {
    Skip,
    Markup(&'a str),
    Text(&'a str),
}

impl<'a> XmlTokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            element: None,
            text: None,
        }
    }
}

impl XmlReader for XmlTokenizer<'_> {
    fn next_event(&mut self) -> Result<Option<XmlEvent>> {
        loop {
            if self.input.is_empty() {
                return Ok(None);
            }

            let (remaining, token) = token(self.input).map_err(|_| error::Error::Malformed {
                near: self.input.chars().take(32).collect(),
            })?;
            self.input = remaining;

            match token {
                Token::Skip => continue,
                Token::Text(data) if data.trim().is_empty() => continue,
                Token::Text(data) => {
                    self.text = Some(decode_entities(data));
                    return Ok(Some(XmlEvent::Text));
                }
                Token::Markup(body) => {
                    let (event, name) = classify(body)?;
                    self.element = Some(SmolStr::new(name));
                    return Ok(Some(event));
                }
            }
        }
    }

    fn element(&self) -> Option<&str> {
        self.element.as_deref()
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Writes `level` tab characters of indentation.
pub fn write_tab(sink: &mut dyn Write, level: usize) -> std::io::Result<()> {
    for _ in 0..level {
        sink.write_all(b"\t")?;
    }

    Ok(())
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        comment.map(|_| Token::Skip),
        declaration.map(|_| Token::Skip),
        markup.map(Token::Markup),
        is_not("<").map(Token::Text),
    ))
    .parse(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->")).parse(input)
}

fn declaration(input: &str) -> IResult<&str, &str> {
    delimited(tag("<?"), take_until("?>"), tag("?>")).parse(input)
}

fn markup(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), is_not(">"), char('>')).parse(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')),
    )
    .parse(input)
}

fn classify(body: &str) -> Result<(XmlEvent, &str)> {
    let (event, rest) = if let Some(rest) = body.strip_prefix('/') {
        (XmlEvent::ElementEnd, rest)
    } else if let Some(rest) = body.strip_suffix('/') {
        (XmlEvent::ElementEmpty, rest)
    } else {
        (XmlEvent::ElementBegin, body)
    };

    let (_, element) = name(rest).map_err(|_| error::Error::InvalidElement {
        markup: body.to_string(),
    })?;

    Ok((event, element))
}

fn decode_entities(data: &str) -> String {
    if !data.contains('&') {
        return data.to_string();
    }

    data.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("Malformed XML near {near:?}"))]
        Malformed { near: String },

        #[snafu(display("Invalid element markup <{markup}>"))]
        InvalidElement { markup: String },
    }
}
