use std::{
    collections::HashMap,
    fmt::Display,
    hash::Hash,
    io::{Read, Write},
};

use smol_str::SmolStr;
use snafu::{OptionExt, Snafu, ensure};
use tracing::debug;

use crate::{
    bin,
    object::{Object, ObjectKind},
    xml::{XmlEvent, XmlReader},
};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Builds an object from the element the reader is positioned at.
pub type XmlReaderFn = fn(&mut dyn XmlReader, XmlEvent) -> crate::Result<Box<dyn Object>>;
/// Writes an object as one indented element.
pub type XmlWriterFn = fn(&dyn Object, &mut dyn Write, usize) -> crate::Result<()>;
/// Builds an object from a binary record whose header was already consumed.
pub type BinReaderFn = fn(&mut dyn Read, ObjectKind, u64) -> crate::Result<Box<dyn Object>>;
/// Writes an object as a binary record.
pub type BinWriterFn = fn(&dyn Object, &mut dyn Write) -> crate::Result<()>;

/// Slots object kinds install their codec entry points into.
///
/// Installing the same handler into an occupied slot again succeeds. A
/// different handler for an occupied slot is rejected with a conflict error.
pub trait CodecRegistry {
    fn set_xml_reader(&mut self, element: &str, reader: XmlReaderFn) -> Result<()>;

    fn set_xml_writer(&mut self, kind: ObjectKind, writer: XmlWriterFn) -> Result<()>;

    fn set_bin_reader(&mut self, kind: ObjectKind, reader: BinReaderFn) -> Result<()>;

    fn set_bin_writer(&mut self, kind: ObjectKind, writer: BinWriterFn) -> Result<()>;
}

/// Codec tables of the framework.
///
/// Populated once during start-up and only read afterwards. Textual readers
/// are keyed by element name (ASCII case-insensitive), everything else by
/// object kind.
#[derive(Debug, Default)]
pub struct Registry {
    xml_readers: HashMap<SmolStr, XmlReaderFn>,
    xml_writers: HashMap<ObjectKind, XmlWriterFn>,
    bin_readers: HashMap<ObjectKind, BinReaderFn>,
    bin_writers: HashMap<ObjectKind, BinWriterFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xml_reader(&self, element: &str) -> Option<XmlReaderFn> {
        self.xml_readers
            .get(&SmolStr::new(element.to_ascii_lowercase()))
            .copied()
    }

    pub fn xml_writer(&self, kind: ObjectKind) -> Option<XmlWriterFn> {
        self.xml_writers.get(&kind).copied()
    }

    pub fn bin_reader(&self, kind: ObjectKind) -> Option<BinReaderFn> {
        self.bin_readers.get(&kind).copied()
    }

    pub fn bin_writer(&self, kind: ObjectKind) -> Option<BinWriterFn> {
        self.bin_writers.get(&kind).copied()
    }

    /// Reads the next object from the token stream.
    ///
    /// Events before the first element are skipped. Returns `Ok(None)` when
    /// the stream ends before another element starts.
    pub fn read_xml(&self, reader: &mut dyn XmlReader) -> crate::Result<Option<Box<dyn Object>>> {
        while let Some(event) = reader.next_event()? {
            if !matches!(event, XmlEvent::ElementBegin | XmlEvent::ElementEmpty) {
                continue;
            }

            let element = reader.element().unwrap_or_default();
            let read = self.find_xml_reader(element)?;

            return read(reader, event).map(Some);
        }

        Ok(None)
    }

    pub fn write_xml(
        &self,
        object: &dyn Object,
        sink: &mut dyn Write,
        level: usize,
    ) -> crate::Result<()> {
        let kind = object.kind();
        let write = self.find_xml_writer(kind)?;

        write(object, sink, level)
    }

    /// Reads one binary record, header included.
    pub fn read_bin(&self, source: &mut dyn Read) -> crate::Result<Box<dyn Object>> {
        let (kind, size) = bin::read_type_size(source)?;
        let read = self.find_bin_reader(kind)?;

        read(source, kind, size)
    }

    pub fn write_bin(&self, object: &dyn Object, sink: &mut dyn Write) -> crate::Result<()> {
        let kind = object.kind();
        let write = self.find_bin_writer(kind)?;

        write(object, sink)
    }

    fn find_xml_reader(&self, element: &str) -> Result<XmlReaderFn> {
        Ok(self
            .xml_reader(element)
            .with_context(|| error::NoXmlReader { element })?)
    }

    fn find_xml_writer(&self, kind: ObjectKind) -> Result<XmlWriterFn> {
        Ok(self
            .xml_writer(kind)
            .with_context(|| error::NoXmlWriter { kind })?)
    }

    fn find_bin_reader(&self, kind: ObjectKind) -> Result<BinReaderFn> {
        Ok(self
            .bin_reader(kind)
            .with_context(|| error::NoBinReader { kind })?)
    }

    fn find_bin_writer(&self, kind: ObjectKind) -> Result<BinWriterFn> {
        Ok(self
            .bin_writer(kind)
            .with_context(|| error::NoBinWriter { kind })?)
    }
}

impl CodecRegistry for Registry {
    fn set_xml_reader(&mut self, element: &str, reader: XmlReaderFn) -> Result<()> {
        let key = SmolStr::new(element.to_ascii_lowercase());
        install(&mut self.xml_readers, key, reader, |a, b| {
            std::ptr::fn_addr_eq(a, b)
        })
    }

    fn set_xml_writer(&mut self, kind: ObjectKind, writer: XmlWriterFn) -> Result<()> {
        install(&mut self.xml_writers, kind, writer, |a, b| {
            std::ptr::fn_addr_eq(a, b)
        })
    }

    fn set_bin_reader(&mut self, kind: ObjectKind, reader: BinReaderFn) -> Result<()> {
        install(&mut self.bin_readers, kind, reader, |a, b| {
            std::ptr::fn_addr_eq(a, b)
        })
    }

    fn set_bin_writer(&mut self, kind: ObjectKind, writer: BinWriterFn) -> Result<()> {
        install(&mut self.bin_writers, kind, writer, |a, b| {
            std::ptr::fn_addr_eq(a, b)
        })
    }
}

fn install<K, F>(
    table: &mut HashMap<K, F>,
    key: K,
    handler: F,
    same: impl Fn(F, F) -> bool,
) -> Result<()>
where
    K: Eq + Hash + Display,
    F: Copy,
{
    if let Some(current) = table.get(&key) {
        ensure!(
            same(*current, handler),
            error::Conflict {
                slot: key.to_string()
            }
        );

        debug!(slot = %key, "handler already installed");
        return Ok(());
    }

    debug!(slot = %key, "installing handler");
    table.insert(key, handler);

    Ok(())
}

mod error {
    use snafu::Snafu;

    use crate::object::ObjectKind;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("Slot {slot} is already claimed by another handler"))]
        Conflict { slot: String },

        #[snafu(display("No XML reader for element <{element}>"))]
        NoXmlReader { element: String },

        #[snafu(display("No XML writer for {kind} objects"))]
        NoXmlWriter { kind: ObjectKind },

        #[snafu(display("No binary reader for {kind} objects"))]
        NoBinReader { kind: ObjectKind },

        #[snafu(display("No binary writer for {kind} objects"))]
        NoBinWriter { kind: ObjectKind },
    }
}
