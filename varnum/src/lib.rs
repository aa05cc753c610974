pub mod bin;
pub mod number;
pub mod object;
pub mod registry;
pub mod xml;

pub use number::{Number, NumberType, Primitive};
pub use object::{Object, ObjectKind};
pub use registry::{CodecRegistry, Registry};
pub use xml::{XmlEvent, XmlReader, XmlTokenizer};

#[derive(Debug, snafu::Snafu)]
pub struct Error(error::Error);
pub type Result<T> = std::result::Result<T, Error>;

impl From<number::Error> for Error {
    fn from(source: number::Error) -> Self {
        Self(error::Error::Number { source })
    }
}

impl From<xml::Error> for Error {
    fn from(source: xml::Error) -> Self {
        Self(error::Error::Xml { source })
    }
}

impl From<bin::Error> for Error {
    fn from(source: bin::Error) -> Self {
        Self(error::Error::Bin { source })
    }
}

impl From<registry::Error> for Error {
    fn from(source: registry::Error) -> Self {
        Self(error::Error::Registry { source })
    }
}

mod error {
    use snafu::Snafu;

    use crate::{bin, number, registry, xml};

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("{source}"))]
        Number { source: number::Error },

        #[snafu(display("Error while reading XML"))]
        Xml { source: xml::Error },

        #[snafu(display("Error while transferring binary header"))]
        Bin { source: bin::Error },

        #[snafu(display("{source}"))]
        Registry { source: registry::Error },
    }
}
