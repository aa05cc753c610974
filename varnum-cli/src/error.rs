use std::path::PathBuf;

use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)), context(suffix(false)))]
pub enum Error {
    #[snafu(display("Failed to open file: {}", path.display()))]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to create mmap for file: {}", path.display()))]
    Mmap {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to read standard input"))]
    Stdin { source: std::io::Error },

    #[snafu(display("Document is not valid UTF-8"))]
    Utf8 { source: std::str::Utf8Error },

    #[snafu(display("{}", source.to_string()))]
    Number { source: varnum::number::Error },

    #[snafu(display("{}", source.to_string()))]
    Codec { source: varnum::Error },

    #[snafu(display("Failed to write output"))]
    Output { source: std::io::Error },
}
